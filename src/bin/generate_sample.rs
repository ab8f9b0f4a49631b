//! Generate a deterministic sample `WaterQualityDatabase.csv` so the viewer
//! can be tried without a real municipal report export.

const CITIES: [&str; 5] = ["Arlington", "Dallas", "Fort Worth", "Grand Prairie", "Irving"];

const YEARS: [i32; 3] = [2021, 2022, 2023];

/// (contaminant, MCL allowed, MCLG), levels in ppm except where a report
/// would use ppb; the viewer treats them as opaque numbers either way.
const CONTAMINANTS: [(&str, f64, f64); 15] = [
    ("Arsenic", 0.010, 0.0),
    ("Atrazine", 0.003, 0.003),
    ("Barium", 2.0, 2.0),
    ("Bromodichloromethane", 0.080, 0.0),
    ("Bromoform", 0.080, 0.0),
    ("Chloroform", 0.080, 0.07),
    ("Chromium", 0.1, 0.1),
    ("Coliforms (fecal, E coli, etc)", 5.0, 0.0),
    ("Copper", 1.3, 1.3),
    ("Cyanide", 0.2, 0.2),
    ("Dibromochloromethane", 0.080, 0.06),
    ("Fluoride", 4.0, 4.0),
    ("Lead", 0.015, 0.0),
    ("Nitrate", 10.0, 10.0),
    ("Nitrite", 1.0, 1.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "WaterQualityDatabase.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record(["City", "Year", "Contaminant", "Average Level", "MCL Allowed", "MCLG"])
        .expect("Failed to write header");

    let mut row_count = 0usize;
    for city in CITIES {
        for year in YEARS {
            for (contaminant, mcl, mclg) in CONTAMINANTS {
                // Mean around half the legal limit; the tail occasionally
                // crosses MCL so the highlight toggles have rows to mark.
                let level = (mcl * rng.gauss(0.55, 0.35)).abs();

                writer
                    .write_record([
                        city.to_string(),
                        year.to_string(),
                        contaminant.to_string(),
                        format!("{level:.4}"),
                        format!("{mcl:.4}"),
                        format!("{mclg:.4}"),
                    ])
                    .expect("Failed to write row");
                row_count += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush writer");

    println!(
        "Wrote {row_count} measurements ({} cities × {} years × {} contaminants) to {output_path}",
        CITIES.len(),
        YEARS.len(),
        CONTAMINANTS.len()
    );
}

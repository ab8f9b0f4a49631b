use super::model::Record;

// ---------------------------------------------------------------------------
// Highlight classification: per-row threshold annotation
// ---------------------------------------------------------------------------

/// Presentation annotation for one table row. The rendering layer decides
/// what each kind looks like; classification never touches styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    None,
    ExceedsMcl,
    ExceedsMclg,
}

/// The two user toggles. Independent flags, checked in MCL-first order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightRule {
    pub flag_exceeds_mcl: bool,
    pub flag_exceeds_mclg: bool,
}

/// Classify one row against its own thresholds.
///
/// The MCL check runs first: a row breaching both thresholds with both flags
/// set reports only [`HighlightKind::ExceedsMcl`]. Comparisons are strict, a
/// level exactly at a threshold is never flagged. Rows are only ever marked,
/// never removed.
pub fn classify(record: &Record, rule: &HighlightRule) -> HighlightKind {
    if rule.flag_exceeds_mcl && record.average_level > record.mcl_allowed {
        HighlightKind::ExceedsMcl
    } else if rule.flag_exceeds_mclg && record.average_level > record.mclg {
        HighlightKind::ExceedsMclg
    } else {
        HighlightKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(level: f64) -> Record {
        Record {
            city: "Arlington".to_string(),
            year: 2022,
            contaminant: "Lead".to_string(),
            average_level: level,
            mcl_allowed: 15.0,
            mclg: 0.0,
        }
    }

    const BOTH: HighlightRule = HighlightRule {
        flag_exceeds_mcl: true,
        flag_exceeds_mclg: true,
    };

    #[test]
    fn mcl_takes_precedence_over_mclg() {
        // 20 > 15 (MCL) and 20 > 0 (MCLG); only the MCL breach is reported.
        assert_eq!(classify(&lead(20.0), &BOTH), HighlightKind::ExceedsMcl);
    }

    #[test]
    fn mclg_reported_when_only_goal_is_breached() {
        assert_eq!(classify(&lead(5.0), &BOTH), HighlightKind::ExceedsMclg);
    }

    #[test]
    fn comparison_is_strict() {
        let at_mcl = lead(15.0);
        let rule = HighlightRule {
            flag_exceeds_mcl: true,
            flag_exceeds_mclg: false,
        };
        assert_eq!(classify(&at_mcl, &rule), HighlightKind::None);

        let mut at_mclg = lead(0.0);
        at_mclg.mclg = 0.0;
        assert_eq!(classify(&at_mclg, &BOTH), HighlightKind::None);
    }

    #[test]
    fn disabled_flags_never_mark() {
        assert_eq!(
            classify(&lead(20.0), &HighlightRule::default()),
            HighlightKind::None
        );
    }

    #[test]
    fn mcl_flag_off_falls_through_to_mclg() {
        let rule = HighlightRule {
            flag_exceeds_mcl: false,
            flag_exceeds_mclg: true,
        };
        assert_eq!(classify(&lead(20.0), &rule), HighlightKind::ExceedsMclg);
    }
}

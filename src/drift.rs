//! Drift detection between the committed folder map and a fresh render.

use similar::TextDiff;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// Outcome of comparing the prior document with the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftReport {
    /// No prior document exists
    Missing,
    /// Prior document matches byte for byte
    UpToDate,
    /// Documents differ; carries a unified diff from prior to expected
    Differs { diff: String },
}

impl DriftReport {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, DriftReport::UpToDate)
    }
}

/// Compare a prior document against the expected render. Performs no I/O.
///
/// `label` names the document in the diff headers.
pub fn check_drift(prior: Option<&str>, expected: &str, label: &str) -> DriftReport {
    let Some(prior) = prior else {
        return DriftReport::Missing;
    };
    if prior == expected {
        return DriftReport::UpToDate;
    }
    DriftReport::Differs {
        diff: unified_diff(prior, expected, label),
    }
}

/// Line-oriented unified diff with `(current)` / `(expected)` headers.
pub fn unified_diff(current: &str, expected: &str, label: &str) -> String {
    let diff = TextDiff::from_lines(current, expected);
    let from = format!("{} (current)", label);
    let to = format!("{} (expected)", label);
    diff.unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&from, &to)
        .to_string()
}

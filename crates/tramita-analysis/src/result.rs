//! The structured record produced by the extraction cascade

use crate::error::AnalysisError;

/// Structured outcome of one model invocation.
///
/// Constructed once from the raw response text and never mutated; the
/// caller that requested the analysis owns it exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Untouched model output, retained for diagnostics
    pub raw_text: String,

    /// Human-readable synopsis; empty only on total failure
    pub summary: String,

    /// Uppercase status tag (PROVAS, ARQUIVADO, ACORDO, SENTENCA,
    /// RECURSAL, NORMAL, URGENTE, AGUARDANDO, or whatever the model
    /// answered — unrecognized tags are preserved, not rejected)
    pub status: String,

    /// Free-text description of a running deadline, if any
    pub deadline: Option<String>,

    /// Recommended next action for the lawyer, if any
    pub next_action: Option<String>,

    /// Set only on unrecoverable failure
    pub error: Option<AnalysisError>,

    /// Set when a lower-fidelity extraction tier produced the summary
    pub warning: Option<String>,
}

impl AnalysisResult {
    /// Whether the analysis produced a usable summary.
    ///
    /// Holds exactly when `error` is absent and `summary` is non-empty;
    /// `warning` may be set on a successful result.
    pub fn success(&self) -> bool {
        self.error.is_none() && !self.summary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn base() -> AnalysisResult {
        AnalysisResult {
            raw_text: "raw".to_string(),
            summary: "something happened".to_string(),
            status: "NORMAL".to_string(),
            deadline: None,
            next_action: None,
            error: None,
            warning: None,
        }
    }

    #[test]
    fn success_requires_summary_and_no_error() {
        assert!(base().success());

        let mut empty = base();
        empty.summary.clear();
        assert!(!empty.success());

        let mut failed = base();
        failed.error = Some(AnalysisError::Structural("bad shape".to_string()));
        assert!(!failed.success());
    }

    #[test]
    fn warning_does_not_demote_success() {
        let mut warned = base();
        warned.warning = Some("degraded".to_string());
        assert!(warned.success());
    }
}

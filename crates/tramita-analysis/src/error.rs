//! Error types for response analysis

use thiserror::Error;

/// Unrecoverable faults while interpreting a model response.
///
/// Almost everything a model can produce degrades to a lower extraction
/// tier instead of failing; this kind is reserved for responses whose
/// located JSON object cannot be mapped onto the result record at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A located JSON object carried a field with an unusable shape
    #[error("structural fault in model response: {0}")]
    Structural(String),
}

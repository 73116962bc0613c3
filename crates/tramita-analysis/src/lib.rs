//! Tramita Analysis
//!
//! Tolerant extraction of structured case-analysis records from free-text
//! model output.
//!
//! # Overview
//!
//! Generative models are asked to answer with a small JSON object
//! (`resumo`, `situacao`, `prazo`, `proxima_acao`), but their replies are
//! not reliable: code fences, trailing commas, smart quotes, labeled prose
//! instead of JSON, or plain prose with nothing recognizable at all. This
//! crate turns any of those into an [`AnalysisResult`] without ever
//! raising, preferring the highest-fidelity interpretation available.
//!
//! # Architecture
//!
//! ```text
//! raw text → fence strip → JSON locator → parse
//!                              │ parse failed
//!                              ▼
//!                          repair (once) → locator → parse
//!                              │ still failed / no JSON
//!                              ▼
//!                          labeled plain-text fields
//!                              │ nothing matched
//!                              ▼
//!                          raw truncation fallback
//! ```
//!
//! Every tier is pure and synchronous; the crate does no I/O and holds no
//! state, so it is safe to call from any number of concurrent tasks.
//!
//! # Example
//!
//! ```
//! use tramita_analysis::parse_model_response;
//!
//! let result = parse_model_response(r#"{"resumo": "ok", "situacao": "urgente"}"#);
//! assert!(result.success());
//! assert_eq!(result.summary, "ok");
//! assert_eq!(result.status, "URGENTE");
//! ```

#![warn(missing_docs)]

mod error;
mod fields;
mod locator;
mod parser;
mod repair;
mod result;
mod summary;


pub use error::AnalysisError;
pub use parser::{parse_model_response, NO_CONTENT_FALLBACK, UNSTRUCTURED_WARNING};
pub use result::AnalysisResult;
pub use summary::clean_sheet_summary;

//! Tramita Comunica
//!
//! Client for the CNJ "Comunica PJe" public API — the national electronic
//! justice gazette (DJEN) and edict platform. The API is public and
//! unauthenticated, but rate limited, so the client paces its own
//! requests.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tramita_comunica::ComunicaClient;
//!
//! # async fn example() -> Result<(), tramita_comunica::ComunicaError> {
//! let client = ComunicaClient::new(
//!     tramita_comunica::DEFAULT_BASE_URL,
//!     Duration::from_secs(30),
//!     Duration::from_secs(2),
//! );
//!
//! let result = client.query_case("0809090-86.2023.8.12.0021", 3).await?;
//! for publication in &result.publications {
//!     println!("{}: {}", publication.formatted_date(), publication.communication_type);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod court;
mod error;
mod html;
mod publication;

pub use client::{ComunicaClient, QueryResult, RateLimit, DEFAULT_BASE_URL};
pub use court::{court_from_case_number, normalize_case_number, CourtInfo, JusticeBranch};
pub use error::ComunicaError;
pub use html::strip_html;
pub use publication::{Lawyer, Publication, Recipient};

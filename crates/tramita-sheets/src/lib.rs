//! Tramita Sheets
//!
//! Google Sheets client for the case-control spreadsheet, authenticated
//! through a service account.
//!
//! The spreadsheet is the operator's interface: one worksheet per client,
//! one row per case, with the case number in a configured column. The bot
//! reads case rows from here and writes back status, timestamp and the
//! model's summary after each sweep.
//!
//! # Example
//!
//! ```no_run
//! use tramita_sheets::{ColumnNames, ServiceAccountKey, SheetsClient};
//!
//! # async fn example() -> Result<(), tramita_sheets::SheetsError> {
//! let key = ServiceAccountKey::from_file("credentials.json")?;
//! let client = SheetsClient::new(key, "1AbC...spreadsheet-id", ColumnNames::default());
//!
//! for case in client.list_cases(None).await? {
//!     println!("{} (tab {}, row {})", case.number, case.tab, case.row);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod auth;
mod client;
mod column;
mod error;
mod types;

pub use auth::ServiceAccountKey;
pub use client::SheetsClient;
pub use error::SheetsError;
pub use types::{CaseRow, CaseUpdate, ColumnNames};

//! Sheets REST client

use crate::auth::{ServiceAccountKey, TokenProvider};
use crate::column::{find_column, looks_like_case_number, rowcol_to_a1};
use crate::error::SheetsError;
use crate::types::{CaseRow, CaseUpdate, ColumnNames};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ValueRange {
    values: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct BatchUpdateRequest {
    #[serde(rename = "valueInputOption")]
    value_input_option: &'static str,
    data: Vec<RangeWrite>,
}

#[derive(Serialize)]
struct RangeWrite {
    range: String,
    values: Vec<Vec<String>>,
}

/// Client for one control spreadsheet.
///
/// The spreadsheet is addressed by its ID (the long token in its URL);
/// worksheets and columns are discovered at call time, so operators can
/// reorder columns freely.
pub struct SheetsClient {
    spreadsheet_id: String,
    columns: ColumnNames,
    tokens: TokenProvider,
    client: reqwest::Client,
}

impl SheetsClient {
    /// Create a client for `spreadsheet_id` authenticated by `key`.
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_id: impl Into<String>,
        columns: ColumnNames,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("HTTP client construction failed - TLS misconfiguration");

        Self {
            spreadsheet_id: spreadsheet_id.into(),
            columns,
            tokens: TokenProvider::new(key, client.clone()),
            client,
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, SheetsError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json().await?)
    }

    /// Titles of the spreadsheet's worksheets.
    pub async fn list_tabs(&self) -> Result<Vec<String>, SheetsError> {
        let url = format!("{API_BASE}/{}", self.spreadsheet_id);
        let body = self
            .get_json(&url, &[("fields", "sheets.properties.title")])
            .await?;

        let tabs = body["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .filter_map(|sheet| sheet["properties"]["title"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(tabs)
    }

    /// Authenticate and list worksheets, returning a human message.
    pub async fn test_connection(&self) -> Result<String, SheetsError> {
        let tabs = self.list_tabs().await?;
        Ok(format!("connected, worksheets found: {}", tabs.join(", ")))
    }

    async fn read_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!(
            "{API_BASE}/{}/values/{}",
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let body = self.get_json(&url, &[]).await?;
        let range: ValueRange = serde_json::from_value(body)?;
        Ok(range.values)
    }

    /// List the case rows of one tab, or of every tab when `tab` is
    /// `None`. Tabs that cannot be read or lack the case-number column
    /// are skipped with a warning rather than failing the sweep.
    pub async fn list_cases(&self, tab: Option<&str>) -> Result<Vec<CaseRow>, SheetsError> {
        let tabs = match tab {
            Some(name) => vec![name.to_string()],
            None => self.list_tabs().await?,
        };

        let mut cases = Vec::new();
        for name in tabs {
            match self.scan_tab(&name).await {
                Ok(mut rows) => cases.append(&mut rows),
                Err(error) => warn!(tab = %name, %error, "skipping unreadable worksheet"),
            }
        }

        Ok(cases)
    }

    async fn scan_tab(&self, tab: &str) -> Result<Vec<CaseRow>, SheetsError> {
        let values = self.read_values(&quote_tab(tab)).await?;
        if values.len() < 2 {
            return Ok(Vec::new());
        }

        let headers = &values[0];
        let Some(number_col) = find_column(headers, &self.columns.case_number) else {
            warn!(
                tab,
                column = %self.columns.case_number,
                "worksheet has no case-number column"
            );
            return Ok(Vec::new());
        };
        let status_col = find_column(headers, &self.columns.status);
        let checked_col = find_column(headers, &self.columns.last_checked);
        let summary_col = find_column(headers, &self.columns.ai_summary);

        let mut cases = Vec::new();
        for (offset, row) in values[1..].iter().enumerate() {
            let Some(number) = row.get(number_col) else {
                continue;
            };
            let number = number.trim();
            if number.is_empty() || !looks_like_case_number(number) {
                continue;
            }

            cases.push(CaseRow {
                number: number.to_string(),
                row: offset + 2,
                tab: tab.to_string(),
                current_status: cell(row, status_col),
                last_checked: cell(row, checked_col),
                ai_summary: cell(row, summary_col),
            });
        }

        debug!(tab, cases = cases.len(), "worksheet scanned");
        Ok(cases)
    }

    /// Write an update back to a case row in one batched call. Columns
    /// missing from the worksheet are silently skipped; optional values
    /// leave their cells untouched.
    pub async fn update_case(
        &self,
        case: &CaseRow,
        update: &CaseUpdate,
    ) -> Result<(), SheetsError> {
        let header_range = format!("{}!1:1", quote_tab(&case.tab));
        let headers = self
            .read_values(&header_range)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let entries: [(&str, Option<&str>); 5] = [
            (&self.columns.status, Some(update.status.as_str())),
            (&self.columns.last_checked, Some(update.checked_at.as_str())),
            (&self.columns.ai_summary, update.ai_summary.as_deref()),
            (
                &self.columns.last_publication,
                update.last_publication.as_deref(),
            ),
            (
                &self.columns.last_publication_type,
                update.last_publication_type.as_deref(),
            ),
        ];

        let mut data = Vec::new();
        for (column_name, value) in entries {
            let (Some(col), Some(value)) = (find_column(&headers, column_name), value) else {
                continue;
            };
            data.push(RangeWrite {
                range: format!("{}!{}", quote_tab(&case.tab), rowcol_to_a1(case.row, col + 1)),
                values: vec![vec![value.to_string()]],
            });
        }

        if data.is_empty() {
            return Ok(());
        }

        let url = format!("{API_BASE}/{}/values:batchUpdate", self.spreadsheet_id);
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&BatchUpdateRequest {
                value_input_option: "RAW",
                data,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(())
    }
}

/// Quote a tab name for use in an A1 range, doubling embedded quotes.
fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

fn cell(row: &[String], col: Option<usize>) -> Option<String> {
    let value = row.get(col?)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_decodes_and_defaults() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range": "A1:B2", "values": [["a", "b"], ["c"]]}"#).unwrap();
        assert_eq!(range.values.len(), 2);
        assert_eq!(range.values[1], vec!["c".to_string()]);

        let empty: ValueRange = serde_json::from_str(r#"{"range": "A1:B2"}"#).unwrap();
        assert!(empty.values.is_empty());
    }

    #[test]
    fn tab_names_are_quoted_for_ranges() {
        assert_eq!(quote_tab("Clientes"), "'Clientes'");
        assert_eq!(quote_tab("Cliente 'X'"), "'Cliente ''X'''");
    }

    #[test]
    fn batch_update_serializes_expected_wire_format() {
        let request = BatchUpdateRequest {
            value_input_option: "RAW",
            data: vec![RangeWrite {
                range: "'Aba'!C2".to_string(),
                values: vec![vec!["URGENTE".to_string()]],
            }],
        };

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["valueInputOption"], "RAW");
        assert_eq!(wire["data"][0]["range"], "'Aba'!C2");
        assert_eq!(wire["data"][0]["values"][0][0], "URGENTE");
    }

    #[test]
    fn missing_cells_read_as_none() {
        let row = vec!["0809090-86.2023.8.12.0021".to_string(), " ".to_string()];
        assert_eq!(cell(&row, Some(0)).as_deref(), Some("0809090-86.2023.8.12.0021"));
        assert!(cell(&row, Some(1)).is_none());
        assert!(cell(&row, Some(5)).is_none());
        assert!(cell(&row, None).is_none());
    }
}

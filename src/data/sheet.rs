//! Google Sheets integration for the job-schedule worksheet.
//!
//! The fetcher owns authentication and transport; failures surface as
//! exit-code-4 errors upstream of the pipeline, which never sees a
//! half-fetched table.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{AppError, EXIT_INPUT, EXIT_RUNTIME};
use crate::pipeline::RawTable;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Transient failures (transport errors, 429/5xx) get this many extra tries.
const FETCH_RETRIES: u32 = 2;
const RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

pub struct SheetClient {
    client: Client,
    api_key: String,
}

impl SheetClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("SHEETS_API_KEY")
            .map_err(|_| AppError::new(EXIT_INPUT, "Missing SHEETS_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch a worksheet as a raw string table (first row = headers).
    ///
    /// Transient failures are retried a fixed number of times; non-transient
    /// statuses (bad key, missing sheet) fail immediately.
    pub fn fetch_table(&self, spreadsheet_id: &str, worksheet: &str) -> Result<RawTable, AppError> {
        let url = format!("{BASE_URL}/{spreadsheet_id}/values/{worksheet}");

        let mut last_err = AppError::new(EXIT_RUNTIME, "Sheets request was never attempted.");
        for attempt in 0..=FETCH_RETRIES {
            if attempt > 0 {
                std::thread::sleep(RETRY_DELAY);
            }
            match self.fetch_once(&url, worksheet) {
                Ok(table) => return Ok(table),
                Err((err, transient)) => {
                    if !transient {
                        return Err(err);
                    }
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    fn fetch_once(&self, url: &str, worksheet: &str) -> Result<RawTable, (AppError, bool)> {
        let resp = self
            .client
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("majorDimension", "ROWS"),
                // Formatted values keep dates/currency as the sheet displays them,
                // which is exactly what the validator's coercion step expects.
                ("valueRenderOption", "FORMATTED_VALUE"),
            ])
            .send()
            .map_err(|e| (AppError::new(EXIT_RUNTIME, format!("Sheets request failed: {e}")), true))?;

        let status = resp.status();
        if !status.is_success() {
            let transient = status.is_server_error() || status.as_u16() == 429;
            return Err((
                AppError::new(
                    4,
                    format!("Sheets request for '{worksheet}' failed with status {status}."),
                ),
                transient,
            ));
        }

        let body: ValuesResponse = resp.json().map_err(|e| {
            (
                AppError::new(EXIT_RUNTIME, format!("Failed to parse Sheets response: {e}")),
                false,
            )
        })?;

        Ok(values_to_table(body.values))
    }
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

fn values_to_table(values: Vec<Vec<String>>) -> RawTable {
    let mut iter = values.into_iter();
    let columns = iter.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = iter.collect();
    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_becomes_the_header() {
        let table = values_to_table(vec![
            vec!["Job Name".to_string(), "Status".to_string()],
            vec!["Framing".to_string(), "Planned".to_string()],
        ]);
        assert_eq!(table.columns, vec!["Job Name", "Status"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn an_empty_values_payload_becomes_an_empty_table() {
        let table = values_to_table(vec![]);
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}

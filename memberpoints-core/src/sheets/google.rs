// File: memberpoints-core/src/sheets/google.rs

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use crate::Error;
use crate::http::{HttpClient, HttpResponse};
use super::{SheetLayout, SheetRow, SheetSource, SheetsConfig, SheetsCredential};

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

/// Reads a worksheet through the Google Sheets values API.
pub struct GoogleSheetsSource {
    config: SheetsConfig,
    http: Arc<dyn HttpClient<Error = Error>>,
}

impl GoogleSheetsSource {
    pub fn new(config: SheetsConfig, http: Arc<dyn HttpClient<Error = Error>>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    pub fn values_url(&self) -> String {
        let mut url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.config.spreadsheet_id),
            urlencoding::encode(&self.config.sheet_name),
        );
        if let SheetsCredential::ApiKey(key) = &self.config.credential {
            url.push_str("?key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    fn auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let SheetsCredential::AccessToken(token) = &self.config.credential {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }
}

fn api_error(resp: &HttpResponse) -> Error {
    match serde_json::from_str::<ApiErrorBody>(&resp.body) {
        Ok(body) => Error::Sheets(format!(
            "HTTP {} (code {}): {}",
            resp.status, body.error.code, body.error.message
        )),
        Err(_) => Error::Sheets(format!("HTTP {}: {}", resp.status, resp.body.trim())),
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Turns a header row plus data rows into keyed rows. Short rows are padded with
/// empty cells; rows with no content at all are dropped. Each row keeps its
/// position in the sheet.
pub fn rows_from_values(values: Vec<Vec<Value>>) -> Vec<SheetRow> {
    let mut iter = values.into_iter();
    let Some(header) = iter.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(|c| cell_text(c).trim().to_string()).collect();

    // Data starts on sheet row 2.
    iter.enumerate()
        .map(|(idx, cells)| {
            let keyed = header
                .iter()
                .enumerate()
                .filter(|(_, key)| !key.is_empty())
                .map(|(i, key)| (key.clone(), cells.get(i).map(cell_text).unwrap_or_default()))
                .collect();
            SheetRow::new(idx + 2, keyed)
        })
        .filter(|row| !row.is_blank())
        .collect()
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    fn layout(&self) -> &SheetLayout {
        &self.config.layout
    }

    async fn fetch_rows(&self) -> Result<Vec<SheetRow>, Error> {
        debug!(
            "Fetching sheet '{}' from spreadsheet {}",
            self.config.sheet_name, self.config.spreadsheet_id
        );
        let resp = self.http.get(self.values_url(), self.auth_headers()).await?;
        if !resp.is_success() {
            let err = api_error(&resp);
            warn!("Google Sheets fetch failed: {}", err);
            return Err(err);
        }

        let range: ValueRange = serde_json::from_str(&resp.body)?;
        let rows = rows_from_values(range.values);
        if rows.is_empty() {
            warn!("Sheet '{}' has no data rows", self.config.sheet_name);
        } else {
            info!("Fetched {} rows from sheet '{}'", rows.len(), self.config.sheet_name);
        }
        Ok(rows)
    }
}

//! Spreadsheet access for the consumption sync.
//!
//! Nothing here is global: the caller builds a `SheetsConfig` once (usually from
//! the environment), wraps it in a `GoogleSheetsSource`, and hands the source to
//! `SheetSyncService::sync` on every run. A missing config only disables sync.

pub mod cleaning;
pub mod google;

use std::collections::HashMap;
use std::env;
use std::fmt;
use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::warn;
use crate::Error;

pub use google::GoogleSheetsSource;

/// One spreadsheet row keyed by its header cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number in the sheet; the header is row 1.
    pub number: usize,
    pub cells: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(number: usize, cells: HashMap<String, String>) -> Self {
        Self { number, cells }
    }

    pub fn cell(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SHEET_NAME: &str = "Sheet9";
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

pub const DEFAULT_EMAIL_COLUMN: &str = "會員 Email";
pub const DEFAULT_AMOUNT_COLUMN: &str = "消費金額(元)";
pub const DEFAULT_ITEM_COLUMN: &str = "銷售品項";
pub const DEFAULT_TIME_COLUMN: &str = "銷售時間";
pub const DEFAULT_ITEM_LABEL: &str = "未知品項";

/// How to read the sheet's rows: column headers and the timezone for naive
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub email_column: String,
    pub amount_column: String,
    pub item_column: String,
    pub time_column: String,
    /// Used when a row has no item.
    pub default_item: String,
    pub timezone: Tz,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            email_column: DEFAULT_EMAIL_COLUMN.to_string(),
            amount_column: DEFAULT_AMOUNT_COLUMN.to_string(),
            item_column: DEFAULT_ITEM_COLUMN.to_string(),
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            default_item: DEFAULT_ITEM_LABEL.to_string(),
            timezone: chrono_tz::Asia::Taipei,
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum SheetsCredential {
    /// OAuth access token, sent as `Authorization: Bearer`.
    AccessToken(String),
    /// API key for publicly readable sheets, sent as `?key=`.
    ApiKey(String),
}

impl fmt::Debug for SheetsCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetsCredential::AccessToken(_) => write!(f, "AccessToken(<redacted>)"),
            SheetsCredential::ApiKey(_) => write!(f, "ApiKey(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub credential: SheetsCredential,
    pub api_base: String,
    pub layout: SheetLayout,
}

impl SheetsConfig {
    /// Reads `SHEETS_*` variables. Returns `Ok(None)` when the spreadsheet id or
    /// both credentials are missing, which leaves sync disabled.
    pub fn from_env() -> Result<Option<Self>, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let credential = match (get("SHEETS_ACCESS_TOKEN"), get("SHEETS_API_KEY")) {
            (Some(token), _) => SheetsCredential::AccessToken(token),
            (None, Some(key)) => SheetsCredential::ApiKey(key),
            (None, None) => {
                warn!("Neither SHEETS_ACCESS_TOKEN nor SHEETS_API_KEY is set; spreadsheet sync disabled.");
                return Ok(None);
            }
        };
        let Some(spreadsheet_id) = get("SHEETS_SPREADSHEET_ID") else {
            warn!("SHEETS_SPREADSHEET_ID is not set; spreadsheet sync disabled.");
            return Ok(None);
        };

        let tz_name = get("SHEETS_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|e| Error::Config(format!("SHEETS_TIMEZONE '{}': {}", tz_name, e)))?;

        let defaults = SheetLayout::default();
        let layout = SheetLayout {
            email_column: get("SHEETS_EMAIL_COLUMN").unwrap_or(defaults.email_column),
            amount_column: get("SHEETS_AMOUNT_COLUMN").unwrap_or(defaults.amount_column),
            item_column: get("SHEETS_ITEM_COLUMN").unwrap_or(defaults.item_column),
            time_column: get("SHEETS_TIME_COLUMN").unwrap_or(defaults.time_column),
            default_item: defaults.default_item,
            timezone,
        };

        Ok(Some(Self {
            spreadsheet_id,
            sheet_name: get("SHEETS_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            credential,
            api_base: get("SHEETS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            layout,
        }))
    }
}

/// Where the sync reads its rows from.
#[async_trait]
pub trait SheetSource: Send + Sync {
    fn layout(&self) -> &SheetLayout;
    async fn fetch_rows(&self) -> Result<Vec<SheetRow>, Error>;
}

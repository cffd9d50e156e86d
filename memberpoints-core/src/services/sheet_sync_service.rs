// File: memberpoints-core/src/services/sheet_sync_service.rs

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use memberpoints_common::models::{ConsumptionRecord, SyncLog, SyncStatus};
use memberpoints_common::traits::repository_traits::{
    ConsumptionRepository, MemberRepository, SyncLogRepository,
};
use crate::Error;
use crate::sheets::cleaning::{parse_sales_time, safe_decimal, safe_strip};
use crate::sheets::{SheetLayout, SheetRow, SheetSource};

/// Result of one sync run. `notes` holds one human-readable line per skipped
/// row or recovered problem.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub inserted: usize,
    pub skipped: usize,
    pub replaced: u64,
    pub notes: Vec<String>,
}

impl SyncReport {
    fn failed(note: String) -> Self {
        Self {
            status: SyncStatus::Failure,
            inserted: 0,
            skipped: 0,
            replaced: 0,
            notes: vec![note],
        }
    }

    pub fn message(&self) -> String {
        let mut msg = match self.status {
            SyncStatus::Success => format!(
                "Google Sheets sync finished: {} inserted, {} skipped, {} previous records replaced.\n",
                self.inserted, self.skipped, self.replaced
            ),
            SyncStatus::Failure => "Google Sheets sync failed.\n".to_string(),
        };
        for note in &self.notes {
            msg.push_str(note);
            msg.push('\n');
        }
        msg
    }
}

enum RowOutcome {
    Parsed(ConsumptionRecord),
    Skipped(String),
}

pub struct SheetSyncService {
    member_repo: Arc<dyn MemberRepository + Send + Sync>,
    consumption_repo: Arc<dyn ConsumptionRepository + Send + Sync>,
    sync_log_repo: Arc<dyn SyncLogRepository + Send + Sync>,
}

impl SheetSyncService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository + Send + Sync>,
        consumption_repo: Arc<dyn ConsumptionRepository + Send + Sync>,
        sync_log_repo: Arc<dyn SyncLogRepository + Send + Sync>,
    ) -> Self {
        Self { member_repo, consumption_repo, sync_log_repo }
    }

    /// Replaces every consumption record with the rows of `source`.
    ///
    /// Row problems are collected into the report and never stop the run. A
    /// failed fetch or a failed replace leaves the existing records untouched.
    /// Every run appends a sync log entry.
    pub async fn sync(&self, source: &dyn SheetSource) -> SyncReport {
        let report = self.run(source).await;
        let message = report.message();

        match report.status {
            SyncStatus::Success => info!("{}", message.trim_end()),
            SyncStatus::Failure => error!("{}", message.trim_end()),
        }
        if let Err(e) = self.sync_log_repo.insert_sync_log(&SyncLog::new(report.status, &message)).await {
            error!("Could not write sync log: {}", e);
        }
        report
    }

    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<SyncLog>, Error> {
        self.sync_log_repo.list_recent_sync_logs(limit).await
    }

    async fn run(&self, source: &dyn SheetSource) -> SyncReport {
        let rows = match source.fetch_rows().await {
            Ok(rows) => rows,
            Err(e) => return SyncReport::failed(format!("Could not read the spreadsheet: {}", e)),
        };

        let layout = source.layout();
        let now = Utc::now();
        let mut records = Vec::with_capacity(rows.len());
        let mut notes = Vec::new();
        let mut skipped = 0;

        for row in &rows {
            let row_no = row.number;
            match self.parse_row(row, layout, now, &mut notes).await {
                Ok(RowOutcome::Parsed(rec)) => records.push(rec),
                Ok(RowOutcome::Skipped(note)) => {
                    skipped += 1;
                    notes.push(note);
                }
                Err(e) => {
                    skipped += 1;
                    warn!("Sheet row {} failed: {}", row_no, e);
                    notes.push(format!("Row {}: error: {}", row_no, e));
                }
            }
        }

        if rows.is_empty() {
            warn!("Spreadsheet returned no rows; consumption records will be cleared");
        }

        match self.consumption_repo.replace_all_consumptions(&records).await {
            Ok(replaced) => SyncReport {
                status: SyncStatus::Success,
                inserted: records.len(),
                skipped,
                replaced,
                notes,
            },
            Err(e) => {
                notes.push(format!("Could not replace consumption records: {}", e));
                SyncReport {
                    status: SyncStatus::Failure,
                    inserted: 0,
                    skipped,
                    replaced: 0,
                    notes,
                }
            }
        }
    }

    async fn parse_row(
        &self,
        row: &SheetRow,
        layout: &SheetLayout,
        now: DateTime<Utc>,
        notes: &mut Vec<String>,
    ) -> Result<RowOutcome, Error> {
        let row_no = row.number;
        let cell = |column: &str| row.cell(column).map(safe_strip).unwrap_or_default();

        let email = cell(&layout.email_column);
        let amount = safe_decimal(&cell(&layout.amount_column));
        let sold_item = Some(cell(&layout.item_column))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| layout.default_item.clone());
        let raw_time = cell(&layout.time_column);

        if email.is_empty() {
            return Ok(RowOutcome::Skipped(format!("Row {}: no member email, row skipped.", row_no)));
        }
        let mut matches = self.member_repo.find_members_by_email(&email).await?;
        let member = match matches.len() {
            0 => {
                return Ok(RowOutcome::Skipped(format!(
                    "Row {}: no member with email {}, row skipped.",
                    row_no, email
                )));
            }
            1 => matches.remove(0),
            n => {
                return Ok(RowOutcome::Skipped(format!(
                    "Row {}: email {} matches {} members, row skipped.",
                    row_no, email, n
                )));
            }
        };

        let sales_time = match parse_sales_time(&raw_time, layout.timezone) {
            Some(t) => t,
            None => {
                notes.push(format!(
                    "Row {}: unrecognised sales time '{}', using the sync time.",
                    row_no, raw_time
                ));
                now
            }
        };

        let rec = ConsumptionRecord::purchase(member.member_id, amount, &sold_item, sales_time)?;
        Ok(RowOutcome::Parsed(rec))
    }
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use memberpoints_common::models::SyncStatus;
use memberpoints_core::Database;
use memberpoints_core::DefaultHttpClient;
use memberpoints_core::api::{self, ApiState};
use memberpoints_core::repositories::postgres::{
    PostgresConsumptionRepository,
    PostgresLedgerRepository,
    PostgresMemberRepository,
    PostgresRedemptionRepository,
    PostgresSlotRecordRepository,
    PostgresSyncLogRepository,
};
use memberpoints_core::services::{LedgerService, MemberService, SheetSyncService, SlotService};
use memberpoints_core::sheets::{GoogleSheetsSource, SheetSource, SheetsConfig};
use memberpoints_core::slot::ThreadRngDraw;

#[derive(Parser, Debug, Clone)]
#[command(name = "memberpoints")]
#[command(author, version, about = "Member points ledger, slot games and spreadsheet sync")]
struct Args {
    /// Mode: "server" (HTTP API) or "sync" (one spreadsheet sync, then exit)
    #[arg(long, default_value = "server")]
    mode: String,

    /// Address the HTTP API binds to
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8000")]
    server_addr: String,

    /// Postgres connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://postgres@localhost:5432/memberpoints")]
    database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,

    /// Timeout for spreadsheet requests, in seconds
    #[arg(long, default_value_t = 30)]
    sheets_timeout_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

struct App {
    state: ApiState,
}

async fn build_app(args: &Args) -> anyhow::Result<App> {
    let db = Database::with_max_connections(&args.database_url, args.max_connections)
        .await
        .context("connecting to Postgres")?;
    db.migrate().await.context("running migrations")?;
    let pool = db.pool().clone();

    let member_repo = Arc::new(PostgresMemberRepository::new(pool.clone()));
    let consumption_repo = Arc::new(PostgresConsumptionRepository::new(pool.clone()));
    let redemption_repo = Arc::new(PostgresRedemptionRepository::new(pool.clone()));
    let slot_repo = Arc::new(PostgresSlotRecordRepository::new(pool.clone()));
    let sync_log_repo = Arc::new(PostgresSyncLogRepository::new(pool.clone()));
    let ledger_repo = Arc::new(PostgresLedgerRepository::new(pool));

    let member_service = Arc::new(MemberService::new(member_repo.clone()));
    let ledger_service = Arc::new(LedgerService::new(
        ledger_repo.clone(),
        consumption_repo.clone(),
        redemption_repo,
        slot_repo,
        member_service.clone(),
    ));
    let slot_service = Arc::new(SlotService::new(
        ledger_repo,
        member_service.clone(),
        Arc::new(ThreadRngDraw::new()?),
    ));
    let sync_service = Arc::new(SheetSyncService::new(member_repo, consumption_repo, sync_log_repo));

    let sheet_source: Option<Arc<dyn SheetSource>> = match SheetsConfig::from_env()? {
        Some(config) => {
            let http = DefaultHttpClient::new(Duration::from_secs(args.sheets_timeout_secs))?;
            info!(
                "Spreadsheet sync enabled for sheet '{}' of {}",
                config.sheet_name, config.spreadsheet_id
            );
            Some(Arc::new(GoogleSheetsSource::new(config, Arc::new(http))))
        }
        None => None,
    };

    Ok(App {
        state: ApiState {
            member_service,
            ledger_service,
            slot_service,
            sync_service,
            sheet_source,
        },
    })
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    let addr: SocketAddr = args
        .server_addr
        .parse()
        .with_context(|| format!("invalid --server-addr '{}'", args.server_addr))?;
    let app = build_app(&args).await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
        }
        info!("Ctrl-C detected; shutting down...");
        let _ = shutdown_tx.send(());
    });

    api::serve(addr, app.state, shutdown_rx).await?;
    Ok(())
}

async fn run_sync(args: Args) -> anyhow::Result<()> {
    let app = build_app(&args).await?;
    let Some(source) = app.state.sheet_source else {
        anyhow::bail!("spreadsheet sync is disabled: set SHEETS_SPREADSHEET_ID and SHEETS_ACCESS_TOKEN or SHEETS_API_KEY");
    };
    let report = app.state.sync_service.sync(source.as_ref()).await;
    print!("{}", report.message());
    if report.status == SyncStatus::Failure {
        anyhow::bail!("spreadsheet sync failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("memberpoints starting. mode={}", args.mode);

    match args.mode.as_str() {
        "server" => run_server(args).await?,
        "sync" => run_sync(args).await?,
        other => {
            warn!("Invalid mode '{}'. Use --mode=server or --mode=sync.", other);
            anyhow::bail!("invalid mode '{}'", other);
        }
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

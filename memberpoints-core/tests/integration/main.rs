// File: memberpoints-core/tests/integration/main.rs
//
// These tests need a Postgres server. Point TEST_DATABASE_URL at it and run
// `cargo test -- --ignored`.


use tokio::sync::{Mutex, MutexGuard};
use memberpoints_core::Error;
use memberpoints_core::db::Database;
use memberpoints_core::test_utils::helpers::setup_test_database;

/// Every test truncates the same database, so they take turns.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

pub async fn fresh_database() -> Result<(MutexGuard<'static, ()>, Database), Error> {
    let guard = DB_LOCK.lock().await;
    let db = setup_test_database().await?;
    Ok((guard, db))
}

// File: memberpoints-core/tests/unit/main.rs

mod support;

mod ledger_service_tests;
mod sheet_sync_tests;
mod slot_service_tests;

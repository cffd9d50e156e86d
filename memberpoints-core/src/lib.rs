// src/lib.rs

pub mod db;
pub mod http;
pub mod repositories;
pub mod slot;
pub mod sheets;
pub mod services;
pub mod api;
pub mod test_utils;

pub use db::Database;
pub use memberpoints_common::error::Error;
pub use memberpoints_common::models;
pub use http::{DefaultHttpClient, HttpClient};

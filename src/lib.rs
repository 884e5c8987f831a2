pub mod cases;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod query;
pub mod report;
pub mod server;
pub mod stats;
pub mod table;

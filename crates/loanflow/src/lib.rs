pub mod config;
pub mod error;
pub mod origination;
pub mod telemetry;

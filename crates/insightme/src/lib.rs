pub mod assessment;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

pub mod config;
pub mod error;
pub mod ingest;
pub mod siting;
pub mod spatial;
pub mod telemetry;

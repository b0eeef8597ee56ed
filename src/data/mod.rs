pub mod ingest;
pub mod log;
pub mod reshape;

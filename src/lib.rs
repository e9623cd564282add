// src/lib.rs
//! Serial GPS fix reader
//!
//! Reads NMEA sentences from a serially connected GPS receiver, validates
//! and parses the GGA fix sentence, and publishes the latest fix to any
//! number of concurrent readers.

pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod ingest;
pub mod sink;
pub mod transport;

// Re-export main types for convenience
pub use config::GpsConfig;
pub use error::{GpsError, Result};
pub use gps::{Coordinate, Fix, FixState};
pub use ingest::{start, IngestHandle};
pub use sink::{FileSink, MemorySink, RecordSink, Sinks};

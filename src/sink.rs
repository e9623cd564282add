// src/sink.rs
//! Append-only record sinks for the fix log and the error log

use crate::{config::GpsConfig, error::Result};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

/// Header written once at the top of each fix log session
pub const LOG_HEADER: &str = "UTC Time, Latitude, Longitude, Altitude, Satellites, GPS Fix";

/// Something that accepts one text line at a time
pub trait RecordSink: Send {
    fn append(&mut self, line: &str) -> io::Result<()>;
}

/// File sink in append mode. The file is created on the first write.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        Ok(self.file.insert(file))
    }
}

impl RecordSink for FileSink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        let file = self.file()?;
        file.write_all(format!("{}\n", line).as_bytes())?;
        file.flush()
    }
}

/// In-memory sink; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
        Ok(())
    }
}

/// Destinations the ingest loop writes to besides the fix state
#[derive(Default)]
pub struct Sinks {
    /// One record per accepted fix, when logging is enabled
    pub fix_log: Option<Box<dyn RecordSink>>,
    /// Sentences without a checksum separator
    pub error_log: Option<Box<dyn RecordSink>>,
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fix_log(mut self, sink: impl RecordSink + 'static) -> Self {
        self.fix_log = Some(Box::new(sink));
        self
    }

    pub fn with_error_log(mut self, sink: impl RecordSink + 'static) -> Self {
        self.error_log = Some(Box::new(sink));
        self
    }

    /// Open the file sinks named by the configuration. When logging is
    /// enabled the header line is written immediately.
    pub fn from_config(config: &GpsConfig) -> Result<Self> {
        let mut sinks = Self::new().with_error_log(FileSink::new(&config.error_log_file));

        if config.log_enabled {
            let mut fix_log = FileSink::new(config.resolved_log_file());
            fix_log.append(LOG_HEADER)?;
            log::info!("Logging fixes to {}", fix_log.path().display());
            sinks = sinks.with_fix_log(fix_log);
        }

        Ok(sinks)
    }
}

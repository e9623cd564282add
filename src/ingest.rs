// src/ingest.rs
//! Background ingest loop: transport -> checksum -> parser -> fix state

use crate::{
    config::GpsConfig,
    error::{GpsError, Result},
    gps::{
        checksum,
        nmea::{self, ParseOutcome},
        Fix, FixState,
    },
    sink::Sinks,
};
use log::{debug, error, info, warn};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt},
    task::JoinHandle,
    time::{sleep, timeout},
};

/// Longest pending line kept while waiting for a terminator. NMEA caps a
/// sentence at 82 characters.
pub const MAX_LINE_BYTES: usize = 512;

/// Handle to a running ingest task
pub struct IngestHandle {
    state: FixState,
    running: Arc<AtomicBool>,
    task: JoinHandle<Result<()>>,
}

impl IngestHandle {
    /// Shared view of the latest fix
    pub fn state(&self) -> FixState {
        self.state.clone()
    }

    /// Ask the loop to stop before its next transport read
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Check if the ingest task is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed) && !self.task.is_finished()
    }

    /// Wait for the task to end. A transport fault is returned here.
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| GpsError::Other(format!("Ingest task failed: {}", e)))?
    }
}

/// Start ingesting fixes from `transport` on a new tokio task.
///
/// Must be called from within a tokio runtime.
pub fn start<R>(transport: R, config: &GpsConfig, sinks: Sinks) -> IngestHandle
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let state = FixState::new();
    let running = Arc::new(AtomicBool::new(true));

    let mut ingest = IngestLoop {
        transport,
        state: state.clone(),
        running: Arc::clone(&running),
        sinks,
        read_timeout: config.read_timeout(),
        poll_interval: config.poll_interval(),
        log_enabled: config.log_enabled,
    };

    let task = tokio::spawn(async move {
        let result = ingest.run().await;
        ingest.running.store(false, Ordering::Relaxed);
        result
    });

    IngestHandle {
        state,
        running,
        task,
    }
}

struct IngestLoop<R> {
    transport: R,
    state: FixState,
    running: Arc<AtomicBool>,
    sinks: Sinks,
    read_timeout: Duration,
    poll_interval: Duration,
    log_enabled: bool,
}

impl<R> IngestLoop<R>
where
    R: AsyncBufRead + Unpin,
{
    async fn run(&mut self) -> Result<()> {
        let mut buf = Vec::new();

        while self.running.load(Ordering::Relaxed) {
            // Bytes read before a timeout stay in `buf` and the next read
            // continues the same line, up to MAX_LINE_BYTES.
            let limit = (MAX_LINE_BYTES - buf.len()) as u64;
            let read = timeout(
                self.read_timeout,
                (&mut self.transport).take(limit).read_until(b'\n', &mut buf),
            )
            .await;

            match read {
                Err(_) => {
                    sleep(self.poll_interval).await;
                }
                Ok(Err(e)) => {
                    error!("Error reading from GPS transport: {}", e);
                    return Err(GpsError::Transport(e));
                }
                Ok(Ok(0)) => {
                    // EOF; flush a trailing line without a newline
                    if !buf.is_empty() {
                        self.handle_line(&buf)?;
                    }
                    info!("GPS transport reached end of stream");
                    break;
                }
                Ok(Ok(_)) if buf.len() >= MAX_LINE_BYTES && !buf.ends_with(b"\n") => {
                    debug!("Dropping {} bytes without a line terminator", buf.len());
                    buf.clear();
                }
                Ok(Ok(_)) => {
                    let idle = buf.iter().all(u8::is_ascii_whitespace);
                    self.handle_line(&buf)?;
                    buf.clear();
                    if idle {
                        sleep(self.poll_interval).await;
                    }
                }
            }
        }

        Ok(())
    }

    /// Process one raw line. Sentence-level errors are absorbed here;
    /// anything else ends the loop.
    fn handle_line(&mut self, raw: &[u8]) -> Result<()> {
        match self.ingest_line(raw) {
            Ok(Some(fix)) => {
                if fix.has_fix && self.log_enabled {
                    self.log_fix(&fix);
                }
            }
            Ok(None) => {}
            Err(GpsError::MalformedSentence(sentence)) => {
                debug!("Malformed sentence: {}", sentence);
                self.record_error(&sentence);
            }
            Err(e) if e.is_recoverable() => debug!("Dropped sentence: {}", e),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Returns the new fix when the line replaced the published one
    fn ingest_line(&self, raw: &[u8]) -> Result<Option<Fix>> {
        let line = decode_line(raw)?;
        if !nmea::is_fix_sentence(line) {
            return Ok(None);
        }

        checksum::verify(line)?;

        match nmea::parse_fix(line)? {
            ParseOutcome::Updated(fix) => {
                debug!("Parsed fix: {:?}", fix);
                self.state.set(fix.clone());
                Ok(Some(fix))
            }
            ParseOutcome::NoUpdate => {
                debug!("No time in fix sentence yet, keeping previous fix");
                Ok(None)
            }
        }
    }

    fn log_fix(&mut self, fix: &Fix) {
        if let Some(sink) = self.sinks.fix_log.as_mut() {
            if let Err(e) = sink.append(&fix.to_record()) {
                warn!("Failed to write fix log: {}", e);
            }
        }
    }

    fn record_error(&mut self, sentence: &str) {
        let line = format!("{},{}", self.state.get().format_time(), sentence);
        if let Some(sink) = self.sinks.error_log.as_mut() {
            if let Err(e) = sink.append(&line) {
                warn!("Failed to write error log: {}", e);
            }
        }
    }
}

/// Raw bytes to a trimmed line of text
fn decode_line(raw: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(raw)?.trim())
}

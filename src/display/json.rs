// src/display/json.rs
//! Line-delimited JSON output of the current fix

use super::Refresh;
use crate::{error::Result, gps::Fix, ingest::IngestHandle};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    #[serde(flatten)]
    fix: &'a Fix,
    updated_at: Option<DateTime<Utc>>,
}

/// Format one snapshot as a single JSON line
pub fn snapshot_line(fix: &Fix, updated_at: Option<DateTime<Utc>>) -> Result<String> {
    Ok(serde_json::to_string(&Snapshot { fix, updated_at })?)
}

pub struct JsonDisplay;

impl JsonDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Print one JSON line per second until Ctrl+C or the ingest task ends
    pub async fn run(&self, handle: &IngestHandle) -> Result<()> {
        let mut stdout = io::stdout();
        let mut refresh = Refresh::new();

        while handle.is_running() {
            let state = handle.state();
            writeln!(stdout, "{}", snapshot_line(&state.get(), state.last_updated())?)?;
            stdout.flush()?;

            if !refresh.tick().await {
                break;
            }
        }
        Ok(())
    }
}

impl Default for JsonDisplay {
    fn default() -> Self {
        Self::new()
    }
}

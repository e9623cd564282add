// src/display/mod.rs
//! Display modules that poll the published fix

pub mod json;
pub mod terminal;

use std::{future::Future, pin::Pin, time::Duration};
use tokio::time::sleep;

/// How often displays poll the fix state
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Display cadence with Ctrl+C handling
pub(crate) struct Refresh {
    ctrl_c: Pin<Box<dyn Future<Output = std::io::Result<()>>>>,
}

impl Refresh {
    pub(crate) fn new() -> Self {
        Self {
            ctrl_c: Box::pin(tokio::signal::ctrl_c()),
        }
    }

    /// Wait for the next frame; `false` once Ctrl+C was pressed
    pub(crate) async fn tick(&mut self) -> bool {
        tokio::select! {
            _ = sleep(REFRESH_INTERVAL) => true,
            _ = &mut self.ctrl_c => false,
        }
    }
}

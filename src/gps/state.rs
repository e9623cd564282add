// src/gps/state.rs
//! Shared "latest fix" state

use super::data::Fix;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Published {
    fix: Fix,
    updated_at: Option<DateTime<Utc>>,
}

/// Thread-safe holder of the most recent fix.
///
/// Cloning is cheap and shares the underlying state. Readers always get a
/// complete snapshot because `set` replaces the whole value under one write
/// lock.
#[derive(Debug, Clone, Default)]
pub struct FixState {
    inner: Arc<RwLock<Published>>,
}

impl FixState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current fix
    pub fn get(&self) -> Fix {
        self.read().fix.clone()
    }

    /// Atomically replace the current fix
    pub fn set(&self, fix: Fix) {
        let mut guard = self.write();
        guard.fix = fix;
        guard.updated_at = Some(Utc::now());
    }

    /// When the fix was last replaced, `None` before the first update
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.read().updated_at
    }

    /// Get the age of the fix in seconds
    pub fn age_seconds(&self) -> Option<i64> {
        self.last_updated()
            .map(|ts| Utc::now().signed_duration_since(ts).num_seconds())
    }

    /// Check if the fix is recent (within 10 seconds)
    pub fn is_recent(&self) -> bool {
        self.age_seconds().map_or(false, |age| age < 10)
    }

    // The fix is only ever swapped whole, so a poisoned lock still holds a
    // complete value.
    fn read(&self) -> RwLockReadGuard<'_, Published> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Published> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

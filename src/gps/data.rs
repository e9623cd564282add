// src/gps/data.rs
//! GPS fix data structures and utilities

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in signed decimal degrees (positive = N/E)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// The latest decoded GGA fix.
///
/// A `Fix` is an immutable snapshot: the ingest loop builds a complete new
/// value for every accepted sentence and swaps it in wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fix {
    /// UTC time of day, `None` until the first valid sentence
    pub time: Option<NaiveTime>,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above mean sea level, zero when the receiver omits it
    pub altitude: f64,
    pub satellites: u32,
    /// Raw GGA quality indicator (0 = no fix)
    pub quality: u32,
    pub has_fix: bool,
}

impl Fix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Get fix type description
    pub fn fix_description(&self) -> String {
        match self.quality {
            0 => "No fix".to_string(),
            1 => "GPS".to_string(),
            2 => "DGPS".to_string(),
            3 => "PPS".to_string(),
            4 => "RTK".to_string(),
            5 => "Float RTK".to_string(),
            6 => "Estimated".to_string(),
            7 => "Manual".to_string(),
            8 => "Simulation".to_string(),
            q => format!("Unknown ({})", q),
        }
    }

    /// Format the time of day, or a placeholder before the first fix
    pub fn format_time(&self) -> String {
        match self.time {
            Some(t) => t.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        }
    }

    /// One log line: `time,latitude,longitude,altitude,satellites`
    pub fn to_record(&self) -> String {
        [
            self.format_time(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            self.altitude.to_string(),
            self.satellites.to_string(),
        ]
        .join(",")
    }
}

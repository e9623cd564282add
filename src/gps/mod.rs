// src/gps/mod.rs
//! GGA fix decoding and shared fix state

pub mod checksum;
pub mod data;
pub mod distance;
pub mod nmea;
pub mod state;

pub use data::{Coordinate, Fix};
pub use state::FixState;

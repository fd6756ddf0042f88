// src/lib.rs
//! GPS Tracker Library
//!
//! Reads NMEA sentences from a GPS receiver over a serial line, feeds them to
//! a sentence decoder byte by byte, and reports position fixes on a debug
//! console.

pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod ingest;

// Re-export main types for convenience
pub use config::TrackerConfig;
pub use display::{ConsoleFormat, DebugConsole};
pub use error::{Result, TrackerError};
pub use gps::{FixReading, NmeaDecoder, SentenceDecoder};
pub use ingest::{LoopState, Tracker};

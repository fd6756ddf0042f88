// src/gps/mod.rs
//! GPS sentence decoding and fix readings

pub mod data;
pub mod decoder;

pub use data::FixReading;
pub use decoder::{NmeaDecoder, SentenceDecoder};

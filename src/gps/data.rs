// src/gps/data.rs
//! Fix readings reported to the debug console

use super::decoder::SentenceDecoder;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of the decoder taken when a fix is reported.
///
/// Readings are transient: a new one is built for every report and the
/// previous one is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixReading {
    pub fix_count: u32,
    pub latitude: f64,   // degrees, south negative
    pub longitude: f64,  // degrees, west negative
    pub altitude: f64,   // meters above mean sea level
    pub received_at: DateTime<Utc>,
}

impl FixReading {
    /// Build a reading from the decoder's current values.
    ///
    /// Values the decoder never saw are reported as `0.0`, e.g. altitude
    /// after an RMC-only fix.
    pub fn from_decoder<D: SentenceDecoder + ?Sized>(decoder: &D) -> Self {
        let (latitude, longitude) = decoder.location().unwrap_or_default();
        Self {
            fix_count: decoder.sentences_with_fix(),
            latitude,
            longitude,
            altitude: decoder.altitude().unwrap_or_default(),
            received_at: Utc::now(),
        }
    }

    /// Format a coordinate the way the console prints it
    pub fn format_degrees(value: f64) -> String {
        format!("{:.6}", value)
    }

    /// Format an altitude the way the console prints it
    pub fn format_meters(value: f64) -> String {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDecoder {
        location: Option<(f64, f64)>,
        altitude: Option<f64>,
    }

    impl SentenceDecoder for FixedDecoder {
        fn encode(&mut self, _byte: u8) -> bool {
            false
        }

        fn sentences_with_fix(&self) -> u32 {
            3
        }

        fn location(&self) -> Option<(f64, f64)> {
            self.location
        }

        fn altitude(&self) -> Option<f64> {
            self.altitude
        }

        fn last_sentence(&self) -> &str {
            ""
        }
    }

    #[test]
    fn test_reading_copies_decoder_values() {
        let decoder = FixedDecoder {
            location: Some((29.951065, -90.071533)),
            altitude: Some(3.2),
        };
        let reading = FixReading::from_decoder(&decoder);

        assert_eq!(reading.fix_count, 3);
        assert_eq!(reading.latitude, 29.951065);
        assert_eq!(reading.longitude, -90.071533);
        assert_eq!(reading.altitude, 3.2);
    }

    #[test]
    fn test_missing_values_default_to_zero() {
        let decoder = FixedDecoder {
            location: Some((48.1173, 11.516666)),
            altitude: None,
        };
        let reading = FixReading::from_decoder(&decoder);

        assert_eq!(reading.altitude, 0.0);
        assert_eq!(FixReading::format_meters(reading.altitude), "0.000000");
    }

    #[test]
    fn test_six_decimal_formatting() {
        assert_eq!(FixReading::format_degrees(-90.07153333), "-90.071533");
        assert_eq!(FixReading::format_degrees(29.9510650001), "29.951065");
        assert_eq!(FixReading::format_meters(3.2), "3.200000");
    }
}

// src/display/console.rs
//! Debug console output

use crate::{
    error::Result,
    gps::FixReading,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How fix reports are written to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    /// Raw sentence echo plus the four-line fix block
    #[default]
    Text,
    /// One JSON object per fix, no sentence echo
    Json,
}

/// Line-oriented debug console over any byte sink (stdout, a serial port).
pub struct DebugConsole<W: Write> {
    out: W,
    format: ConsoleFormat,
}

impl<W: Write> DebugConsole<W> {
    pub fn new(out: W, format: ConsoleFormat) -> Self {
        Self { out, format }
    }

    /// Echo the raw text of a decoded sentence
    pub fn echo_sentence(&mut self, sentence: &str) -> Result<()> {
        if self.format == ConsoleFormat::Json {
            return Ok(());
        }
        writeln!(self.out, "{}", sentence)?;
        self.out.flush()?;
        Ok(())
    }

    /// Write a fix report
    pub fn report_fix(&mut self, reading: &FixReading) -> Result<()> {
        match self.format {
            ConsoleFormat::Text => {
                writeln!(self.out, "HAS FIX={}", reading.fix_count)?;
                writeln!(self.out, "LAT={}", FixReading::format_degrees(reading.latitude))?;
                writeln!(self.out, "LONG={}", FixReading::format_degrees(reading.longitude))?;
                writeln!(self.out, "ALT={}", FixReading::format_meters(reading.altitude))?;
            }
            ConsoleFormat::Json => {
                serde_json::to_writer(&mut self.out, reading)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

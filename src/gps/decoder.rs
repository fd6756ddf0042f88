// src/gps/decoder.rs
//! Byte-at-a-time NMEA sentence decoding
//!
//! The tracker never parses NMEA itself. It talks to a [`SentenceDecoder`],
//! and the production implementation hands every byte to the `nmea0183`
//! parser.

use log::debug;
use nmea0183::{ParseResult, Parser};

/// Longest raw sentence kept for echoing. NMEA caps sentences at 82 bytes.
const MAX_SENTENCE_LEN: usize = 128;

/// Incremental sentence decoder fed one byte at a time.
pub trait SentenceDecoder {
    /// Feed one byte. Returns true when it completes a valid sentence.
    fn encode(&mut self, byte: u8) -> bool;

    /// Number of fix-bearing sentences decoded so far
    fn sentences_with_fix(&self) -> u32;

    /// Last known (latitude, longitude) in degrees
    fn location(&self) -> Option<(f64, f64)>;

    /// Last known altitude in meters
    fn altitude(&self) -> Option<f64>;

    /// Raw text of the last completed sentence, without line terminator
    fn last_sentence(&self) -> &str;
}

/// [`SentenceDecoder`] backed by `nmea0183::Parser`.
///
/// GGA sentences with a fix and RMC sentences with an active status count as
/// fix-bearing. Checksum failures and unsupported sentences are counted and
/// dropped.
pub struct NmeaDecoder {
    parser: Parser,
    fix_count: u32,
    rejected: u32,
    location: Option<(f64, f64)>,
    altitude: Option<f64>,
    pending: String,
    capturing: bool,
    in_sentence: bool,
    last_sentence: String,
}

impl NmeaDecoder {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            fix_count: 0,
            rejected: 0,
            location: None,
            altitude: None,
            pending: String::with_capacity(MAX_SENTENCE_LEN),
            capturing: false,
            in_sentence: false,
            last_sentence: String::new(),
        }
    }

    /// Number of sentences the parser rejected
    pub fn rejected_sentences(&self) -> u32 {
        self.rejected
    }

    /// Every `$` starts a new sentence. The parser does not resync on its
    /// own once a sentence lost its checksum, so it is replaced.
    fn resync(&mut self) {
        if self.in_sentence {
            self.rejected += 1;
            debug!("Dropped unterminated NMEA sentence {:?}", self.pending);
            self.parser = Parser::new();
        }
        self.in_sentence = true;
    }

    fn capture(&mut self, byte: u8) {
        match byte {
            b'$' => {
                self.pending.clear();
                self.pending.push('$');
                self.capturing = true;
            }
            b'\r' | b'\n' => self.capturing = false,
            _ if self.capturing => {
                if self.pending.len() < MAX_SENTENCE_LEN && byte.is_ascii() {
                    self.pending.push(byte as char);
                } else {
                    self.capturing = false;
                }
            }
            _ => {}
        }
    }

    fn record(&mut self, result: ParseResult) {
        match result {
            ParseResult::GGA(Some(gga)) => {
                self.fix_count += 1;
                self.location = Some((gga.latitude.as_f64(), gga.longitude.as_f64()));
                self.altitude = Some(gga.altitude.meters as f64);
            }
            ParseResult::RMC(Some(rmc)) => {
                self.fix_count += 1;
                self.location = Some((rmc.latitude.as_f64(), rmc.longitude.as_f64()));
            }
            // Sentences without a fix or without position data
            _ => {}
        }
    }
}

impl Default for NmeaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceDecoder for NmeaDecoder {
    fn encode(&mut self, byte: u8) -> bool {
        if byte == b'$' {
            self.resync();
        }
        self.capture(byte);

        match self.parser.parse_from_byte(byte) {
            None => false,
            Some(Ok(result)) => {
                self.in_sentence = false;
                self.record(result);
                self.last_sentence = std::mem::take(&mut self.pending);
                true
            }
            Some(Err(reason)) => {
                self.in_sentence = false;
                self.rejected += 1;
                debug!("Dropped NMEA sentence {:?}: {}", self.pending, reason);
                self.pending.clear();
                false
            }
        }
    }

    fn sentences_with_fix(&self) -> u32 {
        self.fix_count
    }

    fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    fn last_sentence(&self) -> &str {
        &self.last_sentence
    }
}

// src/ingest.rs
//! Serial ingest loop: bytes in, fix reports out

use crate::{
    display::DebugConsole,
    error::{Result, TrackerError},
    gps::{FixReading, SentenceDecoder},
};
use log::{debug, error, info, warn};
use std::{
    io::{ErrorKind, Write},
    time::Duration,
};
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Where the loop is between bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Reading and decoding bytes
    AwaitingBytes,
    /// A fix was just reported; ingestion is paused
    FixReported,
}

/// Feeds GPS bytes to a decoder and reports fixes on a debug console.
///
/// Everything runs on one task. The pause after a report is a plain sleep
/// inside the loop, so nothing is read from the source while it lasts; the
/// serial driver buffers what arrives in the meantime and drops whatever
/// overflows its buffer.
pub struct Tracker<D: SentenceDecoder, W: Write> {
    decoder: D,
    console: DebugConsole<W>,
    report_interval: Duration,
    state: LoopState,
}

impl<D: SentenceDecoder, W: Write> Tracker<D, W> {
    pub fn new(decoder: D, console: DebugConsole<W>, report_interval: Duration) -> Self {
        Self {
            decoder,
            console,
            report_interval,
            state: LoopState::AwaitingBytes,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Run until the source reaches end of stream.
    ///
    /// A serial port never does, so in practice this runs until the caller
    /// drops the future.
    pub async fn run<R: AsyncRead + Unpin>(&mut self, source: R) -> Result<()> {
        let mut reader = BufReader::new(source);
        info!("Listening for NMEA sentences");

        loop {
            let byte = match reader.read_u8().await {
                Ok(byte) => byte,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    info!("GPS input closed after {} fix sentences", self.decoder.sentences_with_fix());
                    return Ok(());
                }
                Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    continue;
                }
                Err(e) => {
                    error!("Error reading from GPS input: {}", e);
                    return Err(TrackerError::Io(e));
                }
            };

            self.ingest_byte(byte).await?;
        }
    }

    /// Feed one byte; reports and pauses if it completed a sentence after a fix.
    pub async fn ingest_byte(&mut self, byte: u8) -> Result<()> {
        if !self.decoder.encode(byte) {
            return Ok(());
        }

        self.console.echo_sentence(self.decoder.last_sentence())?;

        if self.decoder.sentences_with_fix() == 0 {
            return Ok(());
        }

        let reading = FixReading::from_decoder(&self.decoder);
        debug!(
            "Fix {} at {:.6}, {:.6} ({:.1} m)",
            reading.fix_count, reading.latitude, reading.longitude, reading.altitude
        );

        self.state = LoopState::FixReported;
        self.console.report_fix(&reading)?;
        tokio::time::sleep(self.report_interval).await;
        self.state = LoopState::AwaitingBytes;

        Ok(())
    }
}

/// Open the GPS receiver's serial port
pub fn open_gps_port(port: &str, baudrate: u32) -> Result<SerialStream> {
    info!("Connecting to GPS on {} at {} baud...", port, baudrate);

    let serial = tokio_serial::new(port, baudrate)
        .timeout(Duration::from_millis(1000))
        .open_native_async()
        .map_err(|e| TrackerError::Connection(format!("Failed to open serial port {}: {}", port, e)))?;

    info!("Connected successfully!");
    Ok(serial)
}

/// Open a serial port for the debug console
pub fn open_debug_port(port: &str, baudrate: u32) -> Result<Box<dyn tokio_serial::SerialPort>> {
    info!("Writing debug console to {} at {} baud", port, baudrate);

    tokio_serial::new(port, baudrate)
        .timeout(Duration::from_millis(1000))
        .open()
        .map_err(|e| TrackerError::Connection(format!("Failed to open debug port {}: {}", port, e)))
}

/// List available serial ports
pub fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| TrackerError::Connection(format!("Failed to list serial ports: {}", e)))?;

    if ports.is_empty() {
        warn!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}

// src/main.rs
//! GPS Tracker - reports serial GPS fixes on a debug console

use anyhow::{anyhow, Context};
use clap::Parser;
use gps_tracker::{
    ingest::{list_serial_ports, open_debug_port, open_gps_port},
    ConsoleFormat, DebugConsole, NmeaDecoder, Tracker, TrackerConfig,
};
use log::{info, warn};
use std::{io::Write, path::PathBuf};
use tokio::io::AsyncRead;

#[derive(Parser, Debug)]
#[command(name = "gps-tracker", version, about = "Report GPS fixes from an NMEA serial receiver")]
struct Args {
    /// GPS serial port (e.g. /dev/ttyUSB0, COM3)
    #[arg(short, long)]
    port: Option<String>,

    /// GPS baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Serial port for the debug console instead of stdout
    #[arg(long)]
    debug_port: Option<String>,

    /// Debug console baud rate
    #[arg(long)]
    debug_baud: Option<u32>,

    /// Read a recorded NMEA capture instead of a serial port
    #[arg(long, conflicts_with = "port")]
    replay: Option<PathBuf>,

    /// Seconds to pause after each fix report
    #[arg(long)]
    interval: Option<u64>,

    /// Print fixes as JSON lines
    #[arg(long)]
    json: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Save the effective settings as the new defaults
    #[arg(long)]
    save_config: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Command line flags override the stored configuration
    fn apply(&self, config: &mut TrackerConfig) {
        if let Some(port) = &self.port {
            config.gps_port = Some(port.clone());
        }
        if let Some(baud) = self.baud {
            config.gps_baudrate = baud;
        }
        if let Some(port) = &self.debug_port {
            config.debug_port = Some(port.clone());
        }
        if let Some(baud) = self.debug_baud {
            config.debug_baudrate = baud;
        }
        if let Some(secs) = self.interval {
            config.report_interval_secs = secs;
        }
        if self.json {
            config.format = ConsoleFormat::Json;
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_ports {
        list_serial_ports()?;
        return Ok(());
    }

    let mut config = TrackerConfig::load().unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        TrackerConfig::default()
    });
    args.apply(&mut config);
    config.validate()?;

    if args.save_config {
        config.save()?;
        info!("Saved configuration to {}", TrackerConfig::config_path()?.display());
    }

    let console_out: Box<dyn Write + Send> = match &config.debug_port {
        Some(port) => Box::new(open_debug_port(port, config.debug_baudrate)?),
        None => Box::new(std::io::stdout()),
    };
    let console = DebugConsole::new(console_out, config.format);
    let mut tracker = Tracker::new(NmeaDecoder::new(), console, config.report_interval());

    let source: Box<dyn AsyncRead + Unpin> = match (&args.replay, &config.gps_port) {
        (Some(path), _) => {
            info!("Replaying NMEA capture {}", path.display());
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(file)
        }
        (None, Some(port)) => Box::new(open_gps_port(port, config.gps_baudrate)?),
        (None, None) => {
            return Err(anyhow!("No GPS port configured; pass --port, --replay, or run --list-ports"));
        }
    };

    tokio::select! {
        result = tracker.run(source) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down..."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "gps-tracker", "--port", "/dev/ttyUSB0", "--baud", "4800", "--interval", "2", "--json",
        ]);
        let mut config = TrackerConfig::default();
        config.debug_port = Some("/dev/ttyUSB1".to_string());
        args.apply(&mut config);

        assert_eq!(config.gps_port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.gps_baudrate, 4800);
        assert_eq!(config.report_interval_secs, 2);
        assert_eq!(config.format, ConsoleFormat::Json);
        assert_eq!(config.debug_port.as_deref(), Some("/dev/ttyUSB1"));
        assert_eq!(config.debug_baudrate, 9600);
    }

    #[test]
    fn test_replay_conflicts_with_port() {
        let result = Args::try_parse_from(["gps-tracker", "--port", "/dev/ttyUSB0", "--replay", "capture.nmea"]);
        assert!(result.is_err());
    }
}

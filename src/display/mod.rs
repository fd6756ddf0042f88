// src/display/mod.rs
//! Output for fix reports

pub mod console;

pub use console::{ConsoleFormat, DebugConsole};

//! Logger module
//!
//! Provides logging utilities for the employee server including:
//! - Server lifecycle logging
//! - Access logging in several formats
//! - Store mutation logging
//! - Error and warning logging, optionally to files
//!
//! Info, warning and error lines are filtered by `logging.level`.

mod format;
mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::Level;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let max_level: Level = config.logging.level.parse()?;
    level::init(max_level);
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Write to info/access log
fn write_info(message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

/// Access lines carry their own timestamp
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Employee server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {:?}", level::max_level()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("Max connections: {max}"));
    }
    write_info(&format!("Max body size: {} bytes", config.http.max_body_size));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_info(message: &str) {
    if !level::enabled(Level::Info) {
        return;
    }
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if !level::enabled(Level::Info) {
        return;
    }
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    if !level::enabled(Level::Error) {
        return;
    }
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    if !level::enabled(Level::Error) {
        return;
    }
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    if !level::enabled(Level::Warn) {
        return;
    }
    write_error(&format!("[WARN] {message}"));
}

/// Record a change to the employee collection
pub fn log_store_change(action: &str, id: i32, remaining: usize) {
    if !level::enabled(Level::Info) {
        return;
    }
    write_info(&format!("[Store] {action} employee {id} ({remaining} records)"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    if !level::enabled(Level::Info) {
        return;
    }
    write_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still finishing"
    ));
}

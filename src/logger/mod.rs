//! Logger module
//!
//! Provides logging utilities for the router including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Upstream (static host / completion API) logging
//! - Error, warning and debug logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        &config.logging.level,
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn debug_enabled() -> bool {
    writer::get().is_some_and(writer::LogWriter::debug_enabled)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Edge router started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!("API prefix: {}", config.gateway.api_prefix));
    write_info(&format!(
        "Static site: {}://{}",
        config.site.static_scheme, config.site.static_domain
    ));
    write_info(&format!("Completion endpoint: {}", config.completion.endpoint));
    write_info(&format!("Completion model: {}", config.completion.model));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if debug_enabled() {
        write_info(&format!("[Connection] Accepted from: {peer_addr}"));
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if debug_enabled() {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_forward(method: &hyper::Method, target: &str) {
    log_debug(&format!("[Forward] {method} {target}"));
}

pub fn log_forward_failed(target: &str, err: &impl std::fmt::Display) {
    log_error(&format!("[Forward] {target} failed: {err}"));
}

pub fn log_gateway_operation(operation: &str, detail: &str) {
    log_debug(&format!("[Gateway] {operation}: {detail}"));
}

pub fn log_completion_failed(status: u16, body: &str) {
    log_error(&format!("[Completion] Upstream returned {status}: {body}"));
}

/// Log the first characters of a completion answer
pub fn log_completion(content: &str) {
    if debug_enabled() {
        let preview: String = content.chars().take(50).collect();
        write_info(&format!("[Completion] {preview}..."));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(format)),
        None => println!("{}", entry.format(format)),
    }
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Stopped accepting, {active_connections} connection(s) still active"
    ));
}

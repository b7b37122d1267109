//! Log writer module
//!
//! Process-wide sink for access and error lines, backed by files or stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
    debug: bool,
}

impl LogWriter {
    fn new(
        access_log_file: Option<&str>,
        error_log_file: Option<&str>,
        level: &str,
    ) -> io::Result<Self> {
        Ok(Self {
            access: LogTarget::open(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(error_log_file, LogTarget::Stderr)?,
            debug: level.eq_ignore_ascii_case("debug") || level.eq_ignore_ascii_case("trace"),
        })
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }

    /// Write info message (to access log target)
    pub fn write_info(&self, message: &str) {
        self.access.write_line(message);
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        self.error.write_line(message);
    }

    pub const fn debug_enabled(&self) -> bool {
        self.debug
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if log files cannot be opened.
pub fn init(
    access_log_file: Option<&str>,
    error_log_file: Option<&str>,
    level: &str,
) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file, level)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has been called
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target_appends_lines() {
        let dir = std::env::temp_dir().join(format!("edge_router_log_{}", std::process::id()));
        let path = dir.join("nested").join("access.log");
        let path_str = path.to_str().unwrap();

        let writer = LogWriter::new(Some(path_str), None, "info").unwrap();
        writer.write_access("first");
        writer.write_info("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
        assert!(!writer.debug_enabled());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_debug_level() {
        assert!(LogWriter::new(None, None, "DEBUG").unwrap().debug_enabled());
        assert!(!LogWriter::new(None, None, "warn").unwrap().debug_enabled());
    }
}

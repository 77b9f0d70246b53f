//! The logger: level filtering, line formatting, and sink dispatch

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use sinklog_core::constants::{FATAL_EXIT_CODE, LINE_TIMESTAMP_FORMAT};
use sinklog_core::{LoggerConfig, LoggerSettings, OutputMethod, Result, Severity};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

use crate::caller::{CallSite, CallerInfo};
use crate::diag;
use crate::sink::FileSink;

/// Payload of the unwind started by [`Logger::panic`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedPanic {
    pub message: String,
}

impl fmt::Display for LoggedPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

enum Output {
    Console(Mutex<Box<dyn Write + Send>>),
    File { main: FileSink, error: FileSink },
}

/// Leveled logger writing to the console or to a main/error file pair.
///
/// Every logging method takes the [`CallerInfo`] of the line it attributes
/// to; the `log_*!` macros capture it at the call. The file sinks lock around their
/// check-rotate-write sequence, so a `Logger` may be shared across threads.
/// Separate processes writing the same files are not coordinated.
pub struct Logger {
    settings: LoggerSettings,
    output: Output,
}

impl Logger {
    /// Build a logger from raw construction arguments.
    ///
    /// `directory`, `file_name`, and `max_file_size` are only used when
    /// `method` is `"file"`.
    pub fn new(
        method: &str,
        level: &str,
        directory: impl AsRef<Path>,
        file_name: &str,
        max_file_size: u64,
    ) -> Result<Self> {
        let settings = LoggerSettings::new(
            method,
            level,
            directory.as_ref(),
            file_name,
            max_file_size,
        )?;
        Self::from_settings(settings)
    }

    /// Build a logger from a parsed config file
    pub fn from_config(config: LoggerConfig, base_dir: &Path) -> Result<Self> {
        Self::from_settings(config.into_settings(base_dir)?)
    }

    /// Build a logger from validated settings, creating the log directory
    /// and opening both files in file mode.
    pub fn from_settings(settings: LoggerSettings) -> Result<Self> {
        let output = match settings.method {
            OutputMethod::Console => Output::Console(Mutex::new(Box::new(io::stdout()))),
            OutputMethod::File => {
                crate::ensure_log_dir(&settings.directory)?;
                let main = FileSink::open(settings.main_log_path(), settings.max_file_size)?;
                let error = FileSink::open(settings.error_log_path(), settings.max_file_size)?;
                Output::File { main, error }
            }
        };

        debug!(
            "Logger ready: method={} threshold={}",
            settings.method, settings.threshold
        );

        Ok(Self { settings, output })
    }

    /// Console logger writing to `writer` instead of stdout
    pub fn console_with_writer<W>(threshold: Severity, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            settings: LoggerSettings::console(threshold),
            output: Output::Console(Mutex::new(Box::new(writer))),
        }
    }

    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    pub fn threshold(&self) -> Severity {
        self.settings.threshold
    }

    pub fn method(&self) -> OutputMethod {
        self.settings.method
    }

    /// Main log sink (file mode only)
    pub fn main_sink(&self) -> Option<&FileSink> {
        match &self.output {
            Output::File { main, .. } => Some(main),
            Output::Console(_) => None,
        }
    }

    /// Error-only log sink (file mode only)
    pub fn error_sink(&self) -> Option<&FileSink> {
        match &self.output {
            Output::File { error, .. } => Some(error),
            Output::Console(_) => None,
        }
    }

    /// Whether a message at `severity` would be written
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.settings.threshold
    }

    pub fn debug(&self, caller: CallerInfo, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, caller, args);
    }

    pub fn trace(&self, caller: CallerInfo, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, caller, args);
    }

    pub fn info(&self, caller: CallerInfo, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, caller, args);
    }

    pub fn warn(&self, caller: CallerInfo, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, caller, args);
    }

    pub fn error(&self, caller: CallerInfo, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, caller, args);
    }

    /// Emit one line at `severity`, attributed to `caller`.
    ///
    /// Nothing happens below the threshold, not even caller resolution.
    pub fn log(&self, severity: Severity, caller: CallerInfo, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }

        let site = caller.resolve();
        let line = format_line(severity, Local::now(), &site, args);

        match &self.output {
            Output::Console(writer) => {
                let mut writer = writer.lock();
                let result = writeln!(writer, "{}", line).and_then(|_| writer.flush());
                if let Err(e) = result {
                    diag::report(format_args!("console write failed: {}", e));
                }
            }
            Output::File { main, error } => {
                main.write_line(&line);
                if severity.is_error() {
                    error.write_line(&line);
                }
            }
        }
    }

    /// Log at PANIC, close the sinks, then unwind with a [`LoggedPanic`]
    pub fn panic(&self, caller: CallerInfo, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.log(Severity::Panic, caller, format_args!("{}", message));
        self.close();
        std::panic::panic_any(LoggedPanic { message })
    }

    /// Log at FATAL, close the sinks, then exit the process with status 1
    pub fn fatal(&self, caller: CallerInfo, args: fmt::Arguments<'_>) -> ! {
        self.log(Severity::Fatal, caller, args);
        self.close();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Flush and close the outputs. Safe to call more than once; in file
    /// mode later lines are dropped.
    pub fn close(&self) {
        match &self.output {
            Output::Console(writer) => {
                if let Err(e) = writer.lock().flush() {
                    diag::report(format_args!("console flush failed: {}", e));
                }
            }
            Output::File { main, error } => {
                main.close();
                error.close();
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Format one log line (without the trailing newline):
///
/// `[<SEVERITY>] [<YYYY-MM-DD HH:MM:SS>] [<file> : <function> : <line>] : <message>`
pub fn format_line(
    severity: Severity,
    timestamp: DateTime<Local>,
    site: &CallSite,
    message: fmt::Arguments<'_>,
) -> String {
    format!(
        "[{}] [{}] [{} : {} : {}] : {}",
        severity.as_str(),
        timestamp.format(LINE_TIMESTAMP_FORMAT),
        site.file,
        site.function,
        site.line,
        message
    )
}

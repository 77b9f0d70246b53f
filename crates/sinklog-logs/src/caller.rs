//! Call site attribution for log lines

use sinklog_core::{Error, Result};

use crate::diag;

/// Unresolved call site as captured at the logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerInfo {
    /// Fully qualified function path, as produced by `caller_info!`
    pub function_path: &'static str,
    /// Source path as reported by the compiler
    pub file_path: &'static str,
    pub line: u32,
}

/// Resolved attribution printed in a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallSite {
    pub function: &'static str,
    /// Base name of the source file
    pub file: &'static str,
    pub line: u32,
}

impl CallerInfo {
    pub const fn new(function_path: &'static str, file_path: &'static str, line: u32) -> Self {
        Self {
            function_path,
            file_path,
            line,
        }
    }

    /// Resolve into a printable call site
    pub fn try_resolve(&self) -> Result<CallSite> {
        let function = function_name(self.function_path);
        if function.is_empty() {
            return Err(Error::AttributionUnavailable(format!(
                "no function name for {}:{}",
                self.file_path, self.line
            )));
        }

        if self.line == 0 {
            return Err(Error::AttributionUnavailable(format!(
                "no line number for {:?}",
                self.file_path
            )));
        }

        let file = base_name(self.file_path);
        if file.is_empty() {
            return Err(Error::AttributionUnavailable(format!(
                "no source file name in {:?}",
                self.file_path
            )));
        }

        Ok(CallSite {
            function,
            file,
            line: self.line,
        })
    }

    /// Best-effort resolution: on failure, reports a diagnostic and returns
    /// an empty call site instead of failing the log call.
    pub fn resolve(&self) -> CallSite {
        match self.try_resolve() {
            Ok(site) => site,
            Err(e) => {
                diag::report(format_args!("{}", e));
                CallSite::default()
            }
        }
    }
}

/// Function name without its leading crate qualifier or closure suffixes.
///
/// `app::main` becomes `main`, `app::net::connect::{{closure}}` becomes
/// `net::connect`.
fn function_name(path: &'static str) -> &'static str {
    let mut path = path;
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    match path.split_once("::") {
        Some((_, rest)) => rest,
        None => path,
    }
}

fn base_name(path: &'static str) -> &'static str {
    path.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(path)
}

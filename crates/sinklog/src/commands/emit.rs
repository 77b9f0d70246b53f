//! Emit command implementation

use anyhow::Result;
use sinklog_core::{parse_level, Severity};
use sinklog_logs::{log_at, log_fatal, log_panic, Logger};

use crate::cli::{EmitArgs, GlobalOpts};

pub fn execute(opts: &GlobalOpts, args: EmitArgs) -> Result<()> {
    let severity = parse_level(&args.severity)?;
    let settings = super::resolve_settings(opts)?;
    let logger = Logger::from_settings(settings)?;
    let message = args.message.join(" ");

    match severity {
        Severity::Panic => log_panic!(logger, "{}", message),
        Severity::Fatal => log_fatal!(logger, "{}", message),
        _ => log_at!(logger, severity, "{}", message),
    }

    logger.close();
    Ok(())
}

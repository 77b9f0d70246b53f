//! Tail command implementation

use anyhow::{bail, Result};
use regex::Regex;
use sinklog_core::OutputMethod;
use sinklog_logs::LogReader;

use crate::cli::{GlobalOpts, TailArgs};
use crate::output::{colorize_line, is_json_mode, print_info, print_logs};

pub async fn execute(opts: &GlobalOpts, args: TailArgs) -> Result<()> {
    let settings = super::resolve_settings(opts)?;
    if settings.method != OutputMethod::File {
        bail!(
            "tail needs the file output method (configured method is {})",
            settings.method
        );
    }

    let path = if args.err {
        settings.error_log_path()
    } else {
        settings.main_log_path()
    };

    let grep_regex = match &args.grep {
        Some(pattern) => Some(
            Regex::new(pattern).map_err(|e| anyhow::anyhow!("Invalid regex pattern: {}", e))?,
        ),
        None => None,
    };
    let matches = |line: &str| grep_regex.as_ref().map_or(true, |re| re.is_match(line));

    let reader = LogReader::new(path);
    if !reader.exists() {
        bail!("Log file not found: {}", reader.path().display());
    }

    let lines: Vec<String> = reader
        .tail_across_rotations(args.lines)?
        .into_iter()
        .filter(|line| matches(line.as_str()))
        .collect();
    print_logs(&lines);

    if args.follow {
        if !is_json_mode() {
            print_info(&format!("Following {} (Ctrl-C to stop)", reader.path().display()));
        }
        let mut rx = reader.follow()?;
        loop {
            tokio::select! {
                line = rx.recv() => match line {
                    Some(line) if matches(line.as_str()) => println!("{}", colorize_line(&line)),
                    Some(_) => {}
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    Ok(())
}

//! Terminal and JSON output helpers

use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".cyan(), message);
}

/// Print a labelled value, padded for alignment
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{}:", label).bold(), value);
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

pub fn print_logs(lines: &[String]) {
    if is_json_mode() {
        print_json(&lines);
        return;
    }

    for line in lines {
        println!("{}", colorize_line(line));
    }
}

/// Color the severity tag of a log line
pub fn colorize_line(line: &str) -> String {
    let Some(rest) = line.strip_prefix('[') else {
        return line.to_string();
    };
    let Some((tag, tail)) = rest.split_once(']') else {
        return line.to_string();
    };

    let colored_tag = match tag {
        "DEBUG" | "TRACE" => tag.dimmed(),
        "INFO" => tag.green(),
        "WARN" => tag.yellow(),
        "ERROR" => tag.red(),
        "PANIC" | "FATAL" => tag.red().bold(),
        _ => return line.to_string(),
    };
    format!("[{}]{}", colored_tag, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_keeps_text() {
        colored::control::set_override(false);
        let line = "[WARN] [2024-01-01 00:00:00] [main.rs : main : 3] : careful";
        assert_eq!(colorize_line(line), line);
        assert_eq!(colorize_line("no tag here"), "no tag here");
        assert_eq!(colorize_line("[OTHER] x"), "[OTHER] x");
    }
}

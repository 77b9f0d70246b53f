//! Check command implementation - shows what a logger built from the
//! current settings would do

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sinklog_core::{OutputMethod, Severity};
use sinklog_logs::LogReader;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::output::{is_json_mode, print_field, print_json};

#[derive(Serialize)]
struct CheckOutput {
    method: OutputMethod,
    threshold: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<FilesOutput>,
}

#[derive(Serialize)]
struct FilesOutput {
    directory: PathBuf,
    max_file_size: u64,
    main: FileOutput,
    error: FileOutput,
}

#[derive(Serialize)]
struct FileOutput {
    path: PathBuf,
    exists: bool,
    size: u64,
    backups: Vec<PathBuf>,
}

impl FileOutput {
    fn inspect(path: PathBuf) -> Result<Self> {
        let reader = LogReader::new(path);
        Ok(Self {
            exists: reader.exists(),
            size: reader.size()?,
            backups: reader.backups()?,
            path: reader.path().to_path_buf(),
        })
    }

    fn print(&self, label: &str) {
        let state = if self.exists {
            format!("{} bytes", self.size).green()
        } else {
            "not created yet".yellow()
        };
        print_field(label, format!("{} ({})", self.path.display(), state));
        for backup in &self.backups {
            println!("  {:<14} {}", "", backup.display().to_string().dimmed());
        }
    }
}

pub fn execute(opts: &GlobalOpts) -> Result<()> {
    let settings = super::resolve_settings(opts)?;

    let files = match settings.method {
        OutputMethod::Console => None,
        OutputMethod::File => Some(FilesOutput {
            directory: settings.directory().to_path_buf(),
            max_file_size: settings.max_file_size,
            main: FileOutput::inspect(settings.main_log_path())?,
            error: FileOutput::inspect(settings.error_log_path())?,
        }),
    };

    let output = CheckOutput {
        method: settings.method,
        threshold: settings.threshold,
        files,
    };

    if is_json_mode() {
        print_json(&output);
        return Ok(());
    }

    println!("{}", "sinklog settings".bold());
    print_field("method", output.method);
    print_field("threshold", output.threshold);
    if let Some(files) = &output.files {
        print_field("directory", files.directory.display());
        print_field("max size", format!("{} bytes", files.max_file_size));
        files.main.print("main log");
        files.error.print("error log");
    }

    Ok(())
}

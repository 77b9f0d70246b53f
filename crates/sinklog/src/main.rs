//! sinklog CLI - emit, inspect, and follow rotating log files

use anyhow::Result;
use clap::Parser;
use sinklog_logs::LoggedPanic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_mode(cli.global.json);

    let log_level = match cli.global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "sinklog={0},sinklog_logs={0},sinklog_core={0}",
                    log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    install_panic_hook();

    let result = match cli.command {
        Commands::Emit(args) => emit::execute(&cli.global, args),
        Commands::Tail(args) => tail::execute(&cli.global, args).await,
        Commands::Check => check::execute(&cli.global),
    };

    if let Err(e) = result {
        output::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Print the message of a logged panic instead of an opaque payload
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        match info.payload().downcast_ref::<LoggedPanic>() {
            Some(panic) => eprintln!("panic: {}", panic.message),
            None => default_hook(info),
        }
    }));
}

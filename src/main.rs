//! crcscreen: Colorectal cancer screening risk stratification
//!
//! Main entry point for the command-line tool.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crcscreen::adapters::sanitize::SanitizingMakeWriter;
use crcscreen::cli::{self, CliArgs};
use crcscreen::config::{LogMode, Settings};
use crcscreen::CrcScreenError;

fn main() -> Result<()> {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let settings = Settings::from_env()?;

    // Logs never go to stdout: it carries the report.
    let guard = match settings.log_mode {
        LogMode::Off => None,
        LogMode::Stderr => Some(init_logging(tracing_appender::non_blocking(std::io::stderr()))),
        LogMode::File => {
            if let Some(parent) = settings.log_file.parent() {
                // Best-effort: open() below reports the real failure.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&settings.log_file)?;
            Some(init_logging(tracing_appender::non_blocking(file)))
        }
    };

    tracing::info!("Starting crcscreen...");

    let outcome = cli::run(&args, &settings);
    // Flush pending log lines before any exit.
    drop(guard);

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(CrcScreenError::Screening(e)) => {
            // Recoverable: the caller fixes the named field and retries.
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn init_logging(
    (writer, guard): (
        tracing_appender::non_blocking::NonBlocking,
        tracing_appender::non_blocking::WorkerGuard,
    ),
) -> tracing_appender::non_blocking::WorkerGuard {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();
    guard
}

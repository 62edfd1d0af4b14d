use super::cli::args::Args;
use super::cli::config::{load_config, ConfigError, Settings};
use super::display::{render_json, render_summary};
use super::error::AppError;
use super::import::run_import;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use clap::Parser;

/// Run the command line application, returning the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return 1;
        }
    };

    runtime.block_on(run(args))
}

async fn resolve_settings(args: &Args) -> Result<Settings, ConfigError> {
    let config = load_config(args.config_file.as_deref()).await?;
    args.resolve(config)
}

fn setup_logging(settings: &Settings) -> Result<(), AppError> {
    init_logging(
        Some(&settings.log_level),
        Some(&settings.log_format),
        settings.log_file.as_deref(),
        settings.use_color,
    )
    .map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}

async fn run(args: Args) -> i32 {
    // Logging is not up yet, so configuration errors go straight to stderr
    let settings = match resolve_settings(&args).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e.user_message().unwrap_or_else(|| e.to_string()));
            return 1;
        }
    };

    if let Err(e) = setup_logging(&settings) {
        eprintln!("Error: {}", e.user_message().unwrap_or_else(|| e.to_string()));
        return 1;
    }
    log::info!(
        "moviebatch {} importing {}",
        env!("CARGO_PKG_VERSION"),
        settings.file.display()
    );
    log::debug!("Settings: {:?}", settings);

    let shutdown = ShutdownCoordinator::with_signal_handlers();

    let outcome = match run_import(&settings, &shutdown).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log_error_with_context(&e, "Movie import");
            return 1;
        }
    };

    if settings.json {
        match render_json(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("FATAL: could not serialise import result: {}", e);
                return 1;
            }
        }
    } else {
        println!("{}", render_summary(&outcome, settings.use_color));
    }

    outcome.exit_code()
}

use clap::Parser;
use email_triage::cli::{Cli, Commands};
use email_triage::config::{load_config_or_default, TriageConfig};
use email_triage::domain::Result as TriageResult;
use email_triage::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config reports its own load errors, so a bad file must not stop logging
    let loaded = load_config_or_default(&cli.config);

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Email Triage - PII masking and classification"
    );

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, loaded: TriageResult<TriageConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::Serve(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_error(&e)),
        },
        Commands::Mask(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_error(&e)),
        },
        Commands::Classify(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_error(&e)),
        },
        Commands::Train(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(config_error(&e)),
        },
    }
}

fn config_error(error: &email_triage::domain::TriageError) -> i32 {
    email_triage::log_error_with_context!(error, "Failed to load configuration");
    eprintln!("❌ {error}");
    2
}

use clap::Parser;
use std::process::ExitCode;

use hydroprint_infrastructure::logging::init_logger;
use hydroprint_lib::application::services::ConfigService;
use hydroprint_lib::presentation::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ConfigService::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config.log_dir();
    match init_logger(log_dir.clone(), config.get_log_level().as_str()) {
        Ok(()) => {
            tracing::info!("hydroprint starting, logs at {}", log_dir.display());
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
        }
    }

    match cli::run(cli, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

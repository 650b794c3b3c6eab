//! Binary entry-point for the withdrawal proof builder.
//! Parses CLI arguments with **argh** and drives the `bedrock_prover` pipeline over JSON-RPC.
mod cli;
mod cmd;
mod context;
mod errors;
mod output;

use std::process;

use bedrock_common::logging::{self, FileLoggingConfig, LoggerConfig};
use bedrock_config::LoggingConfig;

use crate::{
    cli::{Cli, Command},
    cmd::{fault_proofs::fault_proofs, prove::prove, resolve_output::resolve_output},
};

const SERVICE_NAME: &str = "bedrock-prover";

fn logger_config(config: &LoggingConfig) -> LoggerConfig {
    let mut logger = LoggerConfig::new(SERVICE_NAME.to_string())
        .with_json_logging(config.json)
        .with_stderr(true)
        .add_directive("alloy_transport=warn");
    if let Some(dir) = &config.file_dir {
        logger = logger.with_file_logging(FileLoggingConfig::new(
            dir.clone(),
            SERVICE_NAME.to_string(),
        ));
    }
    logger
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli: Cli = argh::from_env();

    let config = bedrock_config::ProverConfig::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Err(e) = logging::init(logger_config(&config.logging)) {
        eprintln!("{e}");
        process::exit(1);
    }

    let result = match cli.cmd {
        Command::Prove(args) => prove(&config, args).await,
        Command::ResolveOutput(args) => resolve_output(&config, args).await,
        Command::FaultProofs(args) => fault_proofs(&config, args).await,
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

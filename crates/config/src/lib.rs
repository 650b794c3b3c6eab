//! TOML configuration of the withdrawal prover.

mod config;

pub use config::{ConfigError, L1Config, L2Config, LoggingConfig, ProverConfig, ProverSettings};

use std::{fmt, path::PathBuf, str::FromStr};

use argh::FromArgs;

use crate::cmd::{
    fault_proofs::FaultProofsArgs, prove::ProveArgs, resolve_output::ResolveOutputArgs,
};

pub(crate) const DEFAULT_CONFIG_PATH: &str = "bedrock-prover.toml";

/// Build withdrawal proofs for an OP-stack chain
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Cli {
    /// path to the TOML configuration file
    #[argh(option, short = 'c', default = "PathBuf::from(DEFAULT_CONFIG_PATH)")]
    pub(crate) config: PathBuf,

    #[argh(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Command {
    Prove(ProveArgs),
    ResolveOutput(ResolveOutputArgs),
    FaultProofs(FaultProofsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Json,
    Porcelain,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "porcelain" => Ok(OutputFormat::Porcelain),
            other => Err(format!(
                "unknown output format '{other}', expected \"json\" or \"porcelain\""
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Porcelain => f.write_str("porcelain"),
        }
    }
}

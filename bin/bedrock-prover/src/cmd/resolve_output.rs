use alloy_primitives::U256;
use argh::FromArgs;
use bedrock_config::ProverConfig;

use crate::{
    cli::OutputFormat,
    context::connect_resolver,
    errors::{prover_error, DisplayedError},
    output::output,
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "resolve-output")]
/// Find the L2 output proposed on L1 that covers an L2 block
pub(crate) struct ResolveOutputArgs {
    /// L2 block number
    #[argh(positional)]
    pub(crate) l2_block: u64,

    /// output format: "json" or "porcelain"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) async fn resolve_output(
    config: &ProverConfig,
    args: ResolveOutputArgs,
) -> Result<(), DisplayedError> {
    let resolver = connect_resolver(config).await?;
    let resolved = resolver
        .resolve_output(U256::from(args.l2_block))
        .await
        .map_err(prover_error(format!(
            "failed to resolve output for L2 block {}",
            args.l2_block
        )))?;
    output(&resolved, args.output_format)
}

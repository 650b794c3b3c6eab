use alloy_primitives::B256;
use argh::FromArgs;
use bedrock_config::ProverConfig;
use tracing::info;

use crate::{
    cli::OutputFormat,
    context::connect_prover,
    errors::{prover_error, DisplayedError},
    output::{output, proof::ProofOutput},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "prove")]
/// Build the withdrawal proof of an L2 transaction
pub(crate) struct ProveArgs {
    /// hash of the L2 transaction that initiated the withdrawal
    #[argh(positional)]
    pub(crate) tx_hash: B256,

    /// also print the proveWithdrawalTransaction calldata
    #[argh(switch)]
    pub(crate) calldata: bool,

    /// output format: "json" or "porcelain"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) async fn prove(config: &ProverConfig, args: ProveArgs) -> Result<(), DisplayedError> {
    let prover = connect_prover(config).await?;
    let proof = prover
        .prove_with_timeout(args.tx_hash, config.prover.timeout())
        .await
        .map_err(prover_error(format!("failed to prove {}", args.tx_hash)))?;
    info!(
        tx_hash = %args.tx_hash,
        l2_output_index = %proof.l2_output_index,
        "withdrawal proof built"
    );

    let calldata = args.calldata.then(|| proof.prove_withdrawal_calldata());
    output(
        &ProofOutput {
            proof: &proof,
            calldata,
        },
        args.output_format,
    )
}

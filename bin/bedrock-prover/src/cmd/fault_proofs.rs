use alloy_primitives::Address;
use argh::FromArgs;
use bedrock_config::ProverConfig;
use bedrock_prover::{fault_proof_active_for, traits::Portal};

use crate::{
    cli::OutputFormat,
    context::connect_resolver,
    errors::{prover_error, DisplayableError, DisplayedError},
    output::{fault_proofs::FaultProofStatus, output},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "fault-proofs")]
/// Show whether the portal has switched to fault proofs
pub(crate) struct FaultProofsArgs {
    /// output format: "json" or "porcelain"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) async fn fault_proofs(
    config: &ProverConfig,
    args: FaultProofsArgs,
) -> Result<(), DisplayedError> {
    let resolver = connect_resolver(config).await?;
    let status = fault_proof_status(resolver.portal(), config.l1.portal_address).await?;
    output(&status, args.output_format)
}

/// Reads the portal version once and derives the fault proof status from it.
async fn fault_proof_status(
    portal: &impl Portal,
    portal_address: Address,
) -> Result<FaultProofStatus, DisplayedError> {
    let portal_version = portal
        .version()
        .await
        .internal_error("failed to read portal version")?;
    let active = fault_proof_active_for(&portal_version)
        .map_err(prover_error("failed to check fault proof status"))?;

    let (respected_game_type, dispute_game_factory) = if active {
        let game_type = portal
            .respected_game_type()
            .await
            .internal_error("failed to read respected game type")?;
        let factory = portal
            .dispute_game_factory()
            .await
            .internal_error("failed to read dispute game factory")?;
        (Some(game_type), Some(factory))
    } else {
        (None, None)
    };

    Ok(FaultProofStatus {
        portal: portal_address,
        portal_version,
        fault_proofs_active: active,
        respected_game_type,
        dispute_game_factory,
    })
}

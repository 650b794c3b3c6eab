use alloy_primitives::U256;
use bedrock_primitives::{bindings::GameSearchResult, BedrockOutput};
use tracing::{debug, info};

use crate::{
    errors::Result,
    fault_proof::is_fault_proof_active,
    traits::{DisputeGameFactory, L2OutputOracle, Portal},
    ProverError,
};

/// Most recent dispute games searched for one resolution.
///
/// A game older than this window is not found even if it commits to the block.
pub const MAX_GAME_LOOKBACK: u64 = 100;

/// Finds the L2 output that commits to a given L2 block.
///
/// The portal version decides between the legacy output oracle and dispute games on every
/// call, never cached, so one resolver stays correct across a live upgrade.
#[derive(Debug)]
pub struct OutputResolver<P, O, F> {
    portal: P,
    output_oracle: O,
    game_factory: F,
}

impl<P, O, F> OutputResolver<P, O, F>
where
    P: Portal,
    O: L2OutputOracle,
    F: DisputeGameFactory,
{
    /// Creates a resolver over the given L1 contract readers.
    pub fn new(portal: P, output_oracle: O, game_factory: F) -> Self {
        Self {
            portal,
            output_oracle,
            game_factory,
        }
    }

    /// The portal reader this resolver selects its path with.
    pub fn portal(&self) -> &P {
        &self.portal
    }

    /// Reads the portal version and reports whether dispute games are in use.
    pub async fn is_fault_proof_active(&self) -> Result<bool> {
        is_fault_proof_active(&self.portal).await
    }

    /// Resolves the first output at or above `l2_block_number`.
    pub async fn resolve_output(&self, l2_block_number: U256) -> Result<BedrockOutput> {
        let output = if self.is_fault_proof_active().await? {
            self.resolve_from_dispute_games(l2_block_number).await?
        } else {
            self.resolve_from_output_oracle(l2_block_number).await?
        };

        info!(
            target_block = %l2_block_number,
            l2_block = %output.l2_block_number,
            l2_output_index = %output.l2_output_index,
            output_root = %output.output_root,
            "resolved output"
        );
        Ok(output)
    }

    async fn resolve_from_output_oracle(&self, l2_block_number: U256) -> Result<BedrockOutput> {
        let index = self
            .output_oracle
            .get_l2_output_index_after(l2_block_number)
            .await?;
        debug!(%index, "output oracle index");

        let proposal = self.output_oracle.get_l2_output(index).await?;
        Ok(BedrockOutput {
            output_root: proposal.outputRoot,
            l1_timestamp: U256::from(proposal.timestamp),
            l2_block_number: U256::from(proposal.l2BlockNumber),
            l2_output_index: index,
        })
    }

    async fn resolve_from_dispute_games(&self, l2_block_number: U256) -> Result<BedrockOutput> {
        let game_type = self.portal.respected_game_type().await?;
        let factory = self.portal.dispute_game_factory().await?;
        let game_count = self.game_factory.game_count(factory).await?;

        let start = game_count.saturating_sub(U256::from(1));
        let n = game_count.min(U256::from(MAX_GAME_LOOKBACK));
        debug!(%factory, game_type, %game_count, %start, %n, "searching dispute games");

        let games = self
            .game_factory
            .find_latest_games(factory, game_type, start, n)
            .await?;

        for game in games {
            let game_block = game_l2_block_number(&game)?;
            if game_block >= l2_block_number {
                debug!(game_index = %game.index, %game_block, "found dispute game");
                return Ok(BedrockOutput {
                    output_root: game.rootClaim,
                    l1_timestamp: game.timestamp,
                    l2_block_number: game_block,
                    l2_output_index: game.index,
                });
            }
        }

        Err(ProverError::not_found(format!(
            "no dispute game of type {game_type} among the latest {n} commits to L2 block {l2_block_number}"
        )))
    }
}

/// L2 block number a game claims, the first word of its extra data.
fn game_l2_block_number(game: &GameSearchResult) -> Result<U256> {
    let word = game.extraData.get(..32).ok_or_else(|| {
        ProverError::parse(format!(
            "dispute game {} extra data is {} bytes, expected at least 32",
            game.index,
            game.extraData.len()
        ))
    })?;
    Ok(U256::from_be_slice(word))
}

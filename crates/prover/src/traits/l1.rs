use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bedrock_primitives::bindings::{GameSearchResult, OutputProposal};

use super::ClientError;

/// Read access to the L1 portal contract.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait Portal: Send + Sync {
    /// Semantic version string of the deployed portal.
    async fn version(&self) -> Result<String, ClientError>;

    /// Game type whose claims the portal accepts for withdrawals.
    async fn respected_game_type(&self) -> Result<u32, ClientError>;

    async fn dispute_game_factory(&self) -> Result<Address, ClientError>;
}

/// Read access to the legacy output oracle.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait L2OutputOracle: Send + Sync {
    /// Index of the first output whose L2 block number is at or above `l2_block_number`.
    async fn get_l2_output_index_after(&self, l2_block_number: U256) -> Result<U256, ClientError>;

    async fn get_l2_output(&self, index: U256) -> Result<OutputProposal, ClientError>;
}

/// Read access to a dispute game factory.
///
/// The factory address is read from the portal on every resolution, so it is passed per call.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait DisputeGameFactory: Send + Sync {
    async fn game_count(&self, factory: Address) -> Result<U256, ClientError>;

    /// Up to `n` games of `game_type`, searching backwards from index `start`.
    async fn find_latest_games(
        &self,
        factory: Address,
        game_type: u32,
        start: U256,
        n: U256,
    ) -> Result<Vec<GameSearchResult>, ClientError>;
}

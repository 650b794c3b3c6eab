use std::fmt;

use alloy::{
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    sol,
};
use async_trait::async_trait;
use bedrock_primitives::bindings::{GameSearchResult, OutputProposal};
use bedrock_prover::traits::{ClientError, DisputeGameFactory, L2OutputOracle, Portal};
use tracing::debug;

use crate::errors::{contract_error, transport_error};

sol! {
    #[sol(rpc)]
    interface IOptimismPortal {
        function version() external view returns (string memory);
        function respectedGameType() external view returns (uint32);
        function disputeGameFactory() external view returns (address);
    }

    #[sol(rpc)]
    interface IL2OutputOracle {
        struct OutputProposal {
            bytes32 outputRoot;
            uint128 timestamp;
            uint128 l2BlockNumber;
        }

        function getL2OutputIndexAfter(uint256 _l2BlockNumber) external view returns (uint256);
        function getL2Output(uint256 _l2OutputIndex) external view returns (OutputProposal memory);
    }

    #[sol(rpc)]
    interface IDisputeGameFactory {
        struct GameSearchResult {
            uint256 index;
            bytes32 metadata;
            uint256 timestamp;
            bytes32 rootClaim;
            bytes extraData;
        }

        function gameCount() external view returns (uint256 gameCount_);
        function findLatestGames(uint32 _gameType, uint256 _start, uint256 _n)
            external view returns (GameSearchResult[] memory games_);
    }
}

impl From<IL2OutputOracle::OutputProposal> for OutputProposal {
    fn from(p: IL2OutputOracle::OutputProposal) -> Self {
        Self {
            outputRoot: p.outputRoot,
            timestamp: p.timestamp,
            l2BlockNumber: p.l2BlockNumber,
        }
    }
}

impl From<IDisputeGameFactory::GameSearchResult> for GameSearchResult {
    fn from(g: IDisputeGameFactory::GameSearchResult) -> Self {
        Self {
            index: g.index,
            metadata: g.metadata,
            timestamp: g.timestamp,
            rootClaim: g.rootClaim,
            extraData: g.extraData,
        }
    }
}

/// Reads the L1 contracts the output resolver depends on.
///
/// Cheap to clone; clones share the underlying provider.
#[derive(Clone)]
pub struct L1ContractsClient {
    provider: DynProvider,
    portal: Address,
    output_oracle: Address,
}

impl L1ContractsClient {
    pub fn new(provider: DynProvider, portal: Address, output_oracle: Address) -> Self {
        Self {
            provider,
            portal,
            output_oracle,
        }
    }

    /// Connects to the L1 node at `url`.
    pub async fn connect(
        url: &str,
        portal: Address,
        output_oracle: Address,
    ) -> Result<Self, ClientError> {
        let provider = ProviderBuilder::default()
            .connect(url)
            .await
            .map_err(|e| transport_error("connect", e))?;
        Ok(Self::new(provider.erased(), portal, output_oracle))
    }

    fn portal_contract(&self) -> IOptimismPortal::IOptimismPortalInstance<DynProvider> {
        IOptimismPortal::new(self.portal, self.provider.clone())
    }

    fn oracle_contract(&self) -> IL2OutputOracle::IL2OutputOracleInstance<DynProvider> {
        IL2OutputOracle::new(self.output_oracle, self.provider.clone())
    }
}

impl fmt::Debug for L1ContractsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L1ContractsClient")
            .field("portal", &self.portal)
            .field("output_oracle", &self.output_oracle)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Portal for L1ContractsClient {
    async fn version(&self) -> Result<String, ClientError> {
        debug!(portal = %self.portal, "reading portal version");
        self.portal_contract()
            .version()
            .call()
            .await
            .map_err(|e| contract_error("version", e))
    }

    async fn respected_game_type(&self) -> Result<u32, ClientError> {
        self.portal_contract()
            .respectedGameType()
            .call()
            .await
            .map_err(|e| contract_error("respectedGameType", e))
    }

    async fn dispute_game_factory(&self) -> Result<Address, ClientError> {
        self.portal_contract()
            .disputeGameFactory()
            .call()
            .await
            .map_err(|e| contract_error("disputeGameFactory", e))
    }
}

#[async_trait]
impl L2OutputOracle for L1ContractsClient {
    async fn get_l2_output_index_after(&self, l2_block_number: U256) -> Result<U256, ClientError> {
        debug!(oracle = %self.output_oracle, %l2_block_number, "reading output index");
        self.oracle_contract()
            .getL2OutputIndexAfter(l2_block_number)
            .call()
            .await
            .map_err(|e| contract_error("getL2OutputIndexAfter", e))
    }

    async fn get_l2_output(&self, index: U256) -> Result<OutputProposal, ClientError> {
        self.oracle_contract()
            .getL2Output(index)
            .call()
            .await
            .map(Into::into)
            .map_err(|e| contract_error("getL2Output", e))
    }
}

#[async_trait]
impl DisputeGameFactory for L1ContractsClient {
    async fn game_count(&self, factory: Address) -> Result<U256, ClientError> {
        IDisputeGameFactory::new(factory, self.provider.clone())
            .gameCount()
            .call()
            .await
            .map_err(|e| contract_error("gameCount", e))
    }

    async fn find_latest_games(
        &self,
        factory: Address,
        game_type: u32,
        start: U256,
        n: U256,
    ) -> Result<Vec<GameSearchResult>, ClientError> {
        debug!(%factory, game_type, %start, %n, "searching latest games");
        let games = IDisputeGameFactory::new(factory, self.provider.clone())
            .findLatestGames(game_type, start, n)
            .call()
            .await
            .map_err(|e| contract_error("findLatestGames", e))?;
        Ok(games.into_iter().map(Into::into).collect())
    }
}

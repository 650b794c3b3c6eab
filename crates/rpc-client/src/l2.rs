use std::fmt;

use alloy::{
    primitives::{Address, B256, U64},
    providers::{DynProvider, Provider, ProviderBuilder},
};
use async_trait::async_trait;
use bedrock_primitives::l2::{AccountProofResponse, L2Header, L2Receipt};
use bedrock_prover::traits::{ClientError, L2Client};
use tracing::debug;

use crate::errors::transport_error;

/// Reads receipts, proofs and headers from an L2 execution node.
///
/// Requests are sent raw and decoded into the prover's own wire types, so no particular rollup
/// network type is assumed for the node's responses.
#[derive(Clone)]
pub struct L2RpcClient {
    provider: DynProvider,
}

impl L2RpcClient {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Connects to the L2 node at `url`.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let provider = ProviderBuilder::default()
            .connect(url)
            .await
            .map_err(|e| transport_error("connect", e))?;
        Ok(Self::new(provider.erased()))
    }
}

impl fmt::Debug for L2RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L2RpcClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl L2Client for L2RpcClient {
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<L2Receipt>, ClientError> {
        const METHOD: &str = "eth_getTransactionReceipt";
        debug!(%tx_hash, method = METHOD, "rpc request");
        self.provider
            .raw_request::<_, Option<L2Receipt>>(METHOD.into(), (tx_hash,))
            .await
            .map_err(|e| transport_error(METHOD, e))
    }

    async fn get_proof(
        &self,
        address: Address,
        storage_keys: Vec<B256>,
        block_number: u64,
    ) -> Result<AccountProofResponse, ClientError> {
        const METHOD: &str = "eth_getProof";
        debug!(%address, keys = storage_keys.len(), block_number, method = METHOD, "rpc request");
        self.provider
            .raw_request::<_, AccountProofResponse>(
                METHOD.into(),
                (address, storage_keys, U64::from(block_number)),
            )
            .await
            .map_err(|e| transport_error(METHOD, e))
    }

    async fn header_by_number(&self, block_number: u64) -> Result<Option<L2Header>, ClientError> {
        const METHOD: &str = "eth_getBlockByNumber";
        debug!(block_number, method = METHOD, "rpc request");
        self.provider
            .raw_request::<_, Option<L2Header>>(METHOD.into(), (U64::from(block_number), false))
            .await
            .map_err(|e| transport_error(METHOD, e))
    }
}

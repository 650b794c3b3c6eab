use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use bedrock_primitives::l2::{AccountProofResponse, L2Header, L2Receipt};

use super::ClientError;

/// Read access to the L2 execution node.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait L2Client: Send + Sync {
    /// `eth_getTransactionReceipt`; `None` when the node does not know the transaction.
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<L2Receipt>, ClientError>;

    /// `eth_getProof` of `storage_keys` in `address` at `block_number`.
    async fn get_proof(
        &self,
        address: Address,
        storage_keys: Vec<B256>,
        block_number: u64,
    ) -> Result<AccountProofResponse, ClientError>;

    /// `eth_getBlockByNumber` without transactions.
    async fn header_by_number(&self, block_number: u64) -> Result<Option<L2Header>, ClientError>;
}

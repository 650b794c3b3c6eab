//! JSON-RPC response shapes consumed from the L2 node.
//!
//! These only carry the fields the prover reads; anything else in the node's response is
//! ignored during deserialization.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Subset of `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Receipt {
    pub transaction_hash: B256,
    #[serde(with = "alloy_serde::quantity")]
    pub block_number: u64,
    pub logs: Vec<L2Log>,
}

/// A log entry inside an [`L2Receipt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(with = "alloy_serde::quantity")]
    pub block_number: u64,
    pub transaction_hash: B256,
}

/// Subset of `eth_getBlockByNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Header {
    pub hash: B256,
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    pub state_root: B256,
}

/// Response of `eth_getProof`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProofResponse {
    pub account_proof: Vec<Bytes>,
    pub storage_hash: B256,
    pub storage_proof: Vec<StorageProofEntry>,
}

/// Inclusion proof of one storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProofEntry {
    pub key: B256,
    pub value: U256,
    pub proof: Vec<Bytes>,
}

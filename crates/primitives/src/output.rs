use alloy_primitives::{keccak256, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{bindings, constants::OUTPUT_VERSION_V0};

/// Preimage of a bedrock output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRootProof {
    pub version: B256,
    pub state_root: B256,
    pub message_passer_storage_root: B256,
    pub latest_block_hash: B256,
}

impl OutputRootProof {
    /// Builds a version 0 proof.
    pub fn new_v0(
        state_root: B256,
        message_passer_storage_root: B256,
        latest_block_hash: B256,
    ) -> Self {
        Self {
            version: OUTPUT_VERSION_V0,
            state_root,
            message_passer_storage_root,
            latest_block_hash,
        }
    }

    /// `keccak256(version ++ stateRoot ++ messagePasserStorageRoot ++ latestBlockHash)`
    pub fn output_root(&self) -> B256 {
        let mut preimage = [0u8; 128];
        preimage[..32].copy_from_slice(self.version.as_slice());
        preimage[32..64].copy_from_slice(self.state_root.as_slice());
        preimage[64..96].copy_from_slice(self.message_passer_storage_root.as_slice());
        preimage[96..].copy_from_slice(self.latest_block_hash.as_slice());
        keccak256(preimage)
    }
}

impl From<OutputRootProof> for bindings::OutputRootProof {
    fn from(proof: OutputRootProof) -> Self {
        Self {
            version: proof.version,
            stateRoot: proof.state_root,
            messagePasserStorageRoot: proof.message_passer_storage_root,
            latestBlockhash: proof.latest_block_hash,
        }
    }
}

/// The L2 output that commits to a requested block.
///
/// `l2_output_index` is an output oracle index on the legacy path and a dispute game index once
/// fault proofs are live. The two are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedrockOutput {
    pub output_root: B256,
    pub l1_timestamp: U256,
    pub l2_block_number: U256,
    pub l2_output_index: U256,
}

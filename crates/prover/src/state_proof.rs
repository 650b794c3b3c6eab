use alloy_primitives::{keccak256, Address, B256};
use bedrock_mpt::repair_proof;
use bedrock_primitives::StateTrieProof;
use tracing::{debug, warn};

use crate::{errors::Result, traits::L2Client, ProverError};

/// Fetches the account and storage proof of `slot` in `address` at `block_number`.
///
/// The storage proof is passed through [`repair_proof`] keyed by `keccak256(slot)`, the trie key
/// of the slot.
pub async fn fetch_state_trie_proof(
    client: &impl L2Client,
    address: Address,
    slot: B256,
    block_number: u64,
) -> Result<StateTrieProof> {
    let response = client.get_proof(address, vec![slot], block_number).await?;

    let entry = response.storage_proof.into_iter().next().ok_or_else(|| {
        ProverError::not_found(format!(
            "eth_getProof for {address} at block {block_number} returned no storage proof"
        ))
    })?;
    if entry.key != slot {
        warn!(requested = %slot, returned = %entry.key, "storage proof key differs from slot");
    }

    let proof_len = entry.proof.len();
    let storage_proof = repair_proof(&keccak256(slot), entry.proof)?;
    debug!(
        %address,
        %slot,
        block_number,
        account_nodes = response.account_proof.len(),
        storage_nodes = proof_len,
        appended = storage_proof.len() - proof_len,
        "fetched state trie proof"
    );

    Ok(StateTrieProof {
        account_proof: response.account_proof,
        storage_proof,
        storage_value: entry.value,
        storage_root: response.storage_hash,
    })
}

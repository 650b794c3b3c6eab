use alloy_primitives::{Bytes, B256};
use alloy_rlp::{Encodable, Header};
use tracing::debug;

use crate::{errors::RlpTreeError, rlp_tree::RlpNode};

/// Number of slots in a branch node: 16 nibbles plus the value slot.
pub const BRANCH_NODE_WIDTH: usize = 17;

/// Appends standalone copies of short nodes embedded in the final branch node of `proof`.
///
/// A leaf whose encoding is shorter than 32 bytes is inlined into its parent branch instead of
/// being referenced by hash. Verifiers that dereference every proof element by hash cannot reach
/// it, so every embedded node whose partial path is a suffix of `key` is re-encoded as its own
/// element and pushed to the end of the proof. Existing elements are never removed or reordered.
///
/// `key` is the trie key, i.e. the hashed storage slot for storage proofs.
pub fn repair_proof(key: &B256, mut proof: Vec<Bytes>) -> Result<Vec<Bytes>, RlpTreeError> {
    let Some(last) = proof.last() else {
        return Ok(proof);
    };

    let node = RlpNode::decode(last)?;
    let Some(slots) = node.children().filter(|c| c.len() == BRANCH_NODE_WIDTH) else {
        return Ok(proof);
    };

    let key_hex = hex::encode(key);
    let mut extra = Vec::new();
    for (slot, child) in slots.iter().enumerate() {
        let Some(embedded) = child.children().filter(|c| !c.is_empty()) else {
            continue;
        };
        let Some(suffix) = partial_path_suffix(embedded) else {
            continue;
        };

        if key_hex.ends_with(&suffix) {
            debug!(%slot, %suffix, "appending embedded node to proof");
            extra.push(encode_embedded(embedded)?);
        }
    }

    proof.extend(extra);
    Ok(proof)
}

/// Hex form of an embedded node's compact-encoded path without its flag nibble.
fn partial_path_suffix(embedded: &[RlpNode]) -> Option<String> {
    let path = embedded.first()?.data()?;
    if path.is_empty() {
        return None;
    }
    let path_hex = hex::encode(path);
    Some(path_hex[1..].to_owned())
}

fn encode_embedded(embedded: &[RlpNode]) -> Result<Bytes, RlpTreeError> {
    let [path, value] = embedded else {
        return Err(RlpTreeError::MalformedEmbeddedNode {
            children: embedded.len(),
        });
    };
    let (Some(path), Some(value)) = (path.data(), value.data()) else {
        return Err(RlpTreeError::MalformedEmbeddedNode {
            children: embedded.len(),
        });
    };

    let mut out = Vec::new();
    Header {
        list: true,
        payload_length: path.length() + value.length(),
    }
    .encode(&mut out);
    path.encode(&mut out);
    value.encode(&mut out);
    Ok(out.into())
}

//! Merkle-Patricia trie helpers used when building withdrawal proofs.
//!
//! Two pieces live here:
//!
//! - [`RlpNode`], a generic RLP tree whose terminal representation follows the raw decoding rules
//!   downstream proof verifiers compare against.
//! - [`repair_proof`], which patches storage proofs ending in a branch node that embeds a short
//!   leaf so that verifiers expecting one hashed node per proof element can walk them.

mod errors;
mod repair;
mod rlp_tree;

#[cfg(test)]
mod test_utils;

pub use errors::RlpTreeError;
pub use repair::{repair_proof, BRANCH_NODE_WIDTH};
pub use rlp_tree::{RlpNode, MAX_NESTING_DEPTH};

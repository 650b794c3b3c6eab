//! Withdrawal proof construction.
//!
//! Given the hash of an L2 transaction that initiated a withdrawal, [`WithdrawalProver`] finds the
//! `MessagePassed` event, resolves the L2 output that commits to it on L1, fetches a storage proof
//! of the message passer slot at that output's block and assembles a [`BedrockMessageProof`].
//!
//! Chain access goes through the traits in [`traits`], so the pipeline can run against any
//! transport.
//!
//! [`BedrockMessageProof`]: bedrock_primitives::BedrockMessageProof

mod errors;
mod fault_proof;
mod output;
mod prover;
mod state_proof;
pub mod traits;

pub use errors::{ErrorKind, ProverError, Stage};
pub use fault_proof::{fault_proof_active_for, is_fault_proof_active, FAULT_PROOF_PORTAL_VERSION};
pub use output::{OutputResolver, MAX_GAME_LOOKBACK};
pub use prover::WithdrawalProver;
pub use state_proof::fetch_state_trie_proof;

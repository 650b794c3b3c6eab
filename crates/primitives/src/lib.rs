//! Data model for proving OP-stack style withdrawals on L1.

pub mod bindings;
pub mod constants;
pub mod l2;
mod output;
mod proof;
mod withdrawal;

pub use output::{BedrockOutput, OutputRootProof};
pub use proof::{BedrockMessageProof, StateTrieProof};
pub use withdrawal::{message_passed_events, LogMeta, MessageDecodeError, WithdrawalMessage};

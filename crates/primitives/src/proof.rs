use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::{bindings::proveWithdrawalTransactionCall, OutputRootProof, WithdrawalMessage};

/// Account and storage inclusion proof of a single storage slot.
///
/// `storage_proof` has already been through proof node repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTrieProof {
    pub account_proof: Vec<Bytes>,
    pub storage_proof: Vec<Bytes>,
    pub storage_value: U256,
    pub storage_root: B256,
}

/// Everything the L1 portal needs to prove a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedrockMessageProof {
    pub low_level_message: WithdrawalMessage,
    pub output_root_proof: OutputRootProof,
    pub withdrawal_proof: Vec<Bytes>,
    pub l2_output_index: U256,
}

impl BedrockMessageProof {
    /// ABI-encoded `proveWithdrawalTransaction` call for this proof.
    pub fn prove_withdrawal_calldata(&self) -> Bytes {
        proveWithdrawalTransactionCall {
            _tx: self.low_level_message.to_withdrawal_transaction(),
            _l2OutputIndex: self.l2_output_index,
            _outputRootProof: self.output_root_proof.into(),
            _withdrawalProof: self.withdrawal_proof.clone(),
        }
        .abi_encode()
        .into()
    }
}

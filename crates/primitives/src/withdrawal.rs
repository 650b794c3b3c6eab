use alloy_primitives::{keccak256, Address, Bytes, LogData, B256, U256};
use alloy_sol_types::{SolEvent, SolValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bindings::{MessagePassed, WithdrawalTransaction},
    l2::L2Log,
};

/// Where a decoded event came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMeta {
    pub address: Address,
    pub block_number: u64,
    pub transaction_hash: B256,
}

/// A decoded `MessagePassed` event, the "low-level message" of a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalMessage {
    pub nonce: U256,
    pub sender: Address,
    pub target: Address,
    pub value: U256,
    pub gas_limit: U256,
    pub data: Bytes,
    pub withdrawal_hash: B256,
    pub log: LogMeta,
}

#[derive(Debug, Error)]
pub enum MessageDecodeError {
    #[error("log has {0} topics")]
    TooManyTopics(usize),

    #[error("abi: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

impl WithdrawalMessage {
    /// Decodes a `MessagePassed` log. The caller is expected to have matched topic-0 already,
    /// a mismatch surfaces as an ABI error.
    pub fn from_log(log: &L2Log) -> Result<Self, MessageDecodeError> {
        let log_data = LogData::new(log.topics.clone(), log.data.clone())
            .ok_or(MessageDecodeError::TooManyTopics(log.topics.len()))?;
        let event = MessagePassed::decode_log_data(&log_data)?;

        Ok(Self {
            nonce: event.nonce,
            sender: event.sender,
            target: event.target,
            value: event.value,
            gas_limit: event.gasLimit,
            data: event.data,
            withdrawal_hash: event.withdrawalHash,
            log: LogMeta {
                address: log.address,
                block_number: log.block_number,
                transaction_hash: log.transaction_hash,
            },
        })
    }

    /// Hash of the ABI-encoded withdrawal fields.
    ///
    /// The event's own `withdrawalHash` is not part of the preimage.
    pub fn low_level_message_hash(&self) -> B256 {
        let encoded = (
            self.nonce,
            self.sender,
            self.target,
            self.value,
            self.gas_limit,
            self.data.clone(),
        )
            .abi_encode_params();
        keccak256(encoded)
    }

    /// Slot of `sentMessages[hash]` in the message passer, the mapping sits at slot zero.
    pub fn storage_slot(&self) -> B256 {
        mapping_slot(self.low_level_message_hash(), B256::ZERO)
    }

    /// The withdrawal as the portal expects it in `proveWithdrawalTransaction`.
    pub fn to_withdrawal_transaction(&self) -> WithdrawalTransaction {
        WithdrawalTransaction {
            nonce: self.nonce,
            sender: self.sender,
            target: self.target,
            value: self.value,
            gasLimit: self.gas_limit,
            data: self.data.clone(),
        }
    }
}

fn mapping_slot(key: B256, base: B256) -> B256 {
    keccak256((key, base).abi_encode())
}

/// Decodes every `MessagePassed` log in `logs`, in log order.
///
/// Logs whose topic-0 is a different event are skipped. The iterator borrows `logs`, so scanning
/// again is just another call.
pub fn message_passed_events(
    logs: &[L2Log],
) -> impl Iterator<Item = Result<WithdrawalMessage, MessageDecodeError>> + '_ {
    logs.iter()
        .filter(|log| log.topics.first() == Some(&MessagePassed::SIGNATURE_HASH))
        .map(WithdrawalMessage::from_log)
}

use alloy_primitives::Bytes;
use bedrock_primitives::BedrockMessageProof;
use serde::Serialize;

use super::{porcelain_field, Formattable};

/// A withdrawal proof, optionally with the portal calldata that submits it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProofOutput<'a> {
    #[serde(flatten)]
    pub(crate) proof: &'a BedrockMessageProof,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) calldata: Option<Bytes>,
}

impl Formattable for ProofOutput<'_> {
    fn format_porcelain(&self) -> String {
        let msg = &self.proof.low_level_message;
        let roots = &self.proof.output_root_proof;

        let mut output = vec![
            porcelain_field("withdrawal.nonce", msg.nonce),
            porcelain_field("withdrawal.sender", msg.sender),
            porcelain_field("withdrawal.target", msg.target),
            porcelain_field("withdrawal.value", msg.value),
            porcelain_field("withdrawal.gas_limit", msg.gas_limit),
            porcelain_field("withdrawal.data", &msg.data),
            porcelain_field("withdrawal.hash", msg.withdrawal_hash),
            porcelain_field("withdrawal.l2_block_number", msg.log.block_number),
            porcelain_field("output_root_proof.version", roots.version),
            porcelain_field("output_root_proof.state_root", roots.state_root),
            porcelain_field(
                "output_root_proof.message_passer_storage_root",
                roots.message_passer_storage_root,
            ),
            porcelain_field(
                "output_root_proof.latest_block_hash",
                roots.latest_block_hash,
            ),
            porcelain_field("l2_output_index", self.proof.l2_output_index),
        ];
        for (i, node) in self.proof.withdrawal_proof.iter().enumerate() {
            output.push(porcelain_field(&format!("withdrawal_proof[{i}]"), node));
        }
        if let Some(calldata) = &self.calldata {
            output.push(porcelain_field("calldata", calldata));
        }
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, bytes, B256, U256};
    use bedrock_primitives::{LogMeta, OutputRootProof, WithdrawalMessage};

    use super::*;

    fn sample_proof() -> BedrockMessageProof {
        BedrockMessageProof {
            low_level_message: WithdrawalMessage {
                nonce: U256::from(7),
                sender: address!("4200000000000000000000000000000000000007"),
                target: address!("25ace71c97b33cc4729cf772ae268934f7ab5fa1"),
                value: U256::ZERO,
                gas_limit: U256::from(287_000),
                data: bytes!("d764ad0b"),
                withdrawal_hash: B256::repeat_byte(0x22),
                log: LogMeta {
                    address: address!("4200000000000000000000000000000000000016"),
                    block_number: 9_042_540,
                    transaction_hash: B256::repeat_byte(0xab),
                },
            },
            output_root_proof: OutputRootProof::new_v0(
                b256!("92ce5b1dd1007046216f1579cee6810d4edbddef00e27283e1b60bf32429a51f"),
                b256!("5d0cd0b1dedff562ca66bde2d484cde0818facfceab8d743fdc08b3d1dc74f74"),
                b256!("5814c14229ad33bb3a56ce9f5b6cfc26d8e95517e0eaad0d20904e2016a6c5da"),
            ),
            withdrawal_proof: vec![bytes!("e21a"), bytes!("c4823f4501")],
            l2_output_index: U256::from(75_354),
        }
    }

    #[test]
    fn test_porcelain_lists_proof_nodes() {
        let proof = sample_proof();
        let out = ProofOutput {
            proof: &proof,
            calldata: None,
        };
        let porcelain = out.format_porcelain();
        assert!(porcelain.contains("withdrawal.gas_limit: 287000\n"));
        assert!(porcelain.contains("l2_output_index: 75354\n"));
        assert!(porcelain.contains("withdrawal_proof[0]: 0xe21a\n"));
        assert!(porcelain.ends_with("withdrawal_proof[1]: 0xc4823f4501"));
        assert!(!porcelain.contains("calldata"));
    }

    #[test]
    fn test_json_flattens_proof_and_calldata() {
        let proof = sample_proof();
        let calldata = proof.prove_withdrawal_calldata();
        let out = ProofOutput {
            proof: &proof,
            calldata: Some(calldata),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("lowLevelMessage").is_some());
        assert_eq!(json["l2OutputIndex"], "0x1265a");
        assert!(json["calldata"].as_str().unwrap().starts_with("0x4870496f"));

        let porcelain = out.format_porcelain();
        assert!(porcelain.contains("calldata: 0x4870496f"));
    }
}

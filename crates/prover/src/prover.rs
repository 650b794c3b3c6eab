use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use bedrock_primitives::{
    constants::MESSAGE_PASSER_ADDRESS, message_passed_events, BedrockMessageProof, OutputRootProof,
};
use tokio::time;
use tracing::{debug, info, instrument, warn};

use crate::{
    errors::{Result, WithStage},
    output::OutputResolver,
    state_proof::fetch_state_trie_proof,
    traits::{DisputeGameFactory, L2Client, L2OutputOracle, Portal},
    ProverError, Stage,
};

/// Builds [`BedrockMessageProof`]s for withdrawals initiated on L2.
///
/// Holds no state between calls; concurrent `prove` calls only share the injected clients.
#[derive(Debug)]
pub struct WithdrawalProver<P, O, F, L> {
    resolver: OutputResolver<P, O, F>,
    l2: L,
    message_passer: Address,
}

impl<P, O, F, L> WithdrawalProver<P, O, F, L>
where
    P: Portal,
    O: L2OutputOracle,
    F: DisputeGameFactory,
    L: L2Client,
{
    pub fn new(resolver: OutputResolver<P, O, F>, l2: L) -> Self {
        Self {
            resolver,
            l2,
            message_passer: MESSAGE_PASSER_ADDRESS,
        }
    }

    /// Overrides the message passer predeploy address.
    pub fn with_message_passer(mut self, message_passer: Address) -> Self {
        self.message_passer = message_passer;
        self
    }

    pub fn resolver(&self) -> &OutputResolver<P, O, F> {
        &self.resolver
    }

    /// Builds the proof for the withdrawal initiated by `tx_hash`.
    ///
    /// Fails on the first error, wrapped with the stage it happened in. Nothing is retried.
    #[instrument(skip_all, fields(%tx_hash))]
    pub async fn prove(&self, tx_hash: B256) -> Result<BedrockMessageProof> {
        let tx_ctx = || format!("tx {tx_hash}");

        let receipt = self
            .l2
            .transaction_receipt(tx_hash)
            .await
            .stage(Stage::FetchReceipt, tx_ctx)?
            .ok_or_else(|| ProverError::not_found("transaction receipt"))
            .stage(Stage::FetchReceipt, tx_ctx)?;
        debug!(l2_block = receipt.block_number, logs = receipt.logs.len(), "fetched receipt");

        let message = message_passed_events(&receipt.logs)
            .next()
            .ok_or_else(|| ProverError::not_found("MessagePassed event in receipt"))
            .stage(Stage::FindMessage, tx_ctx)?
            .stage(Stage::DecodeMessage, tx_ctx)?;

        let llm_hash = message.low_level_message_hash();
        if llm_hash != message.withdrawal_hash {
            warn!(
                computed = %llm_hash,
                emitted = %message.withdrawal_hash,
                "withdrawal hash differs from low-level message hash"
            );
        }
        let slot = message.storage_slot();
        debug!(nonce = %message.nonce, %llm_hash, %slot, "decoded withdrawal message");

        let output = self
            .resolver
            .resolve_output(U256::from(receipt.block_number))
            .await
            .stage(Stage::ResolveOutput, || {
                format!("tx {tx_hash}, l2 block {}", receipt.block_number)
            })?;

        // The proof is taken at the output's block, which may be later than the receipt's.
        let block = u64::try_from(output.l2_block_number)
            .map_err(|_| {
                ProverError::parse(format!(
                    "output block number {} does not fit in u64",
                    output.l2_block_number
                ))
            })
            .stage(Stage::FetchStateProof, tx_ctx)?;

        let state = fetch_state_trie_proof(&self.l2, self.message_passer, slot, block)
            .await
            .stage(Stage::FetchStateProof, || {
                format!("{} slot {slot} at l2 block {block}", self.message_passer)
            })?;

        let header_ctx = || format!("l2 block {block}");
        let header = self
            .l2
            .header_by_number(block)
            .await
            .stage(Stage::FetchHeader, header_ctx)?
            .ok_or_else(|| ProverError::not_found("block header"))
            .stage(Stage::FetchHeader, header_ctx)?;

        let output_root_proof =
            OutputRootProof::new_v0(header.state_root, state.storage_root, header.hash);
        let computed_root = output_root_proof.output_root();
        if computed_root != output.output_root {
            warn!(
                computed = %computed_root,
                resolved = %output.output_root,
                l2_block = block,
                "output root proof does not hash to the resolved output root"
            );
        }

        info!(
            l2_output_index = %output.l2_output_index,
            l2_block = block,
            proof_nodes = state.storage_proof.len(),
            "built withdrawal proof"
        );

        Ok(BedrockMessageProof {
            low_level_message: message,
            output_root_proof,
            withdrawal_proof: state.storage_proof,
            l2_output_index: output.l2_output_index,
        })
    }

    /// [`Self::prove`] bounded by one deadline over the whole pipeline.
    pub async fn prove_with_timeout(
        &self,
        tx_hash: B256,
        timeout: Duration,
    ) -> Result<BedrockMessageProof> {
        time::timeout(timeout, self.prove(tx_hash))
            .await
            .map_err(|_| ProverError::DeadlineExceeded(timeout))?
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, bytes};
    use alloy_sol_types::SolEvent;
    use async_trait::async_trait;
    use bedrock_primitives::{
        bindings::{GameSearchResult, MessagePassed, OutputProposal},
        l2::{AccountProofResponse, L2Header, L2Log, L2Receipt},
    };
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        traits::{
            ClientError, MockDisputeGameFactory, MockL2Client, MockL2OutputOracle, MockPortal,
        },
        ErrorKind,
    };

    const TX_HASH: B256 = b256!("8e5d6b1c3d2f2dcdf3b6d0f2ab8b3c1e4dfb1f3bc8b7a2d4c1e0f9a8b7c6d5e4");
    const RECEIPT_BLOCK: u64 = 9_042_540;
    const OUTPUT_BLOCK: u64 = 9_042_600;
    const SLOT: B256 = b256!("4026da25f5def020e7f6c1a5e856d4737a8fc3b63868a09a3769c512f67f54f0");
    const STATE_ROOT: B256 =
        b256!("92ce5b1dd1007046216f1579cee6810d4edbddef00e27283e1b60bf32429a51f");
    const BLOCK_HASH: B256 =
        b256!("5814c14229ad33bb3a56ce9f5b6cfc26d8e95517e0eaad0d20904e2016a6c5da");
    const OUTPUT_ROOT: B256 =
        b256!("b97fb0ef27910717d512d1e910fdcbcab38525f2ef0ac4dbe7b658a03dc8afe8");
    const FACTORY: Address = address!("e5965ab5962edc7477c8520243a95517cd252fa9");

    fn message_passed_log() -> L2Log {
        let mut data = bytes!("d764ad0b").to_vec();
        data.extend(0u8..32);
        let event = MessagePassed {
            nonce: (U256::from(1) << 240) | U256::from(0x42),
            sender: address!("4200000000000000000000000000000000000007"),
            target: address!("25ace71c97b33cc4729cf772ae268934f7ab5fa1"),
            value: U256::ZERO,
            gasLimit: U256::from(287_000),
            data: data.into(),
            withdrawalHash: b256!(
                "bc90247723cdbd2b9c5fdaceecdced9c79d829048b3290cd7bac78a3ea7e5366"
            ),
        };
        let log_data = event.encode_log_data();
        L2Log {
            address: MESSAGE_PASSER_ADDRESS,
            topics: log_data.topics().to_vec(),
            data: log_data.data,
            block_number: RECEIPT_BLOCK,
            transaction_hash: TX_HASH,
        }
    }

    fn unrelated_log() -> L2Log {
        L2Log {
            address: address!("4200000000000000000000000000000000000007"),
            topics: vec![B256::repeat_byte(0x77)],
            data: bytes!("00"),
            block_number: RECEIPT_BLOCK,
            transaction_hash: TX_HASH,
        }
    }

    fn receipt(logs: Vec<L2Log>) -> L2Receipt {
        L2Receipt {
            transaction_hash: TX_HASH,
            block_number: RECEIPT_BLOCK,
            logs,
        }
    }

    fn proof_fixture() -> AccountProofResponse {
        serde_json::from_str(include_str!("../testdata/get_proof_9042600.json")).unwrap()
    }

    /// L2 node that serves the withdrawal receipt, proof and header.
    fn l2_client() -> MockL2Client {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .with(eq(TX_HASH))
            .times(1)
            .returning(|_| Ok(Some(receipt(vec![unrelated_log(), message_passed_log()]))));
        l2.expect_get_proof()
            .with(eq(MESSAGE_PASSER_ADDRESS), eq(vec![SLOT]), eq(OUTPUT_BLOCK))
            .times(1)
            .returning(|_, _, _| Ok(proof_fixture()));
        l2.expect_header_by_number()
            .with(eq(OUTPUT_BLOCK))
            .times(1)
            .returning(|number| {
                Ok(Some(L2Header {
                    hash: BLOCK_HASH,
                    number,
                    state_root: STATE_ROOT,
                }))
            });
        l2
    }

    fn legacy_l1() -> (MockPortal, MockL2OutputOracle, MockDisputeGameFactory) {
        let mut portal = MockPortal::new();
        portal
            .expect_version()
            .times(1)
            .returning(|| Ok("2.5.0".to_string()));
        portal.expect_respected_game_type().times(0);
        portal.expect_dispute_game_factory().times(0);

        let mut oracle = MockL2OutputOracle::new();
        oracle
            .expect_get_l2_output_index_after()
            .with(eq(U256::from(RECEIPT_BLOCK)))
            .times(1)
            .returning(|_| Ok(U256::from(75_354)));
        oracle
            .expect_get_l2_output()
            .with(eq(U256::from(75_354)))
            .times(1)
            .returning(|_| {
                Ok(OutputProposal {
                    outputRoot: OUTPUT_ROOT,
                    timestamp: 1_709_887_860,
                    l2BlockNumber: OUTPUT_BLOCK as u128,
                })
            });

        let mut factory = MockDisputeGameFactory::new();
        factory.expect_game_count().times(0);
        factory.expect_find_latest_games().times(0);

        (portal, oracle, factory)
    }

    fn fault_proof_l1() -> (MockPortal, MockL2OutputOracle, MockDisputeGameFactory) {
        let mut portal = MockPortal::new();
        portal
            .expect_version()
            .times(1)
            .returning(|| Ok("3.0.0".to_string()));
        portal
            .expect_respected_game_type()
            .times(1)
            .returning(|| Ok(1));
        portal
            .expect_dispute_game_factory()
            .times(1)
            .returning(|| Ok(FACTORY));

        let mut oracle = MockL2OutputOracle::new();
        oracle.expect_get_l2_output_index_after().times(0);
        oracle.expect_get_l2_output().times(0);

        let mut factory = MockDisputeGameFactory::new();
        factory
            .expect_game_count()
            .with(eq(FACTORY))
            .times(1)
            .returning(|_| Ok(U256::from(1_200)));
        factory
            .expect_find_latest_games()
            .with(
                eq(FACTORY),
                eq(1),
                eq(U256::from(1_199)),
                eq(U256::from(100)),
            )
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![GameSearchResult {
                    index: U256::from(1_187),
                    metadata: B256::ZERO,
                    timestamp: U256::from(1_709_887_900),
                    rootClaim: OUTPUT_ROOT,
                    extraData: U256::from(OUTPUT_BLOCK).to_be_bytes::<32>().to_vec().into(),
                }])
            });

        (portal, oracle, factory)
    }

    fn prover(
        l1: (MockPortal, MockL2OutputOracle, MockDisputeGameFactory),
        l2: MockL2Client,
    ) -> WithdrawalProver<MockPortal, MockL2OutputOracle, MockDisputeGameFactory, MockL2Client> {
        let (portal, oracle, factory) = l1;
        WithdrawalProver::new(OutputResolver::new(portal, oracle, factory), l2)
    }

    fn assert_proof_contents(proof: &BedrockMessageProof) {
        assert_eq!(proof.low_level_message.gas_limit, U256::from(287_000));
        assert_eq!(
            proof.low_level_message.withdrawal_hash,
            proof.low_level_message.low_level_message_hash()
        );
        assert_eq!(proof.output_root_proof.version, B256::ZERO);
        assert_eq!(proof.output_root_proof.state_root, STATE_ROOT);
        assert_eq!(proof.output_root_proof.latest_block_hash, BLOCK_HASH);
        assert_eq!(
            proof.output_root_proof.message_passer_storage_root,
            b256!("5d0cd0b1dedff562ca66bde2d484cde0818facfceab8d743fdc08b3d1dc74f74")
        );
        assert_eq!(proof.output_root_proof.output_root(), OUTPUT_ROOT);

        let raw = &proof_fixture().storage_proof[0].proof;
        assert_eq!(proof.withdrawal_proof.len(), raw.len() + 1);
        assert_eq!(proof.withdrawal_proof.last(), Some(&bytes!("c4823f4501")));
    }

    #[tokio::test]
    async fn test_prove_legacy_never_touches_dispute_games() {
        let prover = prover(legacy_l1(), l2_client());
        let proof = prover.prove(TX_HASH).await.unwrap();

        assert_proof_contents(&proof);
        assert_eq!(proof.l2_output_index, U256::from(75_354));
    }

    #[tokio::test]
    async fn test_prove_with_fault_proofs_uses_dispute_games() {
        let prover = prover(fault_proof_l1(), l2_client());
        let proof = prover.prove(TX_HASH).await.unwrap();

        assert_proof_contents(&proof);
        assert_eq!(proof.l2_output_index, U256::from(1_187));
    }

    #[tokio::test]
    async fn test_missing_receipt() {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .times(1)
            .returning(|_| Ok(None));
        l2.expect_get_proof().times(0);
        l2.expect_header_by_number().times(0);

        let mut portal = MockPortal::new();
        portal.expect_version().times(0);
        let prover = prover(
            (
                portal,
                MockL2OutputOracle::new(),
                MockDisputeGameFactory::new(),
            ),
            l2,
        );

        let err = prover.prove(TX_HASH).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::FetchReceipt));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains(&TX_HASH.to_string()));
    }

    #[tokio::test]
    async fn test_receipt_without_withdrawal() {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .returning(|_| Ok(Some(receipt(vec![unrelated_log()]))));
        l2.expect_get_proof().times(0);

        let mut portal = MockPortal::new();
        portal.expect_version().times(0);
        let prover = prover(
            (
                portal,
                MockL2OutputOracle::new(),
                MockDisputeGameFactory::new(),
            ),
            l2,
        );

        let err = prover.prove(TX_HASH).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::FindMessage));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_undecodable_withdrawal_event() {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt().returning(|_| {
            let mut log = message_passed_log();
            log.data = log.data.slice(..16);
            Ok(Some(receipt(vec![log])))
        });

        let prover = prover(
            (
                MockPortal::new(),
                MockL2OutputOracle::new(),
                MockDisputeGameFactory::new(),
            ),
            l2,
        );

        let err = prover.prove(TX_HASH).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::DecodeMessage));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_resolver_failure_is_staged_and_retryable() {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .returning(|_| Ok(Some(receipt(vec![message_passed_log()]))));
        l2.expect_get_proof().times(0);

        let mut portal = MockPortal::new();
        portal
            .expect_version()
            .returning(|| Err(ClientError::network("version", "connection refused")));
        let prover = prover(
            (
                portal,
                MockL2OutputOracle::new(),
                MockDisputeGameFactory::new(),
            ),
            l2,
        );

        let err = prover.prove(TX_HASH).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::ResolveOutput));
        assert!(err.is_retryable());
        assert!(err.to_string().contains("9042540"));
    }

    #[tokio::test]
    async fn test_missing_header() {
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .returning(|_| Ok(Some(receipt(vec![message_passed_log()]))));
        l2.expect_get_proof()
            .returning(|_, _, _| Ok(proof_fixture()));
        l2.expect_header_by_number().returning(|_| Ok(None));

        let prover = prover(legacy_l1(), l2);
        let err = prover.prove(TX_HASH).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::FetchHeader));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_custom_message_passer() {
        let passer = address!("00000000000000000000000000000000000000aa");
        let mut l2 = MockL2Client::new();
        l2.expect_transaction_receipt()
            .returning(|_| Ok(Some(receipt(vec![message_passed_log()]))));
        l2.expect_get_proof()
            .withf(move |address, _, _| *address == passer)
            .times(1)
            .returning(|_, _, _| Ok(proof_fixture()));
        l2.expect_header_by_number().returning(|number| {
            Ok(Some(L2Header {
                hash: BLOCK_HASH,
                number,
                state_root: STATE_ROOT,
            }))
        });

        let prover = prover(legacy_l1(), l2).with_message_passer(passer);
        assert!(prover.prove(TX_HASH).await.is_ok());
    }

    /// Node that never answers.
    struct StalledL2;

    #[async_trait]
    impl L2Client for StalledL2 {
        async fn transaction_receipt(
            &self,
            _tx_hash: B256,
        ) -> Result<Option<L2Receipt>, ClientError> {
            time::sleep(Duration::from_secs(3_600)).await;
            Ok(None)
        }

        async fn get_proof(
            &self,
            _address: Address,
            _storage_keys: Vec<B256>,
            _block_number: u64,
        ) -> Result<AccountProofResponse, ClientError> {
            Err(ClientError::rpc("eth_getProof", "unreachable"))
        }

        async fn header_by_number(
            &self,
            _block_number: u64,
        ) -> Result<Option<L2Header>, ClientError> {
            Ok(None)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let resolver = OutputResolver::new(
            MockPortal::new(),
            MockL2OutputOracle::new(),
            MockDisputeGameFactory::new(),
        );
        let prover = WithdrawalProver::new(resolver, StalledL2);

        let err = prover
            .prove_with_timeout(TX_HASH, Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, ProverError::DeadlineExceeded(_)));
        assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
        assert!(err.is_retryable());
    }
}

//! ABI definitions of the contract items the prover reads or produces.
//!
//! Only plain types live here. RPC-bound contract interfaces are generated next to the client
//! that calls them.

use alloy_sol_types::sol;

sol! {
    /// Emitted by the L2ToL1MessagePasser for every initiated withdrawal.
    #[derive(Debug, PartialEq, Eq)]
    event MessagePassed(
        uint256 indexed nonce,
        address indexed sender,
        address indexed target,
        uint256 value,
        uint256 gasLimit,
        bytes data,
        bytes32 withdrawalHash
    );

    #[derive(Debug, PartialEq, Eq)]
    struct WithdrawalTransaction {
        uint256 nonce;
        address sender;
        address target;
        uint256 value;
        uint256 gasLimit;
        bytes data;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OutputRootProof {
        bytes32 version;
        bytes32 stateRoot;
        bytes32 messagePasserStorageRoot;
        bytes32 latestBlockhash;
    }

    /// Output committed by the legacy L2OutputOracle.
    #[derive(Debug, PartialEq, Eq)]
    struct OutputProposal {
        bytes32 outputRoot;
        uint128 timestamp;
        uint128 l2BlockNumber;
    }

    /// Entry returned by `DisputeGameFactory.findLatestGames`.
    #[derive(Debug, PartialEq, Eq)]
    struct GameSearchResult {
        uint256 index;
        bytes32 metadata;
        uint256 timestamp;
        bytes32 rootClaim;
        bytes extraData;
    }

    function proveWithdrawalTransaction(
        WithdrawalTransaction _tx,
        uint256 _l2OutputIndex,
        OutputRootProof _outputRootProof,
        bytes[] _withdrawalProof
    );
}

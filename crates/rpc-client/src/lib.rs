//! Chain clients backing the prover's collaborator traits with alloy providers.
//!
//! [`L1ContractsClient`] reads the portal, output oracle and dispute game factory through typed
//! contract bindings. [`L2RpcClient`] issues raw `eth_*` requests to the L2 node and decodes them
//! into the prover's wire types.

mod errors;
mod l1;
mod l2;

pub use l1::L1ContractsClient;
pub use l2::L2RpcClient;

//! Chain-read capabilities the prover depends on.

mod error;
mod l1;
mod l2;

pub use error::ClientError;
#[cfg(any(test, feature = "test-utils"))]
pub use l1::{MockDisputeGameFactory, MockL2OutputOracle, MockPortal};
pub use l1::{DisputeGameFactory, L2OutputOracle, Portal};
#[cfg(any(test, feature = "test-utils"))]
pub use l2::MockL2Client;
pub use l2::L2Client;

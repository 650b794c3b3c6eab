//! Chain-level constants.

use alloy_primitives::{address, Address, B256};

/// L2ToL1MessagePasser predeploy, identical on every OP-stack chain.
pub const MESSAGE_PASSER_ADDRESS: Address = address!("4200000000000000000000000000000000000016");

/// Output root version of the bedrock commitment scheme.
pub const OUTPUT_VERSION_V0: B256 = B256::ZERO;

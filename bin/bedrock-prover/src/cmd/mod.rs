pub(crate) mod fault_proofs;
pub(crate) mod prove;
pub(crate) mod resolve_output;

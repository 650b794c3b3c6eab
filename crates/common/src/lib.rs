//! Ambient plumbing shared by the withdrawal prover binaries.

pub mod logging;

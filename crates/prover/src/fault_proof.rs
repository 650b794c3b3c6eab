use semver::Version;
use tracing::debug;

use crate::{errors::Result, traits::Portal, ProverError};

/// First portal release that reads outputs from dispute games.
pub const FAULT_PROOF_PORTAL_VERSION: Version = Version::new(3, 0, 0);

/// Whether the portal verifies withdrawals against dispute games instead of the output oracle.
///
/// Compares semantic versions, so `"2.10.0"` is below `3.0.0` and a pre-release such as
/// `"3.0.0-rc.1"` is too. The answer is read from the chain on every call.
pub async fn is_fault_proof_active(portal: &impl Portal) -> Result<bool> {
    let raw = portal.version().await?;
    fault_proof_active_for(&raw)
}

/// Whether a portal reporting `version` verifies withdrawals against dispute games.
pub fn fault_proof_active_for(version: &str) -> Result<bool> {
    let parsed = Version::parse(version.trim())
        .map_err(|e| ProverError::parse(format!("portal version {version:?}: {e}")))?;

    let active = parsed >= FAULT_PROOF_PORTAL_VERSION;
    debug!(version = %parsed, active, "checked portal version");
    Ok(active)
}

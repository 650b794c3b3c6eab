use alloy_primitives::Address;
use serde::Serialize;

use super::{porcelain_field, Formattable};

/// Fault proof status of the configured portal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FaultProofStatus {
    pub(crate) portal: Address,
    pub(crate) portal_version: String,
    pub(crate) fault_proofs_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) respected_game_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) dispute_game_factory: Option<Address>,
}

impl Formattable for FaultProofStatus {
    fn format_porcelain(&self) -> String {
        let mut output = vec![
            porcelain_field("portal", self.portal),
            porcelain_field("portal_version", &self.portal_version),
            porcelain_field("fault_proofs_active", self.fault_proofs_active),
        ];
        if let Some(game_type) = self.respected_game_type {
            output.push(porcelain_field("respected_game_type", game_type));
        }
        if let Some(factory) = self.dispute_game_factory {
            output.push(porcelain_field("dispute_game_factory", factory));
        }
        output.join("\n")
    }
}

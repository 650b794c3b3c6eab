use thiserror::Error;

/// Errors returned by chain-read clients.
///
/// Every variant names the logical method that failed (`version`, `eth_getProof`, ...).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed before the node answered.
    #[error("network error in {method}: {message}")]
    Network { method: String, message: String },

    /// Node answered with an error, or the call reverted.
    #[error("rpc error in {method}: {message}")]
    Rpc { method: String, message: String },

    /// Node answered with something that does not decode.
    #[error("malformed response to {method}: {message}")]
    Decode { method: String, message: String },
}

impl ClientError {
    /// Creates a network error.
    pub fn network(method: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Creates an RPC error.
    pub fn rpc(method: impl Into<String>, message: impl ToString) -> Self {
        Self::Rpc {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Creates a decode error.
    pub fn decode(method: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Logical method name of the failed call.
    pub fn method(&self) -> &str {
        match self {
            Self::Network { method, .. } | Self::Rpc { method, .. } | Self::Decode { method, .. } => {
                method
            }
        }
    }
}

use alloy::{
    contract,
    transports::{RpcError, TransportError},
};
use bedrock_prover::traits::ClientError;

/// Classifies a transport failure of `method`.
pub(crate) fn transport_error(method: &str, err: TransportError) -> ClientError {
    match err {
        RpcError::Transport(kind) => ClientError::network(method, kind),
        RpcError::DeserError { err, .. } => ClientError::decode(method, err),
        other => ClientError::rpc(method, other),
    }
}

/// Classifies a failed contract call to `method`.
pub(crate) fn contract_error(method: &str, err: contract::Error) -> ClientError {
    match err {
        contract::Error::TransportError(err) => transport_error(method, err),
        contract::Error::AbiError(err) => ClientError::decode(method, err),
        other => ClientError::rpc(method, other),
    }
}

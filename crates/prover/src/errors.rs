use std::{fmt, time::Duration};

use bedrock_mpt::RlpTreeError;
use bedrock_primitives::MessageDecodeError;
use thiserror::Error;

use crate::traits::ClientError;

/// Broad classification of a [`ProverError`], stable across stage wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A trie node did not decode or re-encode.
    MalformedRlp,
    /// Transport or node-side failure.
    Rpc,
    /// The requested receipt, event, output or game does not exist.
    NotFound,
    /// A version string or numeric field could not be parsed.
    Parse,
    /// The proof did not complete within its deadline.
    DeadlineExceeded,
}

/// Step of the proving pipeline an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchReceipt,
    FindMessage,
    DecodeMessage,
    ResolveOutput,
    FetchStateProof,
    FetchHeader,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::FetchReceipt => "fetch receipt",
            Stage::FindMessage => "find message",
            Stage::DecodeMessage => "decode message",
            Stage::ResolveOutput => "resolve output",
            Stage::FetchStateProof => "fetch state proof",
            Stage::FetchHeader => "fetch header",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("malformed rlp: {0}")]
    MalformedRlp(#[from] RlpTreeError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid withdrawal event: {0}")]
    Decode(#[from] MessageDecodeError),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("{stage} ({context}): {source}")]
    Stage {
        stage: Stage,
        context: String,
        #[source]
        source: Box<ProverError>,
    },
}

impl ProverError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProverError::MalformedRlp(_) => ErrorKind::MalformedRlp,
            ProverError::Client(ClientError::Decode { .. }) => ErrorKind::Parse,
            ProverError::Client(_) => ErrorKind::Rpc,
            ProverError::NotFound(_) => ErrorKind::NotFound,
            ProverError::Parse(_) | ProverError::Decode(_) => ErrorKind::Parse,
            ProverError::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            ProverError::Stage { source, .. } => source.kind(),
        }
    }

    /// Whether the same call may succeed when retried later.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Rpc | ErrorKind::DeadlineExceeded)
    }

    /// The pipeline stage this error was raised in, if it went through one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ProverError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Attaches the pipeline stage and the identifiers involved to an error.
pub(crate) trait WithStage<T> {
    fn stage(self, stage: Stage, context: impl FnOnce() -> String) -> Result<T, ProverError>;
}

impl<T, E: Into<ProverError>> WithStage<T> for Result<T, E> {
    fn stage(self, stage: Stage, context: impl FnOnce() -> String) -> Result<T, ProverError> {
        self.map_err(|e| ProverError::Stage {
            stage,
            context: context(),
            source: Box::new(e.into()),
        })
    }
}

pub(crate) type Result<T, E = ProverError> = std::result::Result<T, E>;

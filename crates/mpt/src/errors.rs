use thiserror::Error;

/// Errors raised while decoding or re-encoding trie nodes.
#[derive(Debug, Error)]
pub enum RlpTreeError {
    /// Input is not valid RLP (bad length prefix, truncated stream, non-canonical form).
    #[error("invalid rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    /// A complete item was decoded but bytes remain after it.
    #[error("invalid rlp: {0} trailing bytes after top-level item")]
    TrailingBytes(usize),

    /// Lists nest deeper than any trie node does.
    #[error("invalid rlp: lists nested deeper than {0} levels")]
    TooDeep(usize),

    /// An embedded node selected for re-encoding does not have the leaf/extension shape.
    #[error("embedded node has {children} children, expected 2 terminal children")]
    MalformedEmbeddedNode { children: usize },
}

use alloy_rlp::{Buf, Header, EMPTY_STRING_CODE};

use crate::errors::RlpTreeError;

/// Deepest list nesting [`RlpNode::decode`] accepts. Trie nodes nest at most a few levels.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A decoded RLP item.
///
/// Terminal byte strings keep the raw item bytes with exactly the first byte removed. For short
/// strings that is the payload itself; a single byte below `0x80` has no prefix and is kept as is;
/// long strings keep their length-of-length bytes in front of the payload. Proof verifiers
/// downstream compare fields against this representation, so it must not be "fixed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpNode {
    /// A byte string.
    Terminal(Vec<u8>),

    /// A list of items, in encoding order.
    Composite(Vec<RlpNode>),
}

impl RlpNode {
    /// Decodes a single RLP item spanning the whole input.
    pub fn decode(input: &[u8]) -> Result<Self, RlpTreeError> {
        let mut buf = input;
        let node = decode_item(&mut buf, 0)?;
        if !buf.is_empty() {
            return Err(RlpTreeError::TrailingBytes(buf.len()));
        }
        Ok(node)
    }

    /// Returns the terminal bytes, or `None` for a list.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            RlpNode::Terminal(data) => Some(data),
            RlpNode::Composite(_) => None,
        }
    }

    /// Returns the list children, or `None` for a byte string.
    pub fn children(&self) -> Option<&[RlpNode]> {
        match self {
            RlpNode::Terminal(_) => None,
            RlpNode::Composite(children) => Some(children),
        }
    }

    /// Whether this is a byte string.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RlpNode::Terminal(_))
    }
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpNode, RlpTreeError> {
    let item_start = *buf;

    // Single bytes below the string offset are their own encoding.
    if let Some(&byte) = item_start.first() {
        if byte < EMPTY_STRING_CODE {
            buf.advance(1);
            return Ok(RlpNode::Terminal(vec![byte]));
        }
    }

    let header = Header::decode(buf)?;
    let header_len = item_start.len() - buf.len();

    if header.list {
        if depth >= MAX_NESTING_DEPTH {
            return Err(RlpTreeError::TooDeep(MAX_NESTING_DEPTH));
        }
        let mut payload = &buf[..header.payload_length];
        buf.advance(header.payload_length);

        let mut children = Vec::new();
        while !payload.is_empty() {
            children.push(decode_item(&mut payload, depth + 1)?);
        }
        return Ok(RlpNode::Composite(children));
    }

    let raw = &item_start[..header_len + header.payload_length];
    buf.advance(header.payload_length);
    Ok(RlpNode::Terminal(raw[1..].to_vec()))
}

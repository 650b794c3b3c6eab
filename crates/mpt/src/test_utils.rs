//! RLP tree generators shared by the property tests.

use alloy_rlp::{Encodable, Header, EMPTY_STRING_CODE};
use proptest::prelude::*;

use crate::RlpNode;

/// An RLP item before encoding.
#[derive(Debug, Clone)]
pub(crate) enum Item {
    Str(Vec<u8>),
    List(Vec<Item>),
}

impl Item {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Item::Str(bytes) => bytes.as_slice().encode(&mut out),
            Item::List(children) => {
                let payload: Vec<u8> = children.iter().flat_map(Item::encode).collect();
                Header {
                    list: true,
                    payload_length: payload.len(),
                }
                .encode(&mut out);
                out.extend(payload);
            }
        }
        out
    }

    /// The node [`RlpNode::decode`] yields for this item's encoding.
    pub(crate) fn expected_node(&self) -> RlpNode {
        match self {
            Item::Str(bytes) if bytes.len() == 1 && bytes[0] < EMPTY_STRING_CODE => {
                RlpNode::Terminal(bytes.clone())
            }
            Item::Str(_) => RlpNode::Terminal(self.encode()[1..].to_vec()),
            Item::List(children) => {
                RlpNode::Composite(children.iter().map(Item::expected_node).collect())
            }
        }
    }
}

/// Byte strings up to 80 bytes, covering both the short and the long string forms.
pub(crate) fn arb_str() -> impl Strategy<Value = Item> {
    prop::collection::vec(any::<u8>(), 0..80).prop_map(Item::Str)
}

/// Trees of up to four list levels, up to 17 children per list.
pub(crate) fn arb_item() -> impl Strategy<Value = Item> {
    arb_str().prop_recursive(4, 64, 17, |inner| {
        prop::collection::vec(inner, 0..=17).prop_map(Item::List)
    })
}

/// `depth` nested lists around an empty list, built without recursion.
pub(crate) fn nested_lists(depth: usize) -> Vec<u8> {
    let mut headers = Vec::with_capacity(depth);
    let mut len = 1;
    for _ in 0..depth {
        let mut header = Vec::new();
        Header {
            list: true,
            payload_length: len,
        }
        .encode(&mut header);
        len += header.len();
        headers.push(header);
    }

    let mut out: Vec<u8> = headers.into_iter().rev().flatten().collect();
    out.push(0xc0);
    out
}

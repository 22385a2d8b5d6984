use serde_json::json;

use crate::{LeafType, Salt, SaltedLeaf, TypedValue};

/// `{type: "string", name: "a", value: "hello"}` with a pinned salt of `0x0707..07`
pub fn hello_leaf() -> SaltedLeaf {
    TypedValue::new(LeafType::String, "a", json!("hello")).with_salt(Salt::from_bytes([0x07; 32]))
}

// 0: string "alice"
// 1: uint8 42
// 2: address
pub fn three_leaves() -> Vec<SaltedLeaf> {
    vec![
        TypedValue::new(LeafType::String, "name", json!("alice"))
            .with_salt(Salt::from_bytes([0x01; 32])),
        TypedValue::new(LeafType::Uint8, "age", json!(42)).with_salt(Salt::from_bytes([0x02; 32])),
        TypedValue::new(
            LeafType::Address,
            "wallet",
            json!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
        )
        .with_salt(Salt::from_bytes([0x03; 32])),
    ]
}

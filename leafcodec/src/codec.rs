//! The mapping between user-facing [`SaltedLeaf`]s and the [`EncodedLeaf`]s hashed into a tree

use crate::{abi, EncodedLeaf, Result, Salt, SaltedLeaf, TypedValue};

/// Attach a freshly drawn [`Salt`] to every value
///
/// Every call draws new salts, so salting the same values twice produces a different tree
#[must_use]
pub fn assign_salts(values: impl IntoIterator<Item = TypedValue>) -> Vec<SaltedLeaf> {
    values
        .into_iter()
        .map(|value| value.with_salt(Salt::random()))
        .collect()
}

/// ABI-encode a single leaf
pub fn encode_leaf(leaf: &SaltedLeaf) -> Result<EncodedLeaf> {
    Ok(EncodedLeaf {
        leaf_type: leaf.leaf_type(),
        name: leaf.name().to_string(),
        value: abi::encode_value(leaf.leaf_type(), leaf.value())?,
        salt: leaf.salt,
    })
}

/// ABI-encode every leaf, preserving order
///
/// Stops at the first value that can't be coerced to its declared type
pub fn encode_leaves(leaves: &[SaltedLeaf]) -> Result<Vec<EncodedLeaf>> {
    leaves.iter().map(encode_leaf).collect()
}

/// Decode a single leaf
///
/// The result is unchecked, since selection is not part of what gets committed
pub fn decode_leaf(leaf: &EncodedLeaf) -> Result<SaltedLeaf> {
    let value = abi::decode_value(leaf.leaf_type, &leaf.value)?;

    Ok(TypedValue::new(leaf.leaf_type, leaf.name.clone(), value).with_salt(leaf.salt))
}

/// Decode every leaf, preserving order
pub fn decode_leaves(leaves: &[EncodedLeaf]) -> Result<Vec<SaltedLeaf>> {
    leaves.iter().map(decode_leaf).collect()
}

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::B256;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{hash::parse_hex_32, Error};

#[cfg(any(test, feature = "proptest"))]
mod proptest_impls;

/// The type of a single value committed to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafType {
    /// A UTF-8 string
    String,
    /// `true` or `false`
    Bool,
    /// An 8-bit unsigned integer
    Uint8,
    /// A 32-bit unsigned integer
    Uint32,
    /// A 64-bit unsigned integer
    Uint64,
    /// A 256-bit unsigned integer
    Uint256,
    /// A 20-byte Ethereum address
    Address,
    /// Exactly 32 bytes
    Bytes32,
    /// Arbitrary-length bytes
    Bytes,
}

impl LeafType {
    /// Every supported type, in the order they are usually presented
    pub const ALL: [LeafType; 9] = [
        LeafType::String,
        LeafType::Bool,
        LeafType::Uint8,
        LeafType::Uint32,
        LeafType::Uint64,
        LeafType::Uint256,
        LeafType::Address,
        LeafType::Bytes32,
        LeafType::Bytes,
    ];

    /// The ABI name of this type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LeafType::String => "string",
            LeafType::Bool => "bool",
            LeafType::Uint8 => "uint8",
            LeafType::Uint32 => "uint32",
            LeafType::Uint64 => "uint64",
            LeafType::Uint256 => "uint256",
            LeafType::Address => "address",
            LeafType::Bytes32 => "bytes32",
            LeafType::Bytes => "bytes",
        }
    }

    /// The bit width of an unsigned integer type, or `None` for any other type
    #[must_use]
    pub const fn uint_bits(&self) -> Option<usize> {
        match self {
            LeafType::Uint8 => Some(8),
            LeafType::Uint32 => Some(32),
            LeafType::Uint64 => Some(64),
            LeafType::Uint256 => Some(256),
            _ => None,
        }
    }
}

impl Display for LeafType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unsupported leaf type {s:?}"))
    }
}

/// A random 32-byte nonce committed alongside each leaf
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salt([u8; 32]);

impl Salt {
    /// Draw a fresh salt from the operating system's secure random source
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create a [`Salt`] with fixed bytes
    ///
    /// Only useful for reproducible fixtures, real trees should use [`Salt::random`]
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of this salt
    #[inline]
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({self})")
    }
}

impl Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Salt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_32(s).map(Self)
    }
}

impl Serialize for Salt {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A value as entered by a user: a declared type, a name, the value itself, and whether it is
/// selected for the next proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    /// The declared type of `value`
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
    /// A free-form label
    pub name: String,
    /// The value, interpreted according to `leaf_type`
    pub value: serde_json::Value,
    /// Whether this value is selected for proving
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

impl TypedValue {
    /// Create a new, unchecked [`TypedValue`]
    pub fn new(leaf_type: LeafType, name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            leaf_type,
            name: name.into(),
            value,
            checked: false,
        }
    }

    /// The same value, marked as selected for proving
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Attach a salt to this value
    #[must_use]
    pub fn with_salt(self, salt: Salt) -> SaltedLeaf {
        SaltedLeaf { typed: self, salt }
    }
}

impl Default for TypedValue {
    fn default() -> Self {
        Self::new(LeafType::String, "", serde_json::Value::String(String::new()))
    }
}

/// A [`TypedValue`] with the salt it was committed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaltedLeaf {
    /// The typed value
    #[serde(flatten)]
    pub typed: TypedValue,
    /// The salt committed alongside the value
    pub salt: Salt,
}

impl SaltedLeaf {
    /// The declared type of the value
    #[inline]
    #[must_use]
    pub fn leaf_type(&self) -> LeafType {
        self.typed.leaf_type
    }

    /// The name of the value
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.typed.name
    }

    /// The value itself
    #[inline]
    #[must_use]
    pub fn value(&self) -> &serde_json::Value {
        &self.typed.value
    }
}

/// A leaf in the exact shape that is hashed into the tree:
/// `(type, name, abi_encoded_value, salt)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedLeaf {
    /// The declared type of the value
    pub leaf_type: LeafType,
    /// The name of the value
    pub name: String,
    /// The value, ABI-encoded as a single-element tuple of `leaf_type`
    pub value: Vec<u8>,
    /// The salt committed alongside the value
    pub salt: Salt,
}

impl EncodedLeaf {
    /// The fields of this leaf as ABI values, in schema order
    #[must_use]
    pub fn to_sol_fields(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::String(self.leaf_type.as_str().to_string()),
            DynSolValue::String(self.name.clone()),
            DynSolValue::Bytes(self.value.clone()),
            DynSolValue::FixedBytes(B256::from(self.salt.to_bytes()), 32),
        ]
    }
}

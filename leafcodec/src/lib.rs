#![warn(clippy::pedantic)]
#![deny(missing_docs)]

//! Salted, ABI-encoded Merkle leaves
//!
//! This library turns a list of user-declared typed values into the leaves of a Merkle tree,
//! builds multi-proofs over a selection of those leaves, and verifies them again. Every value is
//! ABI-encoded according to its declared type and committed alongside a random 32-byte salt, so
//! two independently published trees over the same data never share leaf hashes.
//!
//! ```rust
//! # use leafcodec::{codec, LeafTree, LeafType, Schema, TypedValue};
//! # use serde_json::json;
//! let rows = vec![
//!     TypedValue::new(LeafType::String, "name", json!("alice")),
//!     TypedValue::new(LeafType::Uint8, "age", json!(42)),
//! ];
//!
//! let salted = codec::assign_salts(rows);
//! let encoded = codec::encode_leaves(&salted).unwrap();
//! let tree = LeafTree::of(encoded, Schema::leaf()).unwrap();
//!
//! let proof = tree.multi_proof(&[1]).unwrap();
//! assert!(leafcodec::verify_multi_proof(&tree.root(), &Schema::leaf(), &proof).unwrap());
//! ```
//!
//! Trees sort their leaf hashes and hash node pairs in sorted order, the same way as the
//! `StandardMerkleTree` of `@openzeppelin/merkle-tree`, so roots and `proofFlags` multi-proofs are
//! interchangeable with it. ABI encoding is provided by [`alloy_dyn_abi`]. Types
//! provided by this library implement [`Arbitrary`], for use with [`proptest`], gated behind the
//! `proptest` feature flag.
//!
//! [`Arbitrary`]: proptest::prelude::Arbitrary

pub mod abi;
pub mod codec;
mod error;
pub mod export;
pub mod form;
pub mod hash;
mod leaf;
mod schema;
mod tree;
pub mod verify;

pub use error::{Error, Result};
pub use export::TreeExport;
pub use hash::Digest;
pub use leaf::{EncodedLeaf, LeafType, Salt, SaltedLeaf, TypedValue};
pub use schema::Schema;
pub use tree::{verify_multi_proof, LeafTree, MultiProof};

#[cfg(test)]
mod testing;

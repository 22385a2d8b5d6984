use crate::{hash::Digest, leaf::LeafType};

/// Shorthand for a [`Result`] with this crate's [`Error`]
///
/// [`Result`]: std::result::Result
pub type Result<T> = std::result::Result<T, Error>;

/// An error encountered while encoding, building, proving or verifying
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value could not be coerced to its declared type
    #[error("cannot encode {value} as {leaf_type}: {reason}")]
    Encoding {
        /// The declared type of the value
        leaf_type: LeafType,
        /// The offending value, rendered as JSON
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// ABI-encoded bytes could not be decoded as the declared type
    #[error("cannot decode ABI bytes as {leaf_type}: {reason}")]
    Decoding {
        /// The declared type of the value
        leaf_type: LeafType,
        /// Why the bytes were rejected
        reason: String,
    },

    /// An imported tree export was not valid
    #[error("malformed import payload")]
    MalformedImport(#[source] serde_json::Error),

    /// A schema contained a type string that is not a valid ABI type
    #[error("invalid schema type {ty:?}")]
    InvalidSchemaType {
        /// The type string
        ty: String,
        /// The underlying parse error
        #[source]
        source: alloy_dyn_abi::Error,
    },

    /// A leaf had a different number of fields than the schema
    #[error("leaf has {found} fields, but the schema has {expected}")]
    SchemaArity {
        /// The number of types in the schema
        expected: usize,
        /// The number of fields in the leaf
        found: usize,
    },

    /// A leaf field did not match the type at the same position in the schema
    #[error("leaf field {position} does not match schema type {expected}")]
    SchemaMismatch {
        /// The position of the field in the leaf
        position: usize,
        /// The schema type at that position
        expected: String,
    },

    /// Attempted to build a tree with no leaves
    #[error("cannot build a tree with no leaves")]
    EmptyTree,

    /// Attempted to prove an empty selection of leaves
    #[error("no leaves selected")]
    EmptySelection,

    /// A leaf index was outside of the tree
    #[error("leaf index {index} is out of range for a tree with {len} leaves")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The number of leaves in the tree
        len: usize,
    },

    /// A multi-proof was internally inconsistent
    #[error("malformed proof: {0}")]
    ProofShape(&'static str),

    /// The root recomputed from an export's values didn't match the stored root
    #[error("root mismatch - stored: {stored}, computed: {computed}")]
    RootMismatch {
        /// The root stored in the export
        stored: Digest,
        /// The root computed from the export's values
        computed: Digest,
    },

    /// A hex string could not be parsed
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A JSON payload could not be parsed
    #[error("serde_json error")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn encoding(
        leaf_type: LeafType,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::Encoding {
            leaf_type,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

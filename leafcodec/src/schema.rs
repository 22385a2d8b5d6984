use alloy_dyn_abi::{DynSolType, DynSolValue};

use crate::{hash::Digest, EncodedLeaf, Error, Result};

/// The ABI types describing a leaf tuple
///
/// The same schema must be used to build a tree and to verify proofs against it. In practice
/// this is always [`Schema::leaf`], but a schema can be parsed from type strings so that a proof
/// can be checked against an explicitly provided one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    types: Vec<DynSolType>,
}

impl Schema {
    /// The type strings of [`Schema::leaf`]
    pub const LEAF_TYPES: [&'static str; 4] = ["string", "string", "bytes", "bytes32"];

    /// The schema of an [`EncodedLeaf`]: `(string type, string name, bytes value, bytes32 salt)`
    #[must_use]
    pub fn leaf() -> Self {
        Self {
            types: vec![
                DynSolType::String,
                DynSolType::String,
                DynSolType::Bytes,
                DynSolType::FixedBytes(32),
            ],
        }
    }

    /// Parse a schema from a list of ABI type strings
    ///
    /// ```rust
    /// # use leafcodec::Schema;
    /// let schema = Schema::parse(&Schema::LEAF_TYPES).unwrap();
    /// assert_eq!(schema, Schema::leaf());
    ///
    /// assert!(Schema::parse(&["strin"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(types: &[S]) -> Result<Self> {
        let types = types
            .iter()
            .map(|ty| {
                let ty = ty.as_ref();
                ty.parse::<DynSolType>()
                    .map_err(|source| Error::InvalidSchemaType {
                        ty: ty.to_string(),
                        source,
                    })
            })
            .collect::<Result<_>>()?;

        Ok(Self { types })
    }

    /// The type strings of this schema
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(DynSolType::sol_type_name).map(Into::into).collect()
    }

    /// ABI-encode the fields of `leaf` as a tuple of this schema's types
    ///
    /// Fails if the leaf doesn't have exactly one field per type, or if any field doesn't match
    /// the type at its position
    pub fn encode_leaf(&self, leaf: &EncodedLeaf) -> Result<Vec<u8>> {
        let fields = leaf.to_sol_fields();

        if fields.len() != self.types.len() {
            return Err(Error::SchemaArity {
                expected: self.types.len(),
                found: fields.len(),
            });
        }

        for (position, (ty, field)) in self.types.iter().zip(&fields).enumerate() {
            if !ty.matches(field) {
                return Err(Error::SchemaMismatch {
                    position,
                    expected: ty.sol_type_name().into_owned(),
                });
            }
        }

        Ok(DynSolValue::Tuple(fields).abi_encode_params())
    }

    /// The hash committed to the tree for `leaf`
    pub fn hash_leaf(&self, leaf: &EncodedLeaf) -> Result<Digest> {
        self.encode_leaf(leaf).map(|encoded| Digest::leaf(&encoded))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::leaf()
    }
}

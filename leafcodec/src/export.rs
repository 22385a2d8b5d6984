//! The serialized form of a tree: its root and every salted value it was built from
//!
//! ```json
//! { "root": "0x...", "values": [{ "type": "string", "name": "a", "value": "hello", "salt": "0x..." }] }
//! ```
//!
//! This is everything needed to rebuild the tree later to prove some of its leaves, or to hand
//! the whole tree to someone else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{codec, Digest, Error, LeafTree, MultiProof, Result, SaltedLeaf, Schema};

/// A tree root together with the salted values it commits to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeExport {
    /// The root hash of the tree built from `values`
    pub root: Digest,
    /// The salted values, in tree order
    pub values: Vec<SaltedLeaf>,
}

impl TreeExport {
    /// Build a tree from already-salted values
    pub fn build(values: Vec<SaltedLeaf>) -> Result<Self> {
        let tree = LeafTree::of(codec::encode_leaves(&values)?, Schema::leaf())?;

        Ok(Self {
            root: tree.root(),
            values,
        })
    }

    /// Parse an export from JSON
    ///
    /// ```rust
    /// # use leafcodec::{Error, TreeExport};
    /// let result = TreeExport::from_json(r#"{ "root": "0x00" }"#);
    /// assert!(matches!(result, Err(Error::MalformedImport(_))));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::MalformedImport)
    }

    /// Serialize this export to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild the tree from `values`, checking it still has the stored root
    pub fn tree(&self) -> Result<LeafTree> {
        let tree = LeafTree::of(codec::encode_leaves(&self.values)?, Schema::leaf())?;

        if tree.root() != self.root {
            return Err(Error::RootMismatch {
                stored: self.root,
                computed: tree.root(),
            });
        }

        Ok(tree)
    }

    /// The indices of the values flagged as checked
    #[must_use]
    pub fn checked_indices(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.typed.checked)
            .map(|(index, _)| index)
            .collect()
    }

    /// Prove the values at `indices`, with the proof's leaves decoded for display
    pub fn prove(&self, indices: &[usize]) -> Result<MultiProof<SaltedLeaf>> {
        let proof = self.tree()?.multi_proof(indices)?;
        debug!(root = %self.root, ?indices, "proving exported tree");

        proof.try_map_leaves(codec::decode_leaf)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::testing::{hello_leaf, three_leaves};

    #[test]
    fn export_json_shape() {
        let export = TreeExport::build(vec![hello_leaf()]).unwrap();

        let expected = json!({
            "root": "0x110907bd53018c32dcb7296b6d4083ecbfbb56273ed98a2c5ad60205f9560fa7",
            "values": [{
                "type": "string",
                "name": "a",
                "value": "hello",
                "salt": format!("0x{}", "07".repeat(32)),
            }],
        });

        assert_eq!(serde_json::to_value(&export).unwrap(), expected);
    }

    #[test]
    fn export_survives_json() {
        let export = TreeExport::build(three_leaves()).unwrap();
        let again = TreeExport::from_json(&export.to_json().unwrap()).unwrap();

        assert_eq!(again, export);
        assert_eq!(again.tree().unwrap().root(), export.root);
    }

    #[test]
    fn malformed_imports() {
        let cases = [
            "not json",
            r#"{ "values": [] }"#,
            r#"{ "root": "0x1234", "values": [] }"#,
            r#"{ "root": "0x0000000000000000000000000000000000000000000000000000000000000000",
                 "values": [{ "type": "int8", "name": "", "value": 1, "salt": "0x00" }] }"#,
            r#"{ "root": "0x0000000000000000000000000000000000000000000000000000000000000000",
                 "values": [{ "type": "uint8", "name": "", "value": 1 }] }"#,
        ];

        for case in cases {
            assert!(
                matches!(TreeExport::from_json(case), Err(Error::MalformedImport(_))),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn import_of_a_saved_tree() {
        let saved = json!({
            "root": "0xaff6f4eb22503e9bc89c4da656fa13653a28896d6b5f85f108a5aa8a48c88caa",
            "values": [
                {
                    "type": "string",
                    "name": "name",
                    "value": "alice",
                    "salt": format!("0x{}", "01".repeat(32)),
                    "checked": true,
                },
                {
                    "type": "uint8",
                    "name": "age",
                    "value": { "type": "BigNumber", "hex": "0x2a" },
                    "salt": format!("0x{}", "02".repeat(32)),
                },
                {
                    "type": "address",
                    "name": "wallet",
                    "value": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
                    "salt": format!("0x{}", "03".repeat(32)),
                    "checked": true,
                },
            ],
        });

        let export = TreeExport::from_json(&saved.to_string()).unwrap();
        assert_eq!(export.tree().unwrap().root(), export.root);

        let proof = export.prove(&export.checked_indices()).unwrap();
        let expected = json!({
            "leaves": [
                {
                    "type": "string",
                    "name": "name",
                    "value": "alice",
                    "salt": format!("0x{}", "01".repeat(32)),
                },
                {
                    "type": "address",
                    "name": "wallet",
                    "value": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                    "salt": format!("0x{}", "03".repeat(32)),
                },
            ],
            "proof": ["0x50e0eb4d6681e13941811e708af39568067f61bb65a50dc70c533af6a56c1840"],
            "proofFlags": [false, true],
        });

        assert_eq!(serde_json::to_value(&proof).unwrap(), expected);
    }

    #[test]
    fn tampered_root_is_detected() {
        let mut export = TreeExport::build(three_leaves()).unwrap();
        export.root = Digest::from_bytes([0; 32]);

        assert!(matches!(export.tree(), Err(Error::RootMismatch { .. })));
    }

    #[test]
    fn checked_values_are_selected() {
        let mut values = three_leaves();
        values[0].typed.checked = true;
        values[2].typed.checked = true;

        let export = TreeExport::build(values).unwrap();
        assert_eq!(export.checked_indices(), vec![0, 2]);

        let proof = export.prove(&export.checked_indices()).unwrap();
        let names: Vec<_> = proof.leaves.iter().map(SaltedLeaf::name).collect();

        assert_eq!(names, vec!["name", "wallet"]);
        assert!(proof.leaves.iter().all(|leaf| !leaf.typed.checked));
    }

    #[test]
    fn proof_json_shape() {
        let export = TreeExport::build(vec![hello_leaf()]).unwrap();
        let proof = export.prove(&[0]).unwrap();

        let expected = json!({
            "leaves": [{
                "type": "string",
                "name": "a",
                "value": "hello",
                "salt": format!("0x{}", "07".repeat(32)),
            }],
            "proof": [],
            "proofFlags": [],
        });

        assert_eq!(serde_json::to_value(&proof).unwrap(), expected);
    }
}

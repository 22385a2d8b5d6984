use std::{collections::VecDeque, fmt::Debug};

use tracing::debug;

use crate::{hash::Digest, EncodedLeaf, Error, Result, Schema};

mod proof;
pub use proof::{verify_multi_proof, MultiProof};


/// A Merkle tree over a list of [`EncodedLeaf`]s
///
/// Leaf hashes are sorted before being laid out, and the tree is stored as a complete binary tree
/// in a flat array: the root is node `0`, the children of node `i` are `2i + 1` and `2i + 2`, and
/// the leaves fill the end of the array. Interior nodes use [`Digest::hash_pair`]. This matches
/// the `StandardMerkleTree` of `@openzeppelin/merkle-tree`, so roots and proofs are
/// interchangeable with it.
///
/// Leaves are still addressed by their index in the input list, whatever their position in the
/// tree
///
/// ```rust
/// # use leafcodec::{codec, LeafTree, LeafType, Schema, TypedValue};
/// # use serde_json::json;
/// let salted = codec::assign_salts([
///     TypedValue::new(LeafType::String, "a", json!("hello")),
///     TypedValue::new(LeafType::Bool, "b", json!(false)),
/// ]);
/// let tree = LeafTree::of(codec::encode_leaves(&salted).unwrap(), Schema::leaf()).unwrap();
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.leaves()[1].name, "b");
/// ```
pub struct LeafTree {
    /// Every node, root first
    nodes: Vec<Digest>,
    /// The leaves, in input order
    leaves: Vec<EncodedLeaf>,
    /// `node_of[i]` is the node holding the hash of `leaves[i]`
    node_of: Vec<usize>,
    /// The leaf indices in sorted hash order, so the leaf at node `n` is
    /// `sorted[nodes.len() - 1 - n]`
    sorted: Vec<usize>,
    schema: Schema,
}

impl Debug for LeafTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafTree")
            .field("root", &self.root())
            .field("leaves", &self.leaves)
            .finish_non_exhaustive()
    }
}

const fn left_child(node: usize) -> usize {
    2 * node + 1
}

const fn right_child(node: usize) -> usize {
    2 * node + 2
}

const fn parent(node: usize) -> usize {
    (node - 1) / 2
}

const fn sibling(node: usize) -> usize {
    if node % 2 == 0 {
        node - 1
    } else {
        node + 1
    }
}

impl LeafTree {
    /// Build a tree from `leaves`, hashing each one according to `schema`
    ///
    /// Building is deterministic, and since leaf hashes are sorted, the root doesn't depend on the
    /// order of `leaves`
    pub fn of(leaves: Vec<EncodedLeaf>, schema: Schema) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::EmptyTree);
        }

        let hashes = leaves
            .iter()
            .map(|leaf| schema.hash_leaf(leaf))
            .collect::<Result<Vec<_>>>()?;

        // stable, so equal hashes keep their input order
        let mut sorted: Vec<usize> = (0..leaves.len()).collect();
        sorted.sort_by_key(|&index| hashes[index]);

        let mut nodes = vec![Digest::default(); 2 * leaves.len() - 1];
        let mut node_of = vec![0; leaves.len()];

        for (position, &index) in sorted.iter().enumerate() {
            let node = nodes.len() - 1 - position;
            nodes[node] = hashes[index];
            node_of[index] = node;
        }

        for node in (0..nodes.len() - leaves.len()).rev() {
            nodes[node] = Digest::hash_pair(&nodes[left_child(node)], &nodes[right_child(node)]);
        }

        let tree = Self {
            nodes,
            leaves,
            node_of,
            sorted,
            schema,
        };

        debug!(root = %tree.root(), leaves = tree.len(), "built leaf tree");

        Ok(tree)
    }

    /// The root hash of the tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> Digest {
        self.nodes[0]
    }

    /// The leaves of the tree, in input order
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[EncodedLeaf] {
        &self.leaves
    }

    /// The schema the leaves were hashed with
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The number of leaves in the tree
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always `false`, a tree can't be built without leaves
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Generate a proof that the leaves at `indices` are part of this tree
    ///
    /// Indices refer to the input order, may be given in any order, and may repeat. The proof
    /// lists each selected leaf once, ordered by descending position in the tree.
    pub fn multi_proof(&self, indices: &[usize]) -> Result<MultiProof<EncodedLeaf>> {
        if indices.is_empty() {
            return Err(Error::EmptySelection);
        }

        let mut selected = indices
            .iter()
            .map(|&index| {
                self.node_of
                    .get(index)
                    .copied()
                    .ok_or(Error::IndexOutOfBounds {
                        index,
                        len: self.len(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        selected.sort_unstable_by(|a, b| b.cmp(a));
        selected.dedup();

        let mut stack: VecDeque<usize> = selected.iter().copied().collect();
        let mut proof = Vec::new();
        let mut proof_flags = Vec::new();

        while let Some(node) = stack.pop_front() {
            if node == 0 {
                break;
            }

            if stack.front() == Some(&sibling(node)) {
                stack.pop_front();
                proof_flags.push(true);
            } else {
                proof.push(self.nodes[sibling(node)]);
                proof_flags.push(false);
            }

            stack.push_back(parent(node));
        }

        let leaves = selected
            .iter()
            .map(|&node| self.leaves[self.sorted[self.nodes.len() - 1 - node]].clone())
            .collect();

        debug!(root = %self.root(), ?indices, "generated multi-proof");

        Ok(MultiProof {
            leaves,
            proof,
            proof_flags,
        })
    }
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{hash::Digest, EncodedLeaf, Error, Result, Schema};

/// A proof that several leaves are all members of the same tree
///
/// `L` is the leaf representation: [`EncodedLeaf`] when handed to [`verify_multi_proof`], and
/// usually [`SaltedLeaf`] when shown to a user or serialized.
///
/// ```json
/// { "leaves": [...], "proof": ["0x..."], "proofFlags": [false, true] }
/// ```
///
/// [`SaltedLeaf`]: crate::SaltedLeaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiProof<L> {
    /// The proven leaves, deepest first
    pub leaves: Vec<L>,
    /// The sibling hashes needed to recompute the root, in the order they are consumed
    pub proof: Vec<Digest>,
    /// One flag per hashing step: `true` pairs two computed hashes, `false` takes the next hash
    /// from `proof`
    pub proof_flags: Vec<bool>,
}

impl<L> MultiProof<L> {
    /// Convert every leaf with `f`, keeping the rest of the proof
    pub fn try_map_leaves<M, F>(&self, f: F) -> Result<MultiProof<M>>
    where
        F: FnMut(&L) -> Result<M>,
    {
        Ok(MultiProof {
            leaves: self.leaves.iter().map(f).collect::<Result<_>>()?,
            proof: self.proof.clone(),
            proof_flags: self.proof_flags.clone(),
        })
    }

    /// Check the proof is internally consistent
    ///
    /// This doesn't say anything about whether the proof is valid, only that it's well-formed
    /// enough to be checked
    pub fn check_shape(&self) -> Result<()> {
        if self.leaves.is_empty() {
            return Err(Error::ProofShape("proof has no leaves"));
        }

        let from_proof = self.proof_flags.iter().filter(|&&flag| !flag).count();
        if self.proof.len() < from_proof {
            return Err(Error::ProofShape("too few proof hashes for the flags"));
        }

        if self.leaves.len() + self.proof.len() != self.proof_flags.len() + 1 {
            return Err(Error::ProofShape(
                "leaf and proof hash count don't match the flags",
            ));
        }

        Ok(())
    }
}

/// Verify that every leaf in `proof` is a member of the tree with the given `root`
///
/// Returns `Ok(false)` for a well-formed proof that doesn't match `root`, and an error if the
/// proof is malformed or its leaves don't match `schema`
pub fn verify_multi_proof(
    root: &Digest,
    schema: &Schema,
    proof: &MultiProof<EncodedLeaf>,
) -> Result<bool> {
    proof.check_shape()?;

    let mut stack = proof
        .leaves
        .iter()
        .map(|leaf| schema.hash_leaf(leaf))
        .collect::<Result<VecDeque<_>>>()?;
    let mut hashes = proof.proof.iter().copied();

    for &flag in &proof.proof_flags {
        let a = stack.pop_front();
        let b = if flag {
            stack.pop_front()
        } else {
            hashes.next()
        };

        let (Some(a), Some(b)) = (a, b) else {
            return Err(Error::ProofShape("flags consume more hashes than available"));
        };

        stack.push_back(Digest::hash_pair(&a, &b));
    }

    let Some(computed) = stack.pop_back().or_else(|| hashes.next()) else {
        return Err(Error::ProofShape("proof doesn't produce a root"));
    };

    let verified = computed == *root;

    debug!(%root, %computed, leaves = proof.leaves.len(), verified, "verified multi-proof");

    Ok(verified)
}

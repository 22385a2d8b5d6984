//! Verification of proofs received from someone else
//!
//! This is the boundary where untrusted input (a root typed in by hand, and a proof pasted as
//! JSON) meets the tree. Anything that stops the proof from being checked at all is reported as
//! [`VerifyError::InvalidProofFormat`], and a proof that was checked but rejected is reported as
//! [`VerifyError::VerificationFailed`].

use tracing::{debug, warn};

use crate::{codec, verify_multi_proof, Digest, Error, MultiProof, SaltedLeaf, Schema};

/// Why a proof was not accepted
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The root or proof could not be parsed, or the proof is structurally invalid
    #[error("invalid proof format")]
    InvalidProofFormat(#[source] Error),

    /// The proof is well-formed, but does not prove membership in the tree with the given root
    #[error("proof verification failed")]
    VerificationFailed,
}

impl From<Error> for VerifyError {
    fn from(err: Error) -> Self {
        Self::InvalidProofFormat(err)
    }
}

/// Verify a JSON proof against a hex root
///
/// On success, returns the proven leaves, decoded
///
/// ```rust
/// # use leafcodec::verify::{verify_proof, VerifyError};
/// let result = verify_proof("0x1234", "{}");
/// assert!(matches!(result, Err(VerifyError::InvalidProofFormat(_))));
/// ```
pub fn verify_proof(root: &str, proof_json: &str) -> Result<Vec<SaltedLeaf>, VerifyError> {
    let root: Digest = root.trim().parse()?;
    let proof: MultiProof<SaltedLeaf> = serde_json::from_str(proof_json).map_err(Error::from)?;

    verify_decoded_proof(&root, &proof)
}

/// Verify a proof whose leaves are in their decoded form
///
/// The leaves are re-encoded before being checked, and decoded again on success, so the returned
/// leaves are normalized
pub fn verify_decoded_proof(
    root: &Digest,
    proof: &MultiProof<SaltedLeaf>,
) -> Result<Vec<SaltedLeaf>, VerifyError> {
    let encoded = proof.try_map_leaves(codec::encode_leaf)?;

    if !verify_multi_proof(root, &Schema::leaf(), &encoded)? {
        warn!(%root, "proof rejected");
        return Err(VerifyError::VerificationFailed);
    }

    debug!(%root, leaves = encoded.leaves.len(), "proof accepted");

    Ok(codec::decode_leaves(&encoded.leaves)?)
}

use derive_more::Display;
use leafcodec::verify::VerifyError;

use crate::errors::code::ErrorCode;

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum ReasonCode {
    #[display(fmt = "request/invalid-json")]
    RequestInvalidJson,

    #[display(fmt = "request/invalid-hex")]
    RequestInvalidHex,

    #[display(fmt = "route/not-found")]
    RouteNotFound,

    #[display(fmt = "leaf/encoding-failed")]
    LeafEncodingFailed,

    #[display(fmt = "leaf/decoding-failed")]
    LeafDecodingFailed,

    #[display(fmt = "tree/malformed")]
    TreeMalformed,

    #[display(fmt = "tree/empty")]
    TreeEmpty,

    #[display(fmt = "tree/root-mismatch")]
    TreeRootMismatch,

    #[display(fmt = "proof/empty-selection")]
    ProofEmptySelection,

    #[display(fmt = "proof/index-out-of-bounds")]
    ProofIndexOutOfBounds,

    #[display(fmt = "proof/invalid-format")]
    ProofInvalidFormat,

    #[display(fmt = "proof/verification-failed")]
    ProofVerificationFailed,

    #[display(fmt = "error/internal")]
    Internal,
}

impl ReasonCode {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReasonCode::RequestInvalidJson => ErrorCode::InvalidArgument,
            ReasonCode::RequestInvalidHex => ErrorCode::InvalidArgument,
            ReasonCode::RouteNotFound => ErrorCode::NotFound,
            ReasonCode::LeafEncodingFailed => ErrorCode::InvalidArgument,
            ReasonCode::LeafDecodingFailed => ErrorCode::InvalidArgument,
            ReasonCode::TreeMalformed => ErrorCode::InvalidArgument,
            ReasonCode::TreeEmpty => ErrorCode::InvalidArgument,
            ReasonCode::TreeRootMismatch => ErrorCode::FailedPrecondition,
            ReasonCode::ProofEmptySelection => ErrorCode::InvalidArgument,
            ReasonCode::ProofIndexOutOfBounds => ErrorCode::InvalidArgument,
            ReasonCode::ProofInvalidFormat => ErrorCode::InvalidArgument,
            ReasonCode::ProofVerificationFailed => ErrorCode::FailedPrecondition,
            ReasonCode::Internal => ErrorCode::Internal,
        }
    }

    pub fn from_leaf_error(err: &leafcodec::Error) -> Self {
        use leafcodec::Error;

        match err {
            Error::Encoding { .. } => ReasonCode::LeafEncodingFailed,
            Error::Decoding { .. } => ReasonCode::LeafDecodingFailed,
            Error::MalformedImport(_) | Error::Json(_) => ReasonCode::TreeMalformed,
            Error::EmptyTree => ReasonCode::TreeEmpty,
            Error::RootMismatch { .. } => ReasonCode::TreeRootMismatch,
            Error::EmptySelection => ReasonCode::ProofEmptySelection,
            Error::IndexOutOfBounds { .. } => ReasonCode::ProofIndexOutOfBounds,
            Error::ProofShape(_) => ReasonCode::ProofInvalidFormat,
            Error::InvalidHex(_) => ReasonCode::RequestInvalidHex,
            // the leaf schema is fixed, so these are never the caller's fault
            Error::InvalidSchemaType { .. }
            | Error::SchemaArity { .. }
            | Error::SchemaMismatch { .. } => ReasonCode::Internal,
        }
    }

    pub fn from_verify_error(err: &VerifyError) -> Self {
        match err {
            VerifyError::InvalidProofFormat(_) => ReasonCode::ProofInvalidFormat,
            VerifyError::VerificationFailed => ReasonCode::ProofVerificationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn reason_display() {
        assert_eq!(ReasonCode::ProofInvalidFormat.to_string(), "proof/invalid-format");
        assert_eq!(ReasonCode::LeafEncodingFailed.to_string(), "leaf/encoding-failed");
    }

    #[test]
    fn reason_status() {
        assert_eq!(
            ReasonCode::ProofInvalidFormat.code().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReasonCode::Internal.code().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn leaf_errors_map_to_reasons() {
        assert_eq!(
            ReasonCode::from_leaf_error(&leafcodec::Error::EmptySelection),
            ReasonCode::ProofEmptySelection
        );
        assert_eq!(
            ReasonCode::from_leaf_error(&leafcodec::Error::IndexOutOfBounds { index: 3, len: 3 }),
            ReasonCode::ProofIndexOutOfBounds
        );
        assert_eq!(
            ReasonCode::from_verify_error(&VerifyError::InvalidProofFormat(
                leafcodec::Error::ProofShape("proof has no leaves")
            )),
            ReasonCode::ProofInvalidFormat
        );
    }

    #[test]
    fn rejected_proof_is_not_a_server_fault() {
        let reason = ReasonCode::from_verify_error(&VerifyError::VerificationFailed);

        assert_eq!(reason, ReasonCode::ProofVerificationFailed);
        assert_eq!(reason.code().status_code(), StatusCode::BAD_REQUEST);
    }
}

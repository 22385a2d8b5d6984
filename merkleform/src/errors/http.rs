use std::{error::Error, fmt::Display};

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use leafcodec::verify::VerifyError;
use serde::Serialize;

use super::reason::ReasonCode;

#[derive(Debug)]
pub struct HTTPError {
    pub reason: ReasonCode,
    source: Option<Box<dyn Error>>,
}

#[derive(Serialize)]
pub struct ErrorOutput {
    error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    code: String,
    reason: String,
    message: String,
}

impl HTTPError {
    pub fn new(reason: ReasonCode, source: Option<Box<dyn Error>>) -> HTTPError {
        HTTPError { reason, source }
    }
}

impl Display for HTTPError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.reason.code(), self.reason)
    }
}

impl std::error::Error for HTTPError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref()
    }
}

impl actix_web::error::ResponseError for HTTPError {
    fn error_response(&self) -> HttpResponse {
        let error = ErrorOutput {
            error: ErrorDetail {
                code: self.reason.code().to_string(),
                reason: self.reason.to_string(),
                message: self
                    .source
                    .as_ref()
                    .map_or_else(|| self.reason.to_string(), ToString::to_string),
            },
        };

        match serde_json::to_string(&error) {
            Ok(body) => HttpResponse::build(self.status_code())
                .insert_header(ContentType::json())
                .body(body),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    fn status_code(&self) -> StatusCode {
        self.reason.code().status_code()
    }
}

impl From<leafcodec::Error> for HTTPError {
    fn from(err: leafcodec::Error) -> Self {
        HTTPError::new(ReasonCode::from_leaf_error(&err), Some(Box::new(err)))
    }
}

impl From<VerifyError> for HTTPError {
    fn from(err: VerifyError) -> Self {
        let reason = ReasonCode::from_verify_error(&err);

        match err {
            // keep the underlying error as the message
            VerifyError::InvalidProofFormat(source) => {
                HTTPError::new(reason, Some(Box::new(source)))
            }
            VerifyError::VerificationFailed => HTTPError::new(reason, Some(Box::new(err))),
        }
    }
}

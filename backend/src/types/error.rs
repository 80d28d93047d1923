//! Request failures and their mapping onto response envelopes

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ResponseEnvelope;
use crate::url_signer::SignerError;

/// Body returned when signing fails; deliberately generic
pub const SIGNING_FAILED_MESSAGE: &str = "Unable to generate URL";

/// Body message returned for a missing or unknown `methodType`
pub const UNRECOGNIZED_METHOD_MESSAGE: &str =
    "Unable to generate URL, Re-Check your Bucket/Object Name";

const MISSING_BODY_MESSAGE: &str = "Request body is required";
const MALFORMED_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// JSON error payload `{"Message": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    /// Human-readable message
    #[serde(rename = "Message")]
    pub message: String,
}

/// Everything that can go wrong while handling an invocation
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Body absent or blank
    #[error("request body is missing")]
    MissingBody,

    /// Body is not a JSON object
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// `methodType` missing or not one of `GET`/`POST`
    #[error("unrecognized methodType: {0:?}")]
    UnrecognizedMethod(Option<Value>),

    /// Required field missing, mistyped or empty
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The signing capability failed
    #[error(transparent)]
    Signing(#[from] SignerError),

    /// The success payload could not be serialized
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HandlerError {
    /// HTTP status reported for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingBody | Self::MalformedBody(_) | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnrecognizedMethod(_) => StatusCode::FORBIDDEN,
            Self::Signing(_) | Self::Serialization(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message_envelope(status: StatusCode, message: String) -> ResponseEnvelope {
        let payload = ErrorMessage { message };
        ResponseEnvelope::json(status, &payload).unwrap_or_else(|_| {
            ResponseEnvelope::text(status, payload.message)
        })
    }
}

impl From<HandlerError> for ResponseEnvelope {
    fn from(err: HandlerError) -> Self {
        let status = err.status();

        match &err {
            HandlerError::Signing(_) | HandlerError::Serialization(_) => {
                tracing::error!(error = %err, "Unable to generate URL");
            }
            _ => tracing::warn!(status = status.as_u16(), "Rejected request: {err}"),
        }

        match err {
            HandlerError::MissingBody => {
                HandlerError::message_envelope(status, MISSING_BODY_MESSAGE.to_string())
            }
            HandlerError::MalformedBody(_) => {
                HandlerError::message_envelope(status, MALFORMED_BODY_MESSAGE.to_string())
            }
            HandlerError::UnrecognizedMethod(_) => {
                HandlerError::message_envelope(status, UNRECOGNIZED_METHOD_MESSAGE.to_string())
            }
            HandlerError::InvalidRequest(detail) => {
                HandlerError::message_envelope(status, format!("Invalid request: {detail}"))
            }
            HandlerError::Signing(_) | HandlerError::Serialization(_) => {
                Self::text(status, SIGNING_FAILED_MESSAGE)
            }
        }
    }
}

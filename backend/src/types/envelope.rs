//! Invocation event and response envelope

use std::collections::BTreeMap;

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Header that lets browsers on any origin read the response
pub const CORS_ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";

const CORS_ALLOW_ORIGIN_VALUE: &str = "*";

/// Incoming invocation in the API Gateway proxy shape; other fields are ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    /// Raw request body
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the gateway base64-encoded `body`
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl InvocationEvent {
    /// Wraps a plain-text body
    #[must_use]
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Returns the decoded body, or `None` when it is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if a base64 body cannot be decoded as UTF-8 text
    pub fn decoded_body(&self) -> Result<Option<String>, String> {
        let Some(body) = self.body.as_deref() else {
            return Ok(None);
        };

        let body = if self.is_base64_encoded {
            let bytes = STANDARD
                .decode(body.trim())
                .map_err(|e| format!("invalid base64 body: {e}"))?;
            String::from_utf8(bytes).map_err(|e| format!("body is not UTF-8: {e}"))?
        } else {
            body.to_string()
        };

        Ok(Some(body).filter(|b| !b.trim().is_empty()))
    }
}

/// Response returned for every invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status_code: u16,
    /// Serialized payload
    pub body: String,
    /// Response headers, always including the CORS header
    pub headers: BTreeMap<String, String>,
}

impl ResponseEnvelope {
    /// Builds an envelope with a plain-text body
    #[must_use]
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            body: body.into(),
            headers: BTreeMap::from([(
                CORS_ALLOW_ORIGIN_HEADER.to_string(),
                CORS_ALLOW_ORIGIN_VALUE.to_string(),
            )]),
        }
    }

    /// Builds an envelope whose body is `payload` serialized as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if `payload` cannot be serialized
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> serde_json::Result<Self> {
        Ok(Self::text(status, serde_json::to_string(payload)?))
    }

    /// Status code as a typed value
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = self.status();

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        (status, headers, self.body).into_response()
    }
}

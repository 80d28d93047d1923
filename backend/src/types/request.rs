//! Typed presign requests

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use validator::Validate;

use super::HandlerError;

/// Operation requested through the `methodType` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum MethodType {
    /// Presigned download URL
    #[strum(serialize = "GET")]
    Get,
    /// Presigned upload form
    #[strum(serialize = "POST")]
    Post,
}

/// Request for a presigned download URL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct GetObjectRequest {
    /// Bucket holding the object
    #[serde(rename = "BucketName")]
    #[validate(length(min = 1, message = "BucketName must not be empty"))]
    pub bucket_name: String,
    /// Key of the object to download
    #[serde(rename = "ObjectName")]
    #[validate(length(min = 1, message = "ObjectName must not be empty"))]
    pub object_name: String,
}

/// Request for a presigned upload descriptor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UploadRequest {
    /// Bucket receiving the upload
    #[serde(rename = "BucketName")]
    #[validate(length(min = 1, message = "BucketName must not be empty"))]
    pub bucket_name: String,
    /// Client-side file name, suffixed onto the generated object key
    #[serde(rename = "FileName")]
    #[validate(length(min = 1, message = "FileName must not be empty"))]
    pub file_name: String,
}

/// A parsed and validated request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignRequest {
    /// `methodType == "GET"`
    Get(GetObjectRequest),
    /// `methodType == "POST"`
    Post(UploadRequest),
}

impl SignRequest {
    /// Parses a raw request body.
    ///
    /// `methodType` is checked before the operation fields, so an unknown or
    /// missing method is reported as such even when other fields are absent.
    ///
    /// # Errors
    ///
    /// * `HandlerError::MalformedBody` - body is not a JSON object
    /// * `HandlerError::UnrecognizedMethod` - `methodType` is missing or not `GET`/`POST`
    /// * `HandlerError::InvalidRequest` - a required field is missing, mistyped or empty
    pub fn parse(body: &str) -> Result<Self, HandlerError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| HandlerError::MalformedBody(e.to_string()))?;

        let Value::Object(fields) = value else {
            return Err(HandlerError::MalformedBody(
                "expected a JSON object".to_string(),
            ));
        };

        let method_type = fields
            .get("methodType")
            .and_then(Value::as_str)
            .and_then(|m| m.parse::<MethodType>().ok());

        let Some(method_type) = method_type else {
            return Err(HandlerError::UnrecognizedMethod(
                fields.get("methodType").cloned(),
            ));
        };

        match method_type {
            MethodType::Get => Ok(Self::Get(typed(fields)?)),
            MethodType::Post => Ok(Self::Post(typed(fields)?)),
        }
    }

    /// The operation this request asks for
    #[must_use]
    pub const fn method_type(&self) -> MethodType {
        match self {
            Self::Get(_) => MethodType::Get,
            Self::Post(_) => MethodType::Post,
        }
    }
}

fn typed<T>(fields: Map<String, Value>) -> Result<T, HandlerError>
where
    T: DeserializeOwned + Validate,
{
    let request: T = serde_json::from_value(Value::Object(fields))
        .map_err(|e| HandlerError::InvalidRequest(e.to_string()))?;

    request
        .validate()
        .map_err(|e| HandlerError::InvalidRequest(e.to_string()))?;

    Ok(request)
}

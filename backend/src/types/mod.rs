mod envelope;
mod environment;
mod error;
mod expiry;
mod request;

pub use envelope::{InvocationEvent, ResponseEnvelope, CORS_ALLOW_ORIGIN_HEADER};
pub use environment::{Environment, DEFAULT_AWS_REGION};
pub use error::{ErrorMessage, HandlerError, SIGNING_FAILED_MESSAGE, UNRECOGNIZED_METHOD_MESSAGE};
pub use expiry::{ExpiryConfig, DEFAULT_GET_EXPIRY_SECS, DEFAULT_POST_EXPIRY_SECS};
pub use request::{GetObjectRequest, MethodType, SignRequest, UploadRequest};

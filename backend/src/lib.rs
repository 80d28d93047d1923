//! Presigned URL backend
//!
//! Issues short-lived signed URLs for downloading objects from S3 and signed
//! upload forms for browser uploads, served from AWS Lambda or a local server.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]
#![warn(missing_docs)]

/// Request router and signer
pub mod handler;

/// AWS Lambda runtime entry point
pub mod lambda;

/// HTTP routes for local development
pub mod routes;

/// Local HTTP server
pub mod server;

/// Request, response, configuration and error types
pub mod types;

/// Presigned URL generation
pub mod url_signer;

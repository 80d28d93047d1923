use axum::response::Response;
use http_body_util::BodyExt;
use presign_backend::types::{InvocationEvent, ResponseEnvelope};
use serde_json::{json, Value};

pub fn get_event(bucket: &str, object: &str) -> InvocationEvent {
    InvocationEvent::from_body(
        json!({
            "methodType": "GET",
            "BucketName": bucket,
            "ObjectName": object
        })
        .to_string(),
    )
}

pub fn post_event(bucket: &str, file_name: &str) -> InvocationEvent {
    InvocationEvent::from_body(
        json!({
            "methodType": "POST",
            "BucketName": bucket,
            "FileName": file_name
        })
        .to_string(),
    )
}

/// Parse an envelope body as JSON
pub fn envelope_json(envelope: &ResponseEnvelope) -> Value {
    serde_json::from_str(&envelope.body).expect("envelope body should be JSON")
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Whether `key` is `<32 hex chars>_<file_name>`
pub fn is_prefixed_key(key: &str, file_name: &str) -> bool {
    key.split_once('_').is_some_and(|(prefix, rest)| {
        prefix.len() == 32 && prefix.chars().all(|c| c.is_ascii_hexdigit()) && rest == file_name
    })
}

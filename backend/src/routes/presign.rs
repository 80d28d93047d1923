use std::sync::Arc;

use axum::Extension;

use crate::{
    handler::PresignHandler,
    types::{InvocationEvent, ResponseEnvelope},
};

/// Forwards the raw HTTP body to the presign handler as an invocation body
pub async fn handler(
    Extension(presign_handler): Extension<Arc<PresignHandler>>,
    body: String,
) -> ResponseEnvelope {
    presign_handler
        .handle(InvocationEvent::from_body(body))
        .await
}

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};

use crate::{handler::PresignHandler, types::InvocationEvent};

/// Serves invocations from the AWS Lambda runtime API until the process is stopped
///
/// # Errors
///
/// Returns an error if the runtime API cannot be reached
pub async fn run(presign_handler: Arc<PresignHandler>) -> Result<(), Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<InvocationEvent>| {
        let presign_handler = Arc::clone(&presign_handler);
        async move {
            tracing::debug!(request_id = %event.context.request_id, "Received invocation");
            Ok::<_, Error>(presign_handler.handle(event.payload).await)
        }
    }))
    .await
}

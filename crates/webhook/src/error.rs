use thiserror::Error;

/// Anything that went wrong while turning a webhook payload into an order.
///
/// Always names the webhook's order id and keeps the underlying failure
/// (catalog backend, domain rule, ...) as its source.
#[derive(Debug, Error)]
#[error("failed to process webhook order {order_id}: {message}")]
pub struct WebhookProcessingError {
    pub order_id: u64,
    pub message: String,
    #[source]
    pub source: anyhow::Error,
}

impl WebhookProcessingError {
    pub fn new(order_id: u64, message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            order_id,
            message: message.into(),
            source: source.into(),
        }
    }
}

//! Inbound e-commerce webhook: payload model, translation into order inputs,
//! and seeding of new production orders.

pub mod config;
pub mod error;
pub mod payload;
pub mod processor;
pub mod translate;

pub use config::WebhookConfig;
pub use error::WebhookProcessingError;
pub use payload::{BillingInfo, Image, LineItem, WebhookPayload};
pub use processor::WebhookProcessor;
pub use translate::WebhookOrder;

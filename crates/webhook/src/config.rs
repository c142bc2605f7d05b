use serde::{Deserialize, Serialize};

/// Minutes of processing budgeted per production step.
pub const DEFAULT_MINUTES_PER_STEP: u32 = 10;

/// Tunables for turning webhook orders into production orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Priority flag given to every order arriving through the webhook.
    pub default_priority: bool,
    pub minutes_per_step: u32,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            default_priority: false,
            minutes_per_step: DEFAULT_MINUTES_PER_STEP,
        }
    }
}

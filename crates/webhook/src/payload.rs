//! Wire model of the e-commerce order webhook.
//!
//! Only the fields the production domain needs are modelled; anything else in
//! the payload is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub id: u64,
    #[serde(default)]
    pub billing: BillingInfo,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl WebhookPayload {
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingInfo {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: u64,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<Image>,
}

impl LineItem {
    pub fn image_src(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.src.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub src: Option<String>,
}

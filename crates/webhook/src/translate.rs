use std::collections::BTreeMap;

use orderflow_core::{DomainError, ItemId, OrderId};
use orderflow_production::CustomerInfo;

use crate::config::WebhookConfig;
use crate::error::WebhookProcessingError;
use crate::payload::{BillingInfo, WebhookPayload};

/// A webhook payload translated into production order inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOrder {
    order_id: OrderId,
    customer_info: CustomerInfo,
    items: BTreeMap<ItemId, u32>,
}

impl WebhookOrder {
    /// Line items sharing a product id are merged by summing their quantities.
    pub fn from_payload(
        payload: &WebhookPayload,
        config: &WebhookConfig,
    ) -> Result<Self, WebhookProcessingError> {
        let fail = |message: &str, source: DomainError| {
            WebhookProcessingError::new(payload.id, message, source)
        };

        let order_id = OrderId::new(payload.id).map_err(|e| fail("invalid order id", e))?;
        let customer_info = CustomerInfo::new(
            display_name(&payload.billing),
            "",
            config.default_priority,
        )
        .map_err(|e| fail("invalid customer", e))?;

        let mut items: BTreeMap<ItemId, u32> = BTreeMap::new();
        for line in &payload.line_items {
            if line.quantity == 0 {
                return Err(fail(
                    "invalid line item",
                    DomainError::validation(format!(
                        "quantity for product {} must be positive",
                        line.product_id
                    )),
                ));
            }
            let quantity = items.entry(ItemId::new(line.product_id)).or_insert(0);
            *quantity = quantity.checked_add(line.quantity).ok_or_else(|| {
                fail(
                    "invalid line item",
                    DomainError::validation(format!(
                        "quantity for product {} overflows",
                        line.product_id
                    )),
                )
            })?;
        }

        Ok(Self {
            order_id,
            customer_info,
            items,
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    pub fn items(&self) -> &BTreeMap<ItemId, u32> {
        &self.items
    }

    pub fn has_item(&self, item_id: ItemId) -> bool {
        self.items.contains_key(&item_id)
    }

    /// Ordered quantity, zero for items not on the order.
    pub fn item_quantity(&self, item_id: ItemId) -> u32 {
        self.items.get(&item_id).copied().unwrap_or(0)
    }
}

/// `"{company} | {first} {last}"`, or just `"{first} {last}"` without a company.
fn display_name(billing: &BillingInfo) -> String {
    let person = format!("{} {}", billing.first_name, billing.last_name);
    match billing.company.as_deref().map(str::trim) {
        Some(company) if !company.is_empty() => format!("{company} | {person}"),
        _ => person,
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use orderflow_core::{Clock, ItemId, OrderId};
use orderflow_production::{Catalog, CatalogItem, EstimationPolicy, Order, OrderFactory, ProductType};

use crate::config::WebhookConfig;
use crate::error::WebhookProcessingError;
use crate::payload::{LineItem, WebhookPayload};
use crate::translate::WebhookOrder;

/// Seeds production orders from webhook payloads.
///
/// Unknown products are registered in the catalog as generic items, so every
/// line of the payload ends up on the order.
#[derive(Debug)]
pub struct WebhookProcessor<C> {
    catalog: C,
    factory: OrderFactory,
    config: WebhookConfig,
}

impl<C: Catalog> WebhookProcessor<C> {
    pub fn new(catalog: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            factory: OrderFactory::new(clock),
            config: WebhookConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WebhookConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_estimation_policy(mut self, policy: EstimationPolicy) -> Self {
        self.factory = self.factory.with_policy(policy);
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Translate `payload` and build the order it describes.
    ///
    /// Items are seeded at the first step of their product type's pipeline.
    pub fn process(&self, payload: &WebhookPayload) -> Result<Order, WebhookProcessingError> {
        let span = tracing::info_span!("webhook", order_id = payload.id);
        let _guard = span.enter();

        match self.build_order(payload) {
            Ok(order) => {
                info!(items = order.item_count(), "webhook order created");
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, cause = %e.source, "webhook processing failed");
                Err(e)
            }
        }
    }

    fn build_order(&self, payload: &WebhookPayload) -> Result<Order, WebhookProcessingError> {
        let webhook_order = WebhookOrder::from_payload(payload, &self.config)?;
        let order_id = webhook_order.order_id();

        for line in &payload.line_items {
            self.ensure_item_exists(order_id, line)?;
        }

        let mut resolved = Vec::with_capacity(webhook_order.items().len());
        let mut processing_minutes = BTreeMap::new();
        for (&item_id, &quantity) in webhook_order.items() {
            let (item, product_type) = self.resolve(order_id, item_id)?;
            processing_minutes.insert(item_id, self.processing_minutes(order_id, &product_type)?);
            resolved.push((item, product_type, quantity));
        }

        let mut order = self
            .factory
            .create_order(
                order_id,
                webhook_order.customer_info().clone(),
                webhook_order.items().clone(),
                processing_minutes,
                webhook_order.customer_info().is_priority(),
            )
            .map_err(|e| WebhookProcessingError::new(order_id.value(), "failed to create order", e))?;

        for (item, product_type, quantity) in resolved {
            let item_id = item.id;
            let order_item = self
                .factory
                .order_item(item, &product_type, quantity)
                .map_err(|e| {
                    WebhookProcessingError::new(
                        order_id.value(),
                        format!("failed to set up item {item_id}"),
                        e,
                    )
                })?;
            order.add_item(order_item).map_err(|e| {
                WebhookProcessingError::new(
                    order_id.value(),
                    format!("failed to add item {item_id}"),
                    e,
                )
            })?;
        }

        Ok(order)
    }

    fn ensure_item_exists(&self, order_id: OrderId, line: &LineItem) -> Result<(), WebhookProcessingError> {
        let item_id = ItemId::new(line.product_id);
        let exists = self.catalog.item_exists(item_id).map_err(|e| {
            WebhookProcessingError::new(order_id.value(), format!("failed to look up item {item_id}"), e)
        })?;
        if exists {
            return Ok(());
        }

        let item = CatalogItem::generic(item_id, line.name.clone(), line.image_src().map(str::to_owned));
        self.catalog.register_item(item).map_err(|e| {
            WebhookProcessingError::new(order_id.value(), format!("failed to create item {item_id}"), e)
        })?;
        debug!(item_id = %item_id, name = %line.name, "registered unknown item as generic");
        Ok(())
    }

    fn resolve(
        &self,
        order_id: OrderId,
        item_id: ItemId,
    ) -> Result<(CatalogItem, ProductType), WebhookProcessingError> {
        let lookup = || -> anyhow::Result<(CatalogItem, ProductType)> {
            let item = self
                .catalog
                .find_item(item_id)?
                .ok_or_else(|| anyhow!("item not found: {item_id}"))?;
            let product_type = self
                .catalog
                .find_product_type(item.product_type_id)?
                .ok_or_else(|| anyhow!("product type not found: {}", item.product_type_id))?;
            Ok((item, product_type))
        };

        lookup().map_err(|e| {
            WebhookProcessingError::new(order_id.value(), format!("failed to resolve item {item_id}"), e)
        })
    }

    /// Per-unit minutes for an item: one budget slot per step of its pipeline.
    fn processing_minutes(
        &self,
        order_id: OrderId,
        product_type: &ProductType,
    ) -> Result<u32, WebhookProcessingError> {
        u32::try_from(product_type.steps.len())
            .ok()
            .and_then(|steps| steps.checked_mul(self.config.minutes_per_step))
            .ok_or_else(|| {
                WebhookProcessingError::new(
                    order_id.value(),
                    "failed to calculate processing time",
                    anyhow!(
                        "product type {} has too many steps ({})",
                        product_type.id,
                        product_type.steps.len()
                    ),
                )
            })
    }
}

//! Production order fulfillment domain.
//!
//! An [`Order`] owns line items that each walk their product type's pipeline
//! of steps. The order keeps a timeline of when each step was reached, an
//! estimate of how long production takes, and an in-memory log of
//! [`OrderEvent`]s. Mutations go through [`commands`], which gate on
//! [`specification`]s before calling the aggregate.
//!
//! This crate does no IO; "now" always comes from an injected
//! [`orderflow_core::Clock`].

pub mod catalog;
pub mod commands;
pub mod customer;
pub mod error;
pub mod estimation;
pub mod events;
pub mod factory;
pub mod item;
pub mod order;
pub mod specification;
pub mod status;
pub mod timeline;
pub mod transition;

pub use catalog::{Catalog, CatalogItem, InMemoryCatalog, ProductType};
pub use commands::{UpdateItemStatusCommand, UpdateProductTypeCommand};
pub use customer::CustomerInfo;
pub use error::OrderError;
pub use estimation::{EstimationPolicy, OrderEstimation};
pub use events::OrderEvent;
pub use factory::OrderFactory;
pub use item::OrderItem;
pub use order::{Order, OrderParts, OrderSnapshot};
pub use specification::Specification;
pub use status::{OrderProgress, OrderStatus};
pub use timeline::OrderTimeline;
pub use transition::ProductTypeTransition;

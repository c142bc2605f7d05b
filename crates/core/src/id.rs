//! Strongly-typed identifiers used across the domain.
//!
//! All identifiers are opaque positive-or-zero integers handed to us by the
//! catalog and the storefront. Only [`OrderId`] carries a validity rule of its own.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an order aggregate. Always strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct OrderId(u64);

/// Identifier of a catalog item (the storefront's product id).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a production step definition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(u64);

/// Identifier of a product type (a named pipeline of steps).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductTypeId(u64);

impl OrderId {
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid_id("OrderId must be a positive number"));
        }
        Ok(Self(value))
    }
}

impl TryFrom<u64> for OrderId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl ProductTypeId {
    /// Sentinel for items that have not been assigned a concrete pipeline yet.
    pub const GENERIC: ProductTypeId = ProductTypeId(0);

    pub fn is_generic(&self) -> bool {
        *self == Self::GENERIC
    }
}

macro_rules! impl_plain_id {
    ($t:ident) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

macro_rules! impl_u64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(<$t>::try_from(raw)?)
            }
        }
    };
}

impl_plain_id!(ItemId);
impl_plain_id!(StepId);
impl_plain_id!(ProductTypeId);

impl_u64_newtype!(OrderId, "OrderId");
impl_u64_newtype!(ItemId, "ItemId");
impl_u64_newtype!(StepId, "StepId");
impl_u64_newtype!(ProductTypeId, "ProductTypeId");

impl From<core::convert::Infallible> for DomainError {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}

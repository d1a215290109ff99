//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    fleet::PickUpPointId,
    ids::TypedId,
    supplies::SupplyId,
    validation::{Required, ValidationError},
};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Tracking status of a product. Only ever advanced by an explicit user action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Not yet dispatched.
    #[default]
    NotSent,

    /// On its way to the pick-up point.
    SentInPvz,

    /// Arrived at the pick-up point.
    DeliveredInPvz,

    /// Handed to the customer.
    Received,
}

impl ProductStatus {
    /// Backend name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotSent => "NOT_SENT",
            Self::SentInPvz => "SENT_IN_PVZ",
            Self::DeliveredInPvz => "DELIVERED_IN_PVZ",
            Self::Received => "RECEIVED",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotSent => "Not sent",
            Self::SentInPvz => "Sent to pick-up point",
            Self::DeliveredInPvz => "Delivered to pick-up point",
            Self::Received => "Received",
        }
    }

    /// Whether the product can be handed to the customer.
    pub fn can_receive(self) -> bool {
        self == Self::DeliveredInPvz
    }
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Article number (SKU)
    pub articul: String,

    /// Description
    pub discr: String,

    /// Pick-up point the product is addressed to
    #[serde(default)]
    pub pick_up_point_id: Option<PickUpPointId>,

    /// Supply carrying the product, if any
    #[serde(default)]
    pub supply_id: Option<SupplyId>,

    /// Tracking status
    pub status: ProductStatus,
}

impl Product {
    /// Whether the product travels with the given supply.
    pub fn belongs_to(&self, supply: SupplyId) -> bool {
        self.supply_id == Some(supply)
    }

    /// A copy of the product with a new status.
    #[must_use]
    pub fn with_status(&self, status: ProductStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// A copy of the product marked as handed to the customer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::StatusTransition`] unless the product is
    /// currently [`ProductStatus::DeliveredInPvz`].
    pub fn received(&self) -> Result<Self, ValidationError> {
        if !self.status.can_receive() {
            return Err(ValidationError::StatusTransition {
                from: self.status.as_str(),
                to: ProductStatus::Received.as_str(),
            });
        }

        Ok(self.with_status(ProductStatus::Received))
    }
}

/// A product at a pick-up point, with the time of the supply carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedProduct {
    /// Product record
    pub product: Product,

    /// Scheduled time of the product's supply, when known
    pub supply_time: Option<DateTime>,
}

/// Catalog form for a new product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Article number (SKU)
    pub articul: String,

    /// Description
    pub discr: String,

    /// Pick-up point the product is addressed to
    pub pick_up_point_id: Option<PickUpPointId>,

    /// Supply carrying the product, if any
    pub supply_id: Option<SupplyId>,

    /// Initial status
    pub status: ProductStatus,
}

impl NewProduct {
    /// Check that article number and description are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the missing fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("articul", &self.articul)
            .text("description", &self.discr)
            .finish()
    }
}

/// Status and article filter applied to product lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only keep products with this status
    pub status: Option<ProductStatus>,

    /// Case-insensitive article number fragment; blank matches everything
    pub search: String,
}

impl ProductFilter {
    /// Whether the product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if self
            .status
            .is_some_and(|status| status != product.status)
        {
            return false;
        }

        let term = self.search.trim();

        term.is_empty()
            || product
                .articul
                .to_lowercase()
                .contains(&term.to_lowercase())
    }

    /// Products passing the filter, in their original order.
    pub fn apply<'a, I>(&self, products: I) -> Vec<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}

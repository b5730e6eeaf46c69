//! Order submission types.

use crate::cart::{CartEntry, PricingSnapshot};
use crate::checkout::OrderType;
use crate::error::CommerceError;
use crate::ids::{BranchId, CustomerId, OrderId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One purchased line, as sent to the order API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    /// Unit price including add-ons.
    pub unit_price: Money,
    /// Labels of the selected add-ons.
    #[serde(default)]
    pub add_ons: Vec<String>,
    pub line_total: Money,
}

impl OrderLine {
    pub fn from_entry(entry: &CartEntry) -> Result<Self, CommerceError> {
        Ok(Self {
            product_id: entry.product_id.clone(),
            name: entry.name.clone(),
            quantity: entry.quantity,
            unit_price: entry.total_per_unit_with_add_ons,
            add_ons: entry.add_on_labels().into_iter().map(String::from).collect(),
            line_total: entry.line_total()?,
        })
    }
}

/// An order ready for submission: the cart lines plus the totals the
/// customer was shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    pub order_type: OrderType,
    #[serde(default)]
    pub address: Option<String>,
    pub lines: Vec<OrderLine>,
    pub pricing: PricingSnapshot,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Unix timestamp when the order was built.
    pub placed_at: i64,
}

impl OrderRequest {
    pub fn grand_total(&self) -> Money {
        self.pricing.grand_total
    }

    pub fn item_count(&self) -> i64 {
        self.pricing.item_count
    }
}

/// What the order API returns for an accepted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
}

impl OrderConfirmation {
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }

    /// Path of the order-complete page for this order.
    pub fn completion_path(&self) -> String {
        format!("/order-complete/{}", self.order_id)
    }
}

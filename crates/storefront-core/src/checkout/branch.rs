//! Branch selection and the delivery charge it implies.

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use crate::ids::BranchId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    #[default]
    Delivery,
    PickUp,
    DineIn,
}

impl OrderType {
    /// Wire value, as stored under the branch key.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "delivery",
            OrderType::PickUp => "pickUp",
            OrderType::DineIn => "dineIn",
        }
    }

    /// Label shown on the order type tabs.
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderType::Delivery => "DELIVERY",
            OrderType::PickUp => "PICK-UP",
            OrderType::DineIn => "DINE-IN",
        }
    }

    pub fn is_delivery(&self) -> bool {
        matches!(self, OrderType::Delivery)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = CommerceError;

    /// Accepts the wire value or the tab label in any case, with or without
    /// separators (`pickUp`, `PICK-UP`, `pick_up`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "delivery" => Ok(OrderType::Delivery),
            "pickup" => Ok(OrderType::PickUp),
            "dinein" => Ok(OrderType::DineIn),
            _ => Err(CommerceError::Validation(format!("unknown order type: {}", s))),
        }
    }
}

/// The branch the customer is ordering from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSelection {
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    /// Delivery address, when the order type is delivery.
    #[serde(default)]
    pub address: Option<String>,
}

impl BranchSelection {
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, id: impl Into<BranchId>, name: impl Into<String>) -> Self {
        self.branch_id = Some(id.into());
        self.branch_name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Maps the selected order type to a delivery charge.
///
/// Only delivery orders are charged; pick-up, dine-in and orders without a
/// branch selection ship free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub delivery_charge: Money,
}

impl DeliveryPolicy {
    pub fn new(delivery_charge: Money) -> Self {
        Self { delivery_charge }
    }

    /// A policy that never charges for delivery.
    pub fn free(currency: Currency) -> Self {
        Self::new(Money::zero(currency))
    }

    pub fn charge_for(&self, order_type: Option<OrderType>) -> Money {
        match order_type {
            Some(OrderType::Delivery) => self.delivery_charge,
            _ => Money::zero(self.delivery_charge.currency),
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::new(Money::new(15000, Currency::PKR))
    }
}

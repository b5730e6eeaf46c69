//! Checkout module.
//!
//! Branch and order type selection, order requests, and order placement.

mod branch;
mod flow;
mod order;

pub use branch::{BranchSelection, DeliveryPolicy, OrderType};
pub use flow::Checkout;
pub use order::{OrderConfirmation, OrderLine, OrderRequest};

//! Shopping cart module.
//!
//! Contains the cart store, entries and their identity, pricing, and discounts.

mod discount;
mod entry;
mod identity;
mod pricing;
mod store;

pub use discount::{AppliedDiscount, PromoCatalog};
pub use entry::{CartCandidate, CartEntry, MAX_QUANTITY_PER_ITEM};
pub use identity::LineIdentity;
pub use pricing::{LinePricing, PricingInputs, PricingSnapshot};
pub use store::{CartSettings, CartStore, SubscriptionId};

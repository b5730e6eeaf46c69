//! Cart, pricing and checkout logic for the restaurant storefront.
//!
//! - **Catalog**: menu products, add-on groups and selections, categories
//! - **Cart**: the cart store, line identity, pricing and promo codes
//! - **Checkout**: branch and order type, order requests, order placement
//! - **Persistence**: the storage interface the cart writes through to
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let mut cart = CartStore::open(MemoryStore::new(), CartSettings::default());
//! cart.set_branch(BranchSelection::new(OrderType::Delivery)).unwrap();
//!
//! let burger = CartCandidate::new("zinger", "Zinger Burger", Money::new(10000, Currency::PKR), 2);
//! cart.add_item(burger).unwrap();
//!
//! let pricing = cart.pricing().unwrap();
//! assert_eq!(pricing.grand_total.display(), "Rs 370.00");
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod persistence;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{OrderApi, ProductApi};
    pub use crate::config::StorefrontConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::persistence::{MemoryStore, PersistenceAdapter, BRANCH_KEY, CART_KEY};

    // Catalog
    pub use crate::catalog::{
        AddOnGroup, AddOnOption, AddOnSelection, Category, MenuProduct, StaticMenu,
    };

    // Cart
    pub use crate::cart::{
        AppliedDiscount, CartCandidate, CartEntry, CartSettings, CartStore, LineIdentity,
        LinePricing, PricingInputs, PricingSnapshot, PromoCatalog, SubscriptionId,
    };

    // Checkout
    pub use crate::checkout::{
        BranchSelection, Checkout, DeliveryPolicy, OrderConfirmation, OrderLine, OrderRequest,
        OrderType,
    };
}

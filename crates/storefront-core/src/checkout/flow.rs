//! Order placement.

use crate::api::OrderApi;
use crate::cart::CartStore;
use crate::checkout::{OrderConfirmation, OrderLine, OrderRequest};
use crate::error::CommerceError;
use crate::ids::CustomerId;
use crate::persistence::PersistenceAdapter;
use tracing::{error, info};

/// Places the contents of a cart as an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checkout {
    pub customer_id: Option<CustomerId>,
    pub note: Option<String>,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer_id: impl Into<CustomerId>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        if !note.trim().is_empty() {
            self.note = Some(note);
        }
        self
    }

    /// Build the order request for the current cart and its totals.
    pub fn build_request<S: PersistenceAdapter>(
        &self,
        store: &CartStore<S>,
    ) -> Result<OrderRequest, CommerceError> {
        if store.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let lines = store
            .entries()
            .iter()
            .map(OrderLine::from_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let branch = store.branch();

        Ok(OrderRequest {
            customer_id: self.customer_id.clone(),
            branch_id: branch.and_then(|b| b.branch_id.clone()),
            order_type: branch.map(|b| b.order_type).unwrap_or_default(),
            address: branch.and_then(|b| b.address.clone()),
            lines,
            pricing: store.pricing()?,
            discount_code: store.discount().map(|d| d.code.clone()),
            note: self.note.clone(),
            placed_at: current_timestamp(),
        })
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart is cleared. On failure the cart is left as it was
    /// so the customer can retry.
    pub fn place_order<S, A>(
        &self,
        store: &mut CartStore<S>,
        api: &A,
    ) -> Result<OrderConfirmation, CommerceError>
    where
        S: PersistenceAdapter,
        A: OrderApi + ?Sized,
    {
        let request = self.build_request(store)?;

        let confirmation = match api.submit_order(&request) {
            Ok(confirmation) => confirmation,
            Err(e) => {
                error!(error = %e, lines = request.lines.len(), "order submission failed");
                return Err(e);
            }
        };

        info!(
            order_id = %confirmation.order_id,
            total = %request.grand_total(),
            items = request.item_count(),
            "order placed"
        );

        // The order stands even if clearing persisted state fails.
        if let Err(e) = store.clear() {
            error!(
                error = %e,
                order_id = %confirmation.order_id,
                "failed to clear cart after order"
            );
        }
        Ok(confirmation)
    }
}

fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartCandidate, CartSettings};
    use crate::checkout::{BranchSelection, OrderType};
    use crate::money::{Currency, Money};
    use crate::persistence::{MemoryStore, CART_KEY};
    use std::cell::RefCell;

    struct RecordingOrders {
        fail: bool,
        seen: RefCell<Vec<OrderRequest>>,
    }

    impl OrderApi for RecordingOrders {
        fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError> {
            self.seen.borrow_mut().push(order.clone());
            if self.fail {
                return Err(CommerceError::Api("503 Service Unavailable".to_string()));
            }
            Ok(OrderConfirmation::new("1042"))
        }
    }

    fn orders(fail: bool) -> RecordingOrders {
        RecordingOrders {
            fail,
            seen: RefCell::new(Vec::new()),
        }
    }

    fn filled_store() -> CartStore<MemoryStore> {
        let mut store = CartStore::open(MemoryStore::new(), CartSettings::default());
        store
            .set_branch(BranchSelection::new(OrderType::Delivery).with_branch("3", "DHA"))
            .unwrap();
        store
            .add_item(CartCandidate::new("burger", "Burger", Money::new(10000, Currency::PKR), 2))
            .unwrap();
        store
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut store = CartStore::open(MemoryStore::new(), CartSettings::default());
        let api = orders(false);
        assert!(matches!(
            Checkout::new().place_order(&mut store, &api),
            Err(CommerceError::EmptyCart)
        ));
        assert!(api.seen.borrow().is_empty());
    }

    #[test]
    fn test_success_clears_cart() {
        let mut store = filled_store();
        let api = orders(false);
        let confirmation = Checkout::new()
            .with_customer("cust-9")
            .place_order(&mut store, &api)
            .unwrap();

        assert_eq!(confirmation.order_id.as_str(), "1042");
        assert!(store.is_empty());
        assert!(!store.storage().contains(CART_KEY));

        let sent = &api.seen.borrow()[0];
        assert_eq!(sent.grand_total().amount_minor, 37000);
        assert_eq!(sent.branch_id.as_ref().map(|b| b.as_str()), Some("3"));
        assert_eq!(sent.customer_id.as_ref().map(|c| c.as_str()), Some("cust-9"));
    }

    #[test]
    fn test_failure_keeps_cart() {
        let mut store = filled_store();
        let api = orders(true);
        assert!(Checkout::new().place_order(&mut store, &api).is_err());
        assert_eq!(store.item_count(), 2);
        assert!(store.storage().contains(CART_KEY));
    }

    #[test]
    fn test_blank_note_is_dropped() {
        assert!(Checkout::new().with_note("   ").note.is_none());
        assert_eq!(
            Checkout::new().with_note("no onions").note.as_deref(),
            Some("no onions")
        );
    }
}

//! The cart store.
//!
//! A [`CartStore`] owns the cart entries for one customer session. Every
//! mutation writes the entry list through to the persistence adapter and
//! then pushes a fresh [`PricingSnapshot`] to subscribers.

use std::fmt;

use crate::cart::{
    AppliedDiscount, CartCandidate, CartEntry, LineIdentity, PricingInputs, PricingSnapshot,
    MAX_QUANTITY_PER_ITEM,
};
use crate::checkout::{BranchSelection, DeliveryPolicy};
use crate::error::CommerceError;
use crate::ids::{EntryId, ProductId};
use crate::money::{Currency, Money};
use crate::persistence::{load_json, save_json, PersistenceAdapter, BRANCH_KEY, CART_KEY};
use tracing::{debug, info, warn};

/// Pricing settings the store is opened with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSettings {
    pub currency: Currency,
    /// Tax rate in percent. `None` means untaxed.
    pub tax_rate: Option<f64>,
    pub delivery: DeliveryPolicy,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            currency: Currency::PKR,
            tax_rate: Some(10.0),
            delivery: DeliveryPolicy::default(),
        }
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PricingSnapshot)>;

/// Cart state for a single session.
pub struct CartStore<S: PersistenceAdapter> {
    storage: S,
    settings: CartSettings,
    entries: Vec<CartEntry>,
    branch: Option<BranchSelection>,
    discount: Option<AppliedDiscount>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: PersistenceAdapter> CartStore<S> {
    /// Open the store, restoring the cart and branch selection from storage.
    ///
    /// Unreadable or malformed persisted data is logged and treated as
    /// absent. Restored entries with an invalid quantity or a foreign
    /// currency are dropped, and lines with the same identity are merged.
    pub fn open(storage: S, settings: CartSettings) -> Self {
        let entries = match load_json::<Vec<CartEntry>, _>(&storage, CART_KEY) {
            Ok(Some(entries)) => restore_entries(entries, settings.currency),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable persisted cart");
                Vec::new()
            }
        };

        let branch = match load_json::<BranchSelection, _>(&storage, BRANCH_KEY) {
            Ok(branch) => branch,
            Err(e) => {
                warn!(error = %e, "discarding unreadable branch selection");
                None
            }
        };

        debug!(
            entries = entries.len(),
            has_branch = branch.is_some(),
            "opened cart store"
        );

        Self {
            storage,
            settings,
            entries,
            branch,
            discount: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add a candidate to the cart.
    ///
    /// A candidate with the same product and add-on selection as an existing
    /// line increments that line; otherwise a new line is appended. A
    /// quantity of zero or less is ignored and returns `Ok(None)`.
    pub fn add_item(&mut self, candidate: CartCandidate) -> Result<Option<EntryId>, CommerceError> {
        if candidate.quantity <= 0 {
            debug!(
                product_id = %candidate.product_id,
                quantity = candidate.quantity,
                "ignoring add with non-positive quantity"
            );
            return Ok(None);
        }
        self.check_currency(&candidate.unit_price)?;

        let identity = candidate.identity();
        let id = if let Some(existing) = self.entries.iter_mut().find(|e| identity.matches(e)) {
            let new_quantity = existing
                .quantity
                .checked_add(candidate.quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            debug!(entry_id = %existing.id, quantity = new_quantity, "incremented cart line");
            existing.id.clone()
        } else {
            if candidate.quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    candidate.quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            let entry = candidate.into_entry()?;
            let id = entry.id.clone();
            debug!(entry_id = %id, quantity = entry.quantity, "added cart line");
            self.entries.push(entry);
            id
        };

        self.commit()?;
        Ok(Some(id))
    }

    /// Remove a line. Returns `false` when no such line exists.
    pub fn remove_item(&mut self, entry_id: &EntryId) -> Result<bool, CommerceError> {
        let len_before = self.entries.len();
        self.entries.retain(|e| &e.id != entry_id);
        if self.entries.len() == len_before {
            return Ok(false);
        }
        debug!(entry_id = %entry_id, "removed cart line");
        self.commit()?;
        Ok(true)
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn set_quantity(
        &mut self,
        entry_id: &EntryId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return self.remove_item(entry_id);
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.entries.iter_mut().find(|e| &e.id == entry_id) {
            Some(entry) => {
                entry.quantity = quantity;
                debug!(entry_id = %entry_id, quantity, "set cart line quantity");
            }
            None => return Ok(false),
        }
        self.commit()?;
        Ok(true)
    }

    /// Add one to a line's quantity.
    pub fn increment(&mut self, entry_id: &EntryId) -> Result<bool, CommerceError> {
        match self.entry(entry_id).map(|e| e.quantity) {
            Some(quantity) => {
                let next = quantity.checked_add(1).ok_or(CommerceError::Overflow)?;
                self.set_quantity(entry_id, next)
            }
            None => Ok(false),
        }
    }

    /// Take one from a line's quantity, removing the line at zero.
    pub fn decrement(&mut self, entry_id: &EntryId) -> Result<bool, CommerceError> {
        match self.entry(entry_id).map(|e| e.quantity) {
            Some(quantity) => self.set_quantity(entry_id, quantity - 1),
            None => Ok(false),
        }
    }

    /// Empty the cart and its persisted state. The applied discount goes too.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.entries.clear();
        self.discount = None;
        debug!("cleared cart");

        let cleared = self.storage.clear(CART_KEY);
        if let Err(e) = &cleared {
            warn!(error = %e, "failed to clear persisted cart");
        }
        self.notify();
        cleared
    }

    pub fn set_tax_rate(&mut self, tax_rate: Option<f64>) {
        self.settings.tax_rate = tax_rate;
        self.notify();
    }

    pub fn apply_discount(&mut self, discount: AppliedDiscount) {
        debug!(code = %discount.code, percent = discount.percent, "applied discount");
        self.discount = Some(discount);
        self.notify();
    }

    pub fn remove_discount(&mut self) -> Option<AppliedDiscount> {
        let removed = self.discount.take();
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Select a branch and order type. Persisted under the branch key.
    pub fn set_branch(&mut self, branch: BranchSelection) -> Result<(), CommerceError> {
        debug!(order_type = %branch.order_type, "selected branch");
        let saved = save_json(&mut self.storage, BRANCH_KEY, &branch);
        self.branch = Some(branch);
        if let Err(e) = &saved {
            warn!(error = %e, "failed to persist branch selection");
        }
        self.notify();
        saved
    }

    pub fn clear_branch(&mut self) -> Result<(), CommerceError> {
        self.branch = None;
        let cleared = self.storage.clear(BRANCH_KEY);
        self.notify();
        cleared
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn entry(&self, entry_id: &EntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.id == entry_id)
    }

    /// First line for a product, whatever its add-ons.
    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }

    pub fn find_line(&self, identity: &LineIdentity) -> Option<&CartEntry> {
        self.entries.iter().find(|e| identity.matches(e))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    pub fn unique_item_count(&self) -> usize {
        self.entries.len()
    }

    pub fn branch(&self) -> Option<&BranchSelection> {
        self.branch.as_ref()
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    /// Delivery charge for the stored order type. An empty cart is never
    /// charged.
    pub fn delivery_charge(&self) -> Money {
        if self.entries.is_empty() {
            return Money::zero(self.settings.currency);
        }
        self.settings
            .delivery
            .charge_for(self.branch.as_ref().map(|b| b.order_type))
    }

    pub fn pricing_inputs(&self) -> PricingInputs {
        PricingInputs {
            tax_rate: self.settings.tax_rate,
            discount_rate: self.discount.as_ref().map(|d| d.percent),
            delivery_charge: Some(self.delivery_charge()),
        }
    }

    /// Current totals, recomputed from the entries on every call.
    pub fn pricing(&self) -> Result<PricingSnapshot, CommerceError> {
        PricingSnapshot::compute(&self.entries, &self.pricing_inputs(), self.settings.currency)
    }

    /// Register a listener that receives the totals after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PricingSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the store, keeping persisted state for the next session.
    pub fn close(self) -> S {
        self.storage
    }

    /// Tear the session down: drop the persisted cart and branch selection.
    pub fn end_session(mut self) -> Result<S, CommerceError> {
        self.storage.clear(CART_KEY)?;
        self.storage.clear(BRANCH_KEY)?;
        info!(entries = self.entries.len(), "ended cart session");
        Ok(self.storage)
    }

    fn check_currency(&self, price: &Money) -> Result<(), CommerceError> {
        if price.currency != self.settings.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.settings.currency.code().to_string(),
                got: price.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Persist the entries, then notify. The in-memory change stands even
    /// when persisting fails; the failure is returned to the caller.
    fn commit(&mut self) -> Result<(), CommerceError> {
        let saved = save_json(&mut self.storage, CART_KEY, &self.entries);
        if let Err(e) = &saved {
            warn!(error = %e, "failed to persist cart");
        }
        self.notify();
        saved
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        match self.pricing() {
            Ok(snapshot) => {
                for (_, listener) in self.listeners.iter_mut() {
                    listener(&snapshot);
                }
            }
            Err(e) => warn!(error = %e, "skipping subscriber notification"),
        }
    }
}

impl<S: PersistenceAdapter> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("settings", &self.settings)
            .field("entries", &self.entries)
            .field("branch", &self.branch)
            .field("discount", &self.discount)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn restore_entries(entries: Vec<CartEntry>, currency: Currency) -> Vec<CartEntry> {
    let mut restored: Vec<CartEntry> = Vec::with_capacity(entries.len());
    for mut entry in entries {
        if entry.quantity <= 0 || entry.quantity > MAX_QUANTITY_PER_ITEM {
            warn!(
                entry_id = %entry.id,
                quantity = entry.quantity,
                "dropping persisted line with invalid quantity"
            );
            continue;
        }
        if entry.unit_price.currency != currency {
            warn!(entry_id = %entry.id, "dropping persisted line in another currency");
            continue;
        }
        entry.add_ons.retain(|o| o.selected);
        if let Err(e) = entry.reprice() {
            warn!(
                entry_id = %entry.id,
                error = %e,
                "dropping persisted line that cannot be priced"
            );
            continue;
        }
        let identity = entry.identity();
        entry.id = identity.entry_id();

        match restored.iter_mut().find(|e| identity.matches(e)) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(entry.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
            }
            None => restored.push(entry),
        }
    }
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AddOnOption;
    use crate::checkout::OrderType;
    use crate::persistence::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pkr(v: i64) -> Money {
        Money::new(v, Currency::PKR)
    }

    fn burger(quantity: i64) -> CartCandidate {
        CartCandidate::new("burger", "Zinger Burger", pkr(10000), quantity)
    }

    fn deal(drink: &str, quantity: i64) -> CartCandidate {
        CartCandidate::new("deal", "Kuch Bhi Deal", pkr(49900), quantity)
            .with_add_on(AddOnOption::new("Big Band", pkr(0)))
            .with_add_on(AddOnOption::new(drink, pkr(5000)))
    }

    fn store() -> CartStore<MemoryStore> {
        CartStore::open(MemoryStore::new(), CartSettings::default())
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut cart = store();
        let a = cart.add_item(burger(1)).unwrap().unwrap();
        let b = cart.add_item(burger(2)).unwrap().unwrap();
        let c = cart.add_item(burger(4)).unwrap().unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_add_ons_order_does_not_matter() {
        let mut cart = store();
        cart.add_item(deal("Pepsi", 1)).unwrap();
        let reordered = CartCandidate::new("deal", "Kuch Bhi Deal", pkr(49900), 1)
            .with_add_on(AddOnOption::new("Pepsi", pkr(5000)))
            .with_add_on(AddOnOption::new("Big Band", pkr(0)));
        cart.add_item(reordered).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.entries()[0].quantity, 2);
    }

    #[test]
    fn test_different_add_ons_are_separate_lines() {
        let mut cart = store();
        let pepsi = cart.add_item(deal("Pepsi", 1)).unwrap().unwrap();
        let dew = cart.add_item(deal("Mountain Dew", 3)).unwrap().unwrap();

        assert_ne!(pepsi, dew);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.entry(&pepsi).unwrap().quantity, 1);
        assert_eq!(cart.entry(&dew).unwrap().quantity, 3);
    }

    #[test]
    fn test_non_positive_add_is_noop() {
        let mut cart = store();
        assert_eq!(cart.add_item(burger(0)).unwrap(), None);
        assert_eq!(cart.add_item(burger(-2)).unwrap(), None);
        assert!(cart.is_empty());
        assert!(!cart.storage().contains(CART_KEY));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = store();
        cart.add_item(burger(MAX_QUANTITY_PER_ITEM)).unwrap();
        assert!(matches!(
            cart.add_item(burger(1)),
            Err(CommerceError::QuantityExceedsLimit(_, _))
        ));
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut cart = store();
        let usd = CartCandidate::new("burger", "Burger", Money::new(500, Currency::USD), 1);
        assert!(matches!(
            cart.add_item(usd),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut removed = store();
        let mut zeroed = store();
        let id = removed.add_item(burger(2)).unwrap().unwrap();
        zeroed.add_item(burger(2)).unwrap();

        assert!(removed.remove_item(&id).unwrap());
        assert!(zeroed.set_quantity(&id, 0).unwrap());

        assert_eq!(removed.entries(), zeroed.entries());
        assert_eq!(
            removed.storage().get(CART_KEY),
            zeroed.storage().get(CART_KEY)
        );
    }

    #[test]
    fn test_missing_entry_is_noop() {
        let mut cart = store();
        cart.add_item(burger(1)).unwrap();
        let missing = EntryId::new("nope");

        assert!(!cart.remove_item(&missing).unwrap());
        assert!(!cart.set_quantity(&missing, 5).unwrap());
        assert!(!cart.increment(&missing).unwrap());
        assert!(!cart.decrement(&missing).unwrap());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = store();
        let id = cart.add_item(burger(1)).unwrap().unwrap();

        cart.increment(&id).unwrap();
        assert_eq!(cart.entry(&id).unwrap().quantity, 2);

        cart.decrement(&id).unwrap();
        cart.decrement(&id).unwrap();
        assert!(cart.entry(&id).is_none());
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut cart = store();
        let id = cart.add_item(burger(2)).unwrap().unwrap();
        let saved: Vec<CartEntry> = load_json(cart.storage(), CART_KEY).unwrap().unwrap();
        assert_eq!(saved[0].quantity, 2);

        cart.set_quantity(&id, 5).unwrap();
        let saved: Vec<CartEntry> = load_json(cart.storage(), CART_KEY).unwrap().unwrap();
        assert_eq!(saved[0].quantity, 5);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut cart = store();
        cart.set_branch(BranchSelection::new(OrderType::Delivery)).unwrap();
        cart.add_item(burger(2)).unwrap();
        cart.apply_discount(AppliedDiscount::new("LAB10", 10.0).unwrap());

        cart.clear().unwrap();

        let pricing = cart.pricing().unwrap();
        assert!(cart.is_empty());
        assert!(pricing.subtotal.is_zero());
        assert!(pricing.grand_total.is_zero());
        assert!(cart.discount().is_none());
        assert!(!cart.storage().contains(CART_KEY));
        assert!(cart.branch().is_some());
    }

    #[test]
    fn test_pricing_follows_branch_and_discount() {
        let mut cart = store();
        cart.add_item(burger(2)).unwrap();
        assert_eq!(cart.pricing().unwrap().grand_total, pkr(22000));

        cart.set_branch(BranchSelection::new(OrderType::Delivery)).unwrap();
        assert_eq!(cart.pricing().unwrap().grand_total, pkr(37000));

        cart.apply_discount(AppliedDiscount::new("LAB10", 10.0).unwrap());
        let pricing = cart.pricing().unwrap();
        assert_eq!(pricing.discount_amount, pkr(3700));
        assert_eq!(pricing.grand_total, pkr(33300));

        cart.set_branch(BranchSelection::new(OrderType::DineIn)).unwrap();
        assert!(cart.pricing().unwrap().is_free_delivery());
    }

    #[test]
    fn test_restore_from_storage() {
        let mut cart = store();
        cart.set_branch(BranchSelection::new(OrderType::PickUp)).unwrap();
        cart.add_item(deal("Pepsi", 2)).unwrap();
        let storage = cart.close();

        let reopened = CartStore::open(storage, CartSettings::default());
        assert_eq!(reopened.item_count(), 2);
        assert_eq!(reopened.branch().unwrap().order_type, OrderType::PickUp);
        assert_eq!(
            reopened.entries()[0].total_per_unit_with_add_ons,
            pkr(54900)
        );
    }

    #[test]
    fn test_malformed_storage_is_empty_cart() {
        let mut storage = MemoryStore::new();
        storage.save(CART_KEY, "{definitely not a cart").unwrap();
        storage.save(BRANCH_KEY, "42").unwrap();

        let cart = CartStore::open(storage, CartSettings::default());
        assert!(cart.is_empty());
        assert!(cart.branch().is_none());
    }

    #[test]
    fn test_restore_repairs_entries() {
        let good = burger(2).into_entry().unwrap();
        let mut duplicate = good.clone();
        duplicate.quantity = 3;
        duplicate.total_per_unit_with_add_ons = pkr(1);
        let mut invalid = deal("Pepsi", 1).into_entry().unwrap();
        invalid.quantity = 0;

        let mut storage = MemoryStore::new();
        save_json(&mut storage, CART_KEY, &vec![good, duplicate, invalid]).unwrap();

        let cart = CartStore::open(storage, CartSettings::default());
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.entries()[0].total_per_unit_with_add_ons, pkr(10000));
    }

    fn combo(labels: &[&str], price: i64, quantity: i64) -> CartCandidate {
        labels.iter().fold(
            CartCandidate::new("deal", "Kuch Bhi Deal", pkr(price), quantity),
            |candidate, label| candidate.with_add_on(AddOnOption::new(*label, pkr(0))),
        )
    }

    #[test]
    fn test_labels_with_separators_stay_separate_lines() {
        let mut cart = store();
        let joined = cart.add_item(combo(&["Fries,Large"], 1500, 1)).unwrap().unwrap();
        let split = cart.add_item(combo(&["Fries", "Large"], 1000, 2)).unwrap().unwrap();
        assert_ne!(joined, split);
        assert_eq!(cart.unique_item_count(), 2);

        cart.set_quantity(&split, 5).unwrap();
        assert_eq!(cart.entry(&joined).unwrap().quantity, 1);
        assert_eq!(cart.entry(&split).unwrap().quantity, 5);

        let reopened = CartStore::open(cart.close(), CartSettings::default());
        assert_eq!(reopened.unique_item_count(), 2);
        assert_eq!(reopened.pricing().unwrap().subtotal, pkr(1500 + 5 * 1000));

        let mut reopened = reopened;
        assert!(reopened.remove_item(&joined).unwrap());
        assert_eq!(reopened.unique_item_count(), 1);
        assert_eq!(reopened.entries()[0].id, split);
    }

    #[test]
    fn test_subscribers_receive_snapshots() {
        let seen: Rc<RefCell<Vec<Money>>> = Rc::new(RefCell::new(Vec::new()));
        let mut cart = store();
        let sink = Rc::clone(&seen);
        let id = cart.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.grand_total));

        let entry = cart.add_item(burger(1)).unwrap().unwrap();
        cart.set_tax_rate(None);
        cart.set_quantity(&entry, 3).unwrap();

        assert_eq!(*seen.borrow(), vec![pkr(11000), pkr(10000), pkr(30000)]);

        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.clear().unwrap();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_end_session_clears_storage() {
        let mut cart = store();
        cart.add_item(burger(1)).unwrap();
        cart.set_branch(BranchSelection::new(OrderType::Delivery)).unwrap();

        let storage = cart.end_session().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_borrowed_adapter() {
        let mut storage = MemoryStore::new();
        {
            let mut cart = CartStore::open(&mut storage, CartSettings::default());
            cart.add_item(burger(1)).unwrap();
        }
        assert!(storage.contains(CART_KEY));
    }

    #[test]
    fn test_line_lookup() {
        let mut cart = store();
        cart.add_item(deal("Pepsi", 1)).unwrap();

        let line = cart.line_for_product(&ProductId::new("deal")).unwrap();
        assert_eq!(line.quantity, 1);
        assert!(cart.line_for_product(&ProductId::new("burger")).is_none());

        let identity = LineIdentity::new(ProductId::new("deal"), ["Pepsi", "Big Band"]);
        assert!(cart.find_line(&identity).is_some());
    }
}

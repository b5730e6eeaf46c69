//! Cart entries and the candidates they are built from.

use crate::cart::LineIdentity;
use crate::catalog::{AddOnOption, AddOnSelection, MenuProduct};
use crate::error::CommerceError;
use crate::ids::{EntryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Line identifier, derived from product and add-on selection.
    pub id: EntryId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Base unit price, before add-ons.
    pub unit_price: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    /// Selected add-on options.
    #[serde(default)]
    pub add_ons: Vec<AddOnOption>,
    /// Unit price plus the prices of all selected add-ons.
    pub total_per_unit_with_add_ons: Money,
}

impl CartEntry {
    /// Price of the line: per-unit total times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.total_per_unit_with_add_ons.try_multiply(self.quantity)
    }

    pub fn identity(&self) -> LineIdentity {
        LineIdentity::of_entry(self)
    }

    /// Labels of the selected add-ons, in selection order.
    pub fn add_on_labels(&self) -> Vec<&str> {
        self.add_ons
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect()
    }

    /// Recompute the per-unit total from the unit price and add-ons.
    pub(crate) fn reprice(&mut self) -> Result<(), CommerceError> {
        self.total_per_unit_with_add_ons = unit_total(&self.unit_price, &self.add_ons)?;
        Ok(())
    }
}

/// What the caller wants to put into the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartCandidate {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub description: Option<String>,
    /// Base unit price, before add-ons.
    pub unit_price: Money,
    /// Chosen add-ons. Only options marked selected become part of the line.
    pub add_ons: Vec<AddOnOption>,
    pub quantity: i64,
}

impl CartCandidate {
    /// Create a candidate with no add-ons.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            image: String::new(),
            description: None,
            unit_price,
            add_ons: Vec::new(),
            quantity,
        }
    }

    /// Build a candidate from a menu product and the customer's add-on picks.
    ///
    /// The unit price is the product's effective (sale-aware) price.
    pub fn from_product(
        product: &MenuProduct,
        selection: &AddOnSelection,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        let add_ons = product.resolve_add_ons(selection)?;
        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            unit_price: product.effective_price(),
            add_ons,
            quantity,
        })
    }

    /// Attach a selected add-on.
    pub fn with_add_on(mut self, option: AddOnOption) -> Self {
        self.add_ons.push(AddOnOption {
            selected: true,
            ..option
        });
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn identity(&self) -> LineIdentity {
        LineIdentity::of_candidate(self)
    }

    /// Per-unit price including selected add-ons.
    pub fn total_per_unit(&self) -> Result<Money, CommerceError> {
        let selected: Vec<AddOnOption> =
            self.add_ons.iter().filter(|o| o.selected).cloned().collect();
        unit_total(&self.unit_price, &selected)
    }

    pub(crate) fn into_entry(self) -> Result<CartEntry, CommerceError> {
        let id = self.identity().entry_id();
        let add_ons: Vec<AddOnOption> = self.add_ons.into_iter().filter(|o| o.selected).collect();
        let total_per_unit_with_add_ons = unit_total(&self.unit_price, &add_ons)?;
        Ok(CartEntry {
            id,
            product_id: self.product_id,
            name: self.name,
            image: self.image,
            unit_price: self.unit_price,
            quantity: self.quantity,
            description: self.description,
            add_ons,
            total_per_unit_with_add_ons,
        })
    }
}

fn unit_total(unit_price: &Money, add_ons: &[AddOnOption]) -> Result<Money, CommerceError> {
    add_ons
        .iter()
        .filter(|o| o.selected)
        .try_fold(*unit_price, |acc, o| acc.try_add(&o.price))
}

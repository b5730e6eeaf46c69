//! Menu product types.

use crate::catalog::{AddOnGroup, AddOnOption, AddOnSelection};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product on the menu, as supplied by the product API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description shown on the card.
    #[serde(default)]
    pub description: Option<String>,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Base price.
    pub price: Money,
    /// Promotional price, if any.
    #[serde(default)]
    pub discounted_price: Option<Money>,
    /// Category identifier.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Category display name.
    #[serde(default)]
    pub category: Option<String>,
    /// Add-on groups offered with this product.
    #[serde(default)]
    pub add_ons: Vec<AddOnGroup>,
}

impl MenuProduct {
    /// Create a product with no add-ons.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            image: String::new(),
            price,
            discounted_price: None,
            category_id: None,
            category: None,
            add_ons: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        self.category_id = Some(id.into());
        self.category = Some(name.into());
        self
    }

    pub fn with_add_on_group(mut self, group: AddOnGroup) -> Self {
        self.add_ons.push(group);
        self
    }

    /// Whether the customer must pick add-ons before adding to cart.
    pub fn has_add_ons(&self) -> bool {
        !self.add_ons.is_empty()
    }

    /// Check if a lower promotional price applies.
    pub fn is_on_sale(&self) -> bool {
        self.discounted_price
            .map(|p| p.amount_minor < self.price.amount_minor)
            .unwrap_or(false)
    }

    /// The price a customer pays per unit before add-ons.
    pub fn effective_price(&self) -> Money {
        match self.discounted_price {
            Some(p) if self.is_on_sale() => p,
            _ => self.price,
        }
    }

    /// Calculate the promotional discount percentage if on sale.
    pub fn sale_percentage(&self) -> Option<f64> {
        if !self.is_on_sale() || self.price.amount_minor == 0 {
            return None;
        }
        let sale = self.effective_price();
        let savings = self.price.amount_minor - sale.amount_minor;
        Some((savings as f64 / self.price.amount_minor as f64) * 100.0)
    }

    /// Validate a selection against this product's add-on groups.
    pub fn resolve_add_ons(
        &self,
        selection: &AddOnSelection,
    ) -> Result<Vec<AddOnOption>, CommerceError> {
        selection.resolve(&self.add_ons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_effective_price_prefers_lower_sale_price() {
        let mut product =
            MenuProduct::new("kadak-chai", "Kadak Chai", Money::new(69900, Currency::PKR));
        assert_eq!(product.effective_price().amount_minor, 69900);

        product.discounted_price = Some(Money::new(59900, Currency::PKR));
        assert!(product.is_on_sale());
        assert_eq!(product.effective_price().amount_minor, 59900);

        product.discounted_price = Some(Money::new(79900, Currency::PKR));
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price().amount_minor, 69900);
    }

    #[test]
    fn test_sale_percentage() {
        let mut product = MenuProduct::new("p", "P", Money::new(10000, Currency::PKR));
        assert_eq!(product.sale_percentage(), None);
        product.discounted_price = Some(Money::new(7500, Currency::PKR));
        assert!((product.sale_percentage().unwrap() - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_product_without_add_ons_accepts_empty_selection() {
        let product =
            MenuProduct::new("pizza", "Special Pizza MD", Money::new(119900, Currency::PKR));
        assert!(!product.has_add_ons());
        assert!(product.resolve_add_ons(&AddOnSelection::new()).unwrap().is_empty());
    }
}

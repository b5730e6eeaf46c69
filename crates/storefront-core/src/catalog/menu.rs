//! In-memory menu and related-product lookup.

use crate::api::ProductApi;
use crate::catalog::{Category, MenuProduct};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// Products sharing a category with `product`, excluding `product` itself.
pub fn related_products<'a>(
    products: &'a [MenuProduct],
    product: &MenuProduct,
) -> Vec<&'a MenuProduct> {
    let Some(category) = product.category_id.as_ref() else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| p.id != product.id && p.category_id.as_ref() == Some(category))
        .collect()
}

/// A menu held in memory, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StaticMenu {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<MenuProduct>,
}

impl StaticMenu {
    pub fn new(products: Vec<MenuProduct>) -> Self {
        Self {
            categories: Vec::new(),
            products,
        }
    }

    /// Parse a menu document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a product, replacing any existing product with the same id.
    pub fn upsert(&mut self, product: MenuProduct) {
        self.products.retain(|p| p.id != product.id);
        self.products.push(product);
    }
}

impl ProductApi for StaticMenu {
    fn product(&self, id: &ProductId) -> Result<Option<MenuProduct>, CommerceError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    fn products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<MenuProduct>, CommerceError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category_id.as_ref() == Some(category))
            .cloned()
            .collect())
    }

    fn all_products(&self) -> Result<Vec<MenuProduct>, CommerceError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn menu() -> StaticMenu {
        let pkr = |v| Money::new(v, Currency::PKR);
        StaticMenu::new(vec![
            MenuProduct::new("kadak-chai", "Kadak Chai", pkr(69900))
                .with_category("drinks", "Drinks"),
            MenuProduct::new("kuch-bhi-deal", "Kuch Bhi Deal", pkr(49900))
                .with_category("fast-food", "Fast Food"),
            MenuProduct::new("special-pizza-md", "Special Pizza MD", pkr(119900))
                .with_category("fast-food", "Fast Food"),
            MenuProduct::new("mystery", "Mystery Box", pkr(10000)),
        ])
    }

    #[test]
    fn test_related_products_same_category_only() {
        let menu = menu();
        let deal = menu.product(&"kuch-bhi-deal".into()).unwrap().unwrap();
        let related = related_products(&menu.products, &deal);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id.as_str(), "special-pizza-md");
    }

    #[test]
    fn test_related_products_without_category() {
        let menu = menu();
        let mystery = menu.product(&"mystery".into()).unwrap().unwrap();
        assert!(related_products(&menu.products, &mystery).is_empty());
    }

    #[test]
    fn test_products_in_category() {
        let menu = menu();
        let fast_food = menu.products_in_category(&"fast-food".into()).unwrap();
        assert_eq!(fast_food.len(), 2);
        assert!(menu.product(&"missing".into()).unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces() {
        let mut menu = menu();
        menu.upsert(MenuProduct::new(
            "kadak-chai",
            "Kadak Chai XL",
            Money::new(89900, Currency::PKR),
        ));
        assert_eq!(menu.products.len(), 4);
        let chai = menu.product(&"kadak-chai".into()).unwrap().unwrap();
        assert_eq!(chai.name, "Kadak Chai XL");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "products": [{
                "id": "kadak-chai",
                "name": "Kadak Chai",
                "price": { "amount_minor": 69900, "currency": "PKR" }
            }]
        }"#;
        let menu = StaticMenu::from_json(json).unwrap();
        assert_eq!(menu.products.len(), 1);
        assert!(menu.categories.is_empty());
        assert!(StaticMenu::from_json("not json").is_err());
    }
}

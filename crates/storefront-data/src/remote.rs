//! Remote product and order services.
//!
//! Backend endpoints:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | one product | `GET /item/get/{id}` |
//! | products in a category | `GET /item/getByCategory/{category_id}` |
//! | all products | `GET /item/getAll` |
//! | place an order | `POST /order/add` |
//!
//! Prices arrive in major units. Ids may be numbers or strings.

use serde::Deserialize;
use storefront_core::api::{OrderApi, ProductApi};
use storefront_core::catalog::{AddOnGroup, AddOnOption, MenuProduct};
use storefront_core::checkout::{OrderConfirmation, OrderRequest};
use storefront_core::ids::{CategoryId, ProductId};
use storefront_core::money::{Currency, Money};
use storefront_core::CommerceError;
use tracing::debug;

use crate::{FetchClient, FetchError};

/// Menu served by the storefront backend.
#[derive(Debug, Clone)]
pub struct RemoteMenu {
    client: FetchClient,
    currency: Currency,
}

impl RemoteMenu {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            currency: Currency::PKR,
        }
    }

    /// Currency the backend quotes prices in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    fn fetch_list(&self, path: &str) -> Result<Vec<MenuProduct>, FetchError> {
        let items: Option<Vec<WireItem>> = self
            .client
            .get(path)
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;
        let products: Vec<MenuProduct> = items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.into_product(self.currency))
            .collect();
        debug!(path, count = products.len(), "fetched products");
        Ok(products)
    }
}

impl ProductApi for RemoteMenu {
    fn product(&self, id: &ProductId) -> Result<Option<MenuProduct>, CommerceError> {
        let response = self
            .client
            .get(format!("/item/get/{}", id))
            .header("Accept", "application/json")
            .send()?;
        if response.is_not_found() {
            return Ok(None);
        }
        let item: Option<WireItem> = response.error_for_status()?.json()?;
        Ok(item.map(|item| item.into_product(self.currency)))
    }

    fn products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<MenuProduct>, CommerceError> {
        Ok(self.fetch_list(&format!("/item/getByCategory/{}", category))?)
    }

    fn all_products(&self) -> Result<Vec<MenuProduct>, CommerceError> {
        Ok(self.fetch_list("/item/getAll")?)
    }
}

/// Order intake on the storefront backend.
#[derive(Debug, Clone)]
pub struct RemoteOrders {
    client: FetchClient,
}

impl RemoteOrders {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

impl OrderApi for RemoteOrders {
    fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError> {
        let response: WireOrderResponse = self
            .client
            .post("/order/add")
            .json(order)?
            .send()?
            .error_for_status()?
            .json()?;

        let placed = response.order.ok_or_else(|| {
            CommerceError::Api("order response did not include an order".to_string())
        })?;
        debug!(order_id = %placed.order_id, "backend accepted order");
        Ok(OrderConfirmation::new(placed.order_id.into_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(alias = "itemId")]
    id: WireId,
    #[serde(alias = "itemName")]
    name: String,
    #[serde(default, alias = "itemDescription")]
    description: Option<String>,
    #[serde(default, alias = "itemImage")]
    image: Option<String>,
    price: f64,
    #[serde(default, alias = "discountedPrice")]
    discounted_price: Option<f64>,
    #[serde(default, alias = "categoryId")]
    category_id: Option<WireId>,
    #[serde(default, alias = "cat_name", alias = "category")]
    category_name: Option<String>,
    #[serde(default, alias = "addOns")]
    add_ons: Option<Vec<WireAddOn>>,
}

impl WireItem {
    fn into_product(self, currency: Currency) -> MenuProduct {
        let mut product = MenuProduct::new(
            self.id.into_string(),
            self.name,
            Money::from_decimal(self.price, currency),
        );
        product.description = self.description.filter(|d| !d.trim().is_empty());
        product.image = self.image.unwrap_or_default();
        product.discounted_price = self
            .discounted_price
            .map(|p| Money::from_decimal(p, currency));
        product.category_id = self.category_id.map(|id| CategoryId::new(id.into_string()));
        product.category = self.category_name;
        product.add_ons = self
            .add_ons
            .unwrap_or_default()
            .into_iter()
            .map(|group| group.into_group(currency))
            .collect();
        product
    }
}

#[derive(Debug, Deserialize)]
struct WireAddOn {
    heading: String,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default, rename = "addOnOptions", alias = "options")]
    options: Option<Vec<WireAddOnOption>>,
}

impl WireAddOn {
    fn into_group(self, currency: Currency) -> AddOnGroup {
        let mut group = AddOnGroup::new(self.heading);
        group.required = self.required.unwrap_or(false);
        group.labels = self.labels.unwrap_or_default();
        group.options = self
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|o| {
                AddOnOption::new(o.label, Money::from_decimal(o.price.unwrap_or(0.0), currency))
            })
            .collect();
        group
    }
}

#[derive(Debug, Deserialize)]
struct WireAddOnOption {
    label: String,
    #[serde(default)]
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireOrderResponse {
    #[serde(default)]
    order: Option<WirePlacedOrder>,
}

#[derive(Debug, Deserialize)]
struct WirePlacedOrder {
    #[serde(rename = "orderId", alias = "order_id", alias = "id")]
    order_id: WireId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, MockTransport};
    use crate::Response;
    use std::collections::HashMap;
    use storefront_core::cart::{CartCandidate, CartSettings, CartStore};
    use storefront_core::catalog::AddOnSelection;
    use storefront_core::checkout::Checkout;
    use storefront_core::persistence::MemoryStore;

    const DEAL: &str = r#"{
        "id": 12,
        "name": "Kuch Bhi Deal",
        "description": "Any two with a drink",
        "price": 499,
        "category_id": 3,
        "cat_name": "Fast Food",
        "addOns": [
            {
                "heading": "Product",
                "required": true,
                "labels": ["select any 2"],
                "addOnOptions": [
                    { "label": "Big Band" },
                    { "label": "Tikka", "price": 50 }
                ]
            },
            {
                "heading": "Soft Drink 345ML",
                "required": true,
                "addOnOptions": [{ "label": "Pepsi", "isChecked": false }]
            }
        ]
    }"#;

    fn status(code: u16, body: &str) -> Response {
        Response::new(code, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_product_maps_wire_fields() {
        let transport = MockTransport::replying(vec![Ok(Response::json_ok(DEAL))]);
        let menu = RemoteMenu::new(client(&transport));

        let product = menu.product(&ProductId::new("12")).unwrap().unwrap();
        assert_eq!(transport.sent()[0].url(), "http://api.test/item/get/12");
        assert_eq!(product.id.as_str(), "12");
        assert_eq!(product.price.amount_minor, 49900);
        assert_eq!(product.category_id.as_ref().map(|c| c.as_str()), Some("3"));
        assert_eq!(product.category.as_deref(), Some("Fast Food"));
        assert_eq!(product.add_ons.len(), 2);
        assert_eq!(product.add_ons[0].max_selectable(), 2);
        assert_eq!(product.add_ons[0].options[1].price.amount_minor, 5000);

        let selection = AddOnSelection::new()
            .pick("Product", "Tikka")
            .pick("Soft Drink 345ML", "Pepsi");
        let candidate = CartCandidate::from_product(&product, &selection, 1).unwrap();
        assert_eq!(candidate.total_per_unit().unwrap().amount_minor, 54900);
    }

    #[test]
    fn test_constants_style_fields() {
        let body = r#"{"itemId":"kadak-chai","itemName":"Kadak Chai","itemImage":"/chai.png",
            "price":699,"discountedPrice":599,"category":"Drinks"}"#;
        let transport = MockTransport::replying(vec![Ok(Response::json_ok(body))]);
        let menu = RemoteMenu::new(client(&transport));

        let product = menu.product(&ProductId::new("kadak-chai")).unwrap().unwrap();
        assert_eq!(product.name, "Kadak Chai");
        assert_eq!(product.image, "/chai.png");
        assert_eq!(product.effective_price().amount_minor, 59900);
        assert!(product.add_ons.is_empty());
    }

    #[test]
    fn test_missing_product() {
        let transport = MockTransport::replying(vec![
            Ok(status(404, "not found")),
            Ok(Response::json_ok("null")),
            Ok(status(500, "boom")),
        ]);
        let menu = RemoteMenu::new(client(&transport));
        let id = ProductId::new("99");

        assert!(menu.product(&id).unwrap().is_none());
        assert!(menu.product(&id).unwrap().is_none());
        assert!(matches!(menu.product(&id), Err(CommerceError::Api(_))));
    }

    #[test]
    fn test_related_products_excludes_self() {
        let list = format!(
            r#"[{}, {{"id": 13, "name": "Special Pizza", "price": 1199, "category_id": 3}}]"#,
            DEAL
        );
        let transport = MockTransport::replying(vec![
            Ok(Response::json_ok(DEAL)),
            Ok(Response::json_ok(list)),
        ]);
        let menu = RemoteMenu::new(client(&transport));

        let deal = menu.require_product(&ProductId::new("12")).unwrap();
        let related = menu.related_products(&deal).unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Special Pizza");
        assert_eq!(transport.sent()[1].url(), "http://api.test/item/getByCategory/3");
    }

    #[test]
    fn test_all_products_accepts_null() {
        let transport = MockTransport::replying(vec![Ok(Response::json_ok("null"))]);
        let menu = RemoteMenu::new(client(&transport));
        assert!(menu.all_products().unwrap().is_empty());
        assert_eq!(transport.sent()[0].url(), "http://api.test/item/getAll");
    }

    #[test]
    fn test_place_order_through_backend() {
        let transport = MockTransport::replying(vec![Ok(Response::json_ok(
            r#"{"order": {"orderId": 1042}}"#,
        ))]);
        let orders = RemoteOrders::new(client(&transport));

        let mut cart = CartStore::open(MemoryStore::new(), CartSettings::default());
        let deal = CartCandidate::new("12", "Kuch Bhi Deal", Money::new(49900, Currency::PKR), 1);
        cart.add_item(deal).unwrap();

        let confirmation = Checkout::new().place_order(&mut cart, &orders).unwrap();
        assert_eq!(confirmation.order_id.as_str(), "1042");
        assert!(cart.is_empty());

        let sent = transport.sent();
        assert_eq!(sent[0].url(), "http://api.test/order/add");
        let body: serde_json::Value = serde_json::from_slice(sent[0].body().unwrap()).unwrap();
        assert_eq!(body["lines"][0]["productId"], "12");
        assert_eq!(body["pricing"]["grand_total"]["amount_minor"], 54890);
    }

    #[test]
    fn test_rejected_order_keeps_cart() {
        let transport = MockTransport::replying(vec![
            Ok(status(422, "branch closed")),
            Ok(Response::json_ok("{}")),
        ]);
        let orders = RemoteOrders::new(client(&transport));
        let mut cart = CartStore::open(MemoryStore::new(), CartSettings::default());
        cart.add_item(CartCandidate::new("12", "Deal", Money::new(49900, Currency::PKR), 1))
            .unwrap();

        let err = Checkout::new().place_order(&mut cart, &orders).unwrap_err();
        assert!(err.to_string().contains("branch closed"));
        assert_eq!(cart.item_count(), 1);

        assert!(Checkout::new().place_order(&mut cart, &orders).is_err());
        assert_eq!(cart.item_count(), 1);
    }
}

//! Collaborator interfaces for the remote product and order services.

use crate::catalog::{self, MenuProduct};
use crate::checkout::{OrderConfirmation, OrderRequest};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};

/// Supplies product records for building cart candidates.
pub trait ProductApi {
    /// Fetch a single product; `None` when the id is unknown.
    fn product(&self, id: &ProductId) -> Result<Option<MenuProduct>, CommerceError>;

    /// Like [`ProductApi::product`], but an unknown id is an error.
    fn require_product(&self, id: &ProductId) -> Result<MenuProduct, CommerceError> {
        self.product(id)?
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    fn products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<MenuProduct>, CommerceError>;

    fn all_products(&self) -> Result<Vec<MenuProduct>, CommerceError>;

    /// Other products in the same category.
    fn related_products(&self, product: &MenuProduct) -> Result<Vec<MenuProduct>, CommerceError> {
        let Some(category) = &product.category_id else {
            return Ok(Vec::new());
        };
        let siblings = self.products_in_category(category)?;
        Ok(catalog::related_products(&siblings, product)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Accepts orders.
pub trait OrderApi {
    fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError>;
}

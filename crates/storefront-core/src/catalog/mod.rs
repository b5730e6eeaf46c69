//! Menu catalog module.
//!
//! Contains types for menu products, add-on groups, and categories.

mod addon;
mod category;
mod menu;
mod product;

pub use addon::{AddOnGroup, AddOnOption, AddOnSelection};
pub use category::Category;
pub use menu::{related_products, StaticMenu};
pub use product::MenuProduct;

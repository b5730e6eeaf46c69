//! Key-value persistence for the storefront cart.
//!
//! [`Cache`] stores JSON values in Spin's Key-Value Store when compiled for
//! `wasm32`, and in a directory of JSON files otherwise. Both implement
//! [`PersistenceAdapter`](storefront_core::persistence::PersistenceAdapter),
//! so a cart store can write straight through to them.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{Cache, SessionId, SessionStore};
//! use storefront_core::prelude::*;
//!
//! let storage = SessionStore::new(Cache::open_default()?, SessionId::generate());
//! let mut cart = CartStore::open(storage, CartSettings::default());
//! cart.add_item(candidate)?;
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
#[cfg(not(target_arch = "wasm32"))]
pub use kv::DEFAULT_CACHE_DIR;
pub use kv::Cache;
pub use session::{SessionId, SessionStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, SessionId, SessionStore};
}

//! Durable storage for cart state across sessions.
//!
//! The storefront keeps two values: the cart entries under [`CART_KEY`] and
//! the branch selection under [`BRANCH_KEY`]. Both are stored as JSON text.

use std::collections::HashMap;

use crate::error::CommerceError;
use serde::{de::DeserializeOwned, Serialize};

/// Key for the persisted cart entries.
pub const CART_KEY: &str = "cart";
/// Key for the persisted branch selection.
pub const BRANCH_KEY: &str = "branch";

/// Key-value storage the cart store writes through to.
pub trait PersistenceAdapter {
    /// Load a value; `None` when the key has never been saved or was cleared.
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError>;

    /// Remove a value. Clearing a missing key is not an error.
    fn clear(&mut self, key: &str) -> Result<(), CommerceError>;
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<P> {
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError> {
        (**self).save(key, value)
    }

    fn clear(&mut self, key: &str) -> Result<(), CommerceError> {
        (**self).clear(key)
    }
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for &mut P {
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError> {
        (**self).save(key, value)
    }

    fn clear(&mut self, key: &str) -> Result<(), CommerceError> {
        (**self).clear(key)
    }
}

/// Load and deserialize a JSON value.
pub fn load_json<T, P>(adapter: &P, key: &str) -> Result<Option<T>, CommerceError>
where
    T: DeserializeOwned,
    P: PersistenceAdapter + ?Sized,
{
    match adapter.load(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and save a JSON value.
pub fn save_json<T, P>(adapter: &mut P, key: &str, value: &T) -> Result<(), CommerceError>
where
    T: Serialize + ?Sized,
    P: PersistenceAdapter + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    adapter.save(key, &raw)
}

/// In-memory storage, for tests and for sessions that should not outlive
/// the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), CommerceError> {
        self.values.remove(key);
        Ok(())
    }
}

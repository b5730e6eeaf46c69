//! Key-Value store wrapper with automatic serialization.
//!
//! On `wasm32` the cache is Spin's Key-Value Store. Elsewhere it is a
//! directory holding one JSON file per key, so a terminal session can keep
//! its cart between runs.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use storefront_core::persistence::PersistenceAdapter;
use storefront_core::CommerceError;

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Directory used by [`Cache::open`] outside of Spin.
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_CACHE_DIR: &str = ".storefront";

/// Type-safe cache backed by a key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    #[cfg(target_arch = "wasm32")]
    store: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    root: PathBuf,
}

impl Cache {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, CacheError> {
        Self::open("default")
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let branch: Option<BranchSelection> = cache.get("branch")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Stored text for a key.
    #[cfg(target_arch = "wasm32")]
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CacheError::StoreError(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::StoreError(e.to_string())),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Delete a value from the cache.
    #[cfg(target_arch = "wasm32")]
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store
            .delete(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Check if a key exists in the cache.
    #[cfg(target_arch = "wasm32")]
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store
            .exists(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Get all keys in the cache.
    #[cfg(target_arch = "wasm32")]
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store
            .get_keys()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Open a named store under [`DEFAULT_CACHE_DIR`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(CacheError::OpenError(format!("invalid store name: {:?}", name)));
        }
        Self::at(Path::new(DEFAULT_CACHE_DIR).join(name))
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = dir.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stored text for a key.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temporary file so readers never see a partial value.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "wrote cache entry");
        Ok(())
    }

    /// Delete a value from the cache. Missing keys are fine.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    /// Get all keys in the cache, sorted.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root)? {
            let file_name = dir_entry?.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            match decode_key(stem) {
                Some(key) => keys.push(key),
                None => tracing::warn!(file = name, "skipping unrecognised cache file"),
            }
        }
        keys.sort();
        Ok(keys)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

impl PersistenceAdapter for Cache {
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError> {
        Ok(self.get_raw(key)?)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError> {
        Ok(self.set_raw(key, value)?)
    }

    fn clear(&mut self, key: &str) -> Result<(), CommerceError> {
        Ok(self.delete(key)?)
    }
}

/// Percent-encode everything outside `[A-Za-z0-9_-]` so any key is a safe
/// file name.
#[cfg(not(target_arch = "wasm32"))]
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(not(target_arch = "wasm32"))]
fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("session", "sess_abc", "cart");
/// assert_eq!(key, "session:sess_abc:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_cache() -> Cache {
        let dir = std::env::temp_dir().join(format!(
            "storefront-cache-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Cache::at(dir).unwrap()
    }

    #[test]
    fn test_set_get_delete() {
        let cache = temp_cache();
        assert_eq!(cache.get::<Vec<i32>>("cart").unwrap(), None);

        cache.set("cart", &vec![1, 2]).unwrap();
        assert_eq!(cache.get::<Vec<i32>>("cart").unwrap(), Some(vec![1, 2]));
        assert!(cache.exists("cart").unwrap());

        cache.delete("cart").unwrap();
        assert!(!cache.exists("cart").unwrap());
        cache.delete("cart").unwrap();

        std::fs::remove_dir_all(cache.root()).unwrap();
    }

    #[test]
    fn test_keys_round_trip_through_file_names() {
        let cache = temp_cache();
        cache.set_raw("session:sess_x/y:cart", "[]").unwrap();
        cache.set_raw("branch", "{}").unwrap();

        assert_eq!(
            cache.keys().unwrap(),
            vec!["branch".to_string(), "session:sess_x/y:cart".to_string()]
        );
        assert!(cache.root().join("session%3Asess_x%2Fy%3Acart.json").is_file());

        std::fs::remove_dir_all(cache.root()).unwrap();
    }

    #[test]
    fn test_adapter_interface() {
        let mut cache = temp_cache();
        cache.save("cart", "[]").unwrap();
        assert_eq!(cache.load("cart").unwrap().as_deref(), Some("[]"));
        cache.clear("cart").unwrap();
        assert_eq!(cache.load("cart").unwrap(), None);

        std::fs::remove_dir_all(cache.root()).unwrap();
    }

    #[test]
    fn test_malformed_value_is_serialization_error() {
        let cache = temp_cache();
        cache.set_raw("cart", "{oops").unwrap();
        let err: CommerceError = cache.get::<Vec<i32>>("cart").unwrap_err().into();
        assert!(matches!(err, CommerceError::Serialization(_)));

        std::fs::remove_dir_all(cache.root()).unwrap();
    }

    #[test]
    fn test_invalid_store_name() {
        assert!(Cache::open("../escape").is_err());
        assert!(Cache::open("").is_err());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("session", "abc", 7), "session:abc:7");
    }
}

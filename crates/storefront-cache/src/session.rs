//! Per-session key scoping.
//!
//! Several customers can share one cache: each [`SessionStore`] prefixes the
//! cart and branch keys with its session id.

use crate::{cache_key, Cache, CacheError};
use serde::{Deserialize, Serialize};
use storefront_core::persistence::{PersistenceAdapter, BRANCH_KEY, CART_KEY};
use storefront_core::CommerceError;

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Persistence adapter scoped to one session.
///
/// # Example
///
/// ```rust,ignore
/// let cache = Cache::open_default()?;
/// let storage = SessionStore::new(cache, SessionId::generate());
/// let cart = CartStore::open(storage, CartSettings::default());
/// ```
pub struct SessionStore {
    cache: Cache,
    id: SessionId,
}

impl SessionStore {
    pub fn new(cache: Cache, id: SessionId) -> Self {
        Self { cache, id }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Remove everything this session stored and hand the cache back.
    pub fn end(self) -> Result<Cache, CacheError> {
        for key in [CART_KEY, BRANCH_KEY] {
            self.cache.delete(&self.scoped(key))?;
        }
        tracing::debug!(session = %self.id, "ended session");
        Ok(self.cache)
    }

    fn scoped(&self, key: &str) -> String {
        cache_key!("session", self.id, key)
    }
}

impl PersistenceAdapter for SessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, CommerceError> {
        Ok(self.cache.get_raw(&self.scoped(key))?)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CommerceError> {
        Ok(self.cache.set_raw(&self.scoped(key), value)?)
    }

    fn clear(&mut self, key: &str) -> Result<(), CommerceError> {
        Ok(self.cache.delete(&self.scoped(key))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_new() {
        let id = SessionId::new("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(format!("{}", id), "abc123");
    }

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        assert!(s.starts_with("sess_"));
        // 18 bytes encode to 24 base64 characters.
        assert_eq!(s.len(), 29);
        assert_ne!(id, SessionId::generate());
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""serialize-me""#);

        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_sessions_are_isolated() {
        let dir = std::env::temp_dir().join(format!("storefront-session-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut alice = SessionStore::new(Cache::at(&dir).unwrap(), SessionId::new("alice"));
        let mut bob = SessionStore::new(Cache::at(&dir).unwrap(), SessionId::new("bob"));

        alice.save(CART_KEY, "[1]").unwrap();
        bob.save(CART_KEY, "[2]").unwrap();
        assert_eq!(alice.load(CART_KEY).unwrap().as_deref(), Some("[1]"));
        assert_eq!(bob.load(CART_KEY).unwrap().as_deref(), Some("[2]"));
        assert!(alice.cache().exists("session:alice:cart").unwrap());

        let cache = alice.end().unwrap();
        assert!(!cache.exists("session:alice:cart").unwrap());
        assert!(cache.exists("session:bob:cart").unwrap());
        bob.clear(CART_KEY).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

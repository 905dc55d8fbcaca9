//! API key resolution.
//!
//! A key set for the current session always wins over the environment.
//! Resolution happens at call time, so a missing key only surfaces when a
//! run is attempted.

use std::env;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::{Result, ThinkmodeError};

/// Environment variables consulted, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Shared credential store. Clones share the same session key.
#[derive(Clone)]
pub struct ApiKeyStore {
    dynamic: Arc<RwLock<Option<String>>>,
    env_lookup: fn(&str) -> Option<String>,
}

impl ApiKeyStore {
    pub fn new() -> Self {
        Self::with_env_lookup(read_env)
    }

    /// Store backed by a custom environment lookup.
    pub fn with_env_lookup(env_lookup: fn(&str) -> Option<String>) -> Self {
        Self {
            dynamic: Arc::new(RwLock::new(None)),
            env_lookup,
        }
    }

    /// Set the session key. A blank key clears it.
    pub fn set_dynamic_key(&self, key: impl Into<String>) {
        let key = key.into().trim().to_string();
        let mut guard = self.dynamic.write().unwrap_or_else(|e| e.into_inner());
        *guard = if key.is_empty() { None } else { Some(key) };
    }

    pub fn clear_dynamic_key(&self) {
        let mut guard = self.dynamic.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn has_dynamic_key(&self) -> bool {
        self.dynamic
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Resolve the key to use for a call.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if neither a session key nor a non-blank
    /// environment key is available.
    pub fn resolve(&self) -> Result<String> {
        if let Some(key) = self
            .dynamic
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Ok(key);
        }

        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| (self.env_lookup)(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or(ThinkmodeError::MissingApiKey)
    }

    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }
}

impl Default for ApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyStore")
            .field("dynamic", &self.has_dynamic_key().then_some("<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn gemini_env(name: &str) -> Option<String> {
        match name {
            "GEMINI_API_KEY" => Some("env-gemini".to_string()),
            "API_KEY" => Some("env-generic".to_string()),
            _ => None,
        }
    }

    fn generic_env(name: &str) -> Option<String> {
        match name {
            "GEMINI_API_KEY" => Some("   ".to_string()),
            "API_KEY" => Some("env-generic".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let store = ApiKeyStore::with_env_lookup(no_env);
        assert!(matches!(store.resolve(), Err(ThinkmodeError::MissingApiKey)));
        assert!(!store.is_available());
    }

    #[test]
    fn test_dynamic_key_wins_over_environment() {
        let store = ApiKeyStore::with_env_lookup(gemini_env);
        store.set_dynamic_key("session-key");
        assert_eq!(store.resolve().unwrap(), "session-key");
    }

    #[test]
    fn test_environment_priority_order() {
        let store = ApiKeyStore::with_env_lookup(gemini_env);
        assert_eq!(store.resolve().unwrap(), "env-gemini");
    }

    #[test]
    fn test_blank_environment_value_is_skipped() {
        let store = ApiKeyStore::with_env_lookup(generic_env);
        assert_eq!(store.resolve().unwrap(), "env-generic");
    }

    #[test]
    fn test_blank_dynamic_key_clears() {
        let store = ApiKeyStore::with_env_lookup(no_env);
        store.set_dynamic_key("abc");
        assert!(store.has_dynamic_key());
        store.set_dynamic_key("  ");
        assert!(!store.has_dynamic_key());
    }

    #[test]
    fn test_clones_share_session_key() {
        let store = ApiKeyStore::with_env_lookup(no_env);
        let clone = store.clone();
        clone.set_dynamic_key("shared");
        assert_eq!(store.resolve().unwrap(), "shared");
        store.clear_dynamic_key();
        assert!(clone.resolve().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let store = ApiKeyStore::with_env_lookup(no_env);
        store.set_dynamic_key("super-secret");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}

//! The write-once context store.

use crate::errors::{ContextLookupError, ContextMutationError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// The key-value state passed to one pipeline replicate.
///
/// Keys are write-once: [`add`](Self::add) on an existing key fails with a
/// [`ContextMutationError`] rather than silently replacing the value. The
/// override surface ([`override_entry`](Self::override_entry) /
/// [`override_entries`](Self::override_entries)) is the only way to change
/// a present key, and every replacement it performs is logged so intentional
/// overrides stay auditable. Keys are never removed.
///
/// A context is exclusively owned by its replicate: the runner constructs
/// it, seeds defaults, applies treatments, then hands it to the execution
/// backend, which must treat it as immutable. Mutation goes through
/// `&mut self` and there is no interior locking; sharing one context across
/// concurrent replicates is unsupported.
#[derive(Debug, Clone, Default)]
pub struct FrozenContext {
    data: HashMap<String, serde_json::Value>,
    /// Keys in first-insertion order, for inspection and debugging.
    order: Vec<String>,
}

impl FrozenContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded from ordered entries.
    ///
    /// # Errors
    ///
    /// Returns `ContextMutationError` if the entries contain a duplicate
    /// key; seed data colliding with itself is the same defect as a
    /// colliding `add`.
    pub fn from_entries<K, V, I>(entries: I) -> Result<Self, ContextMutationError>
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut ctx = Self::new();
        for (key, value) in entries {
            ctx.add(key, value)?;
        }
        Ok(ctx)
    }

    /// Inserts a new key.
    ///
    /// # Errors
    ///
    /// Returns `ContextMutationError` if the key already exists. The stored
    /// value is unchanged after a failed call.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<(), ContextMutationError> {
        let key = key.into();
        if self.data.contains_key(&key) {
            return Err(ContextMutationError::new(&key));
        }
        self.order.push(key.clone());
        self.data.insert(key, value.into());
        Ok(())
    }

    /// Explicitly replaces one key's value, inserting it if absent.
    ///
    /// This is the only sanctioned path to change a present key. Each
    /// replacement is logged at info level for auditability.
    pub fn override_entry(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.data.get_mut(&key) {
            tracing::info!(key = %key, "context override: replacing existing value");
            *existing = value;
        } else {
            tracing::debug!(key = %key, "context override: inserting absent key");
            self.order.push(key.clone());
            self.data.insert(key, value);
        }
    }

    /// Explicitly replaces the values of one or more keys.
    ///
    /// Behaves like [`override_entry`](Self::override_entry) for each entry
    /// in order: present keys are replaced, absent keys are inserted.
    pub fn override_entries<K, V, I>(&mut self, changes: I)
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in changes {
            self.override_entry(key, value);
        }
    }

    /// Gets a value by key.
    ///
    /// # Errors
    ///
    /// Returns `ContextLookupError` if the key is absent.
    pub fn get(&self, key: &str) -> Result<&serde_json::Value, ContextLookupError> {
        self.data.get(key).ok_or_else(|| ContextLookupError::new(key))
    }

    /// Gets a value by key, deserialized into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns `ContextLookupError` if the key is absent or the stored
    /// value does not deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ContextLookupError> {
        let value = self.get(key)?;
        serde_json::from_value(value.clone()).map_err(|_| ContextLookupError::new(key))
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns all keys in first-insertion order.
    ///
    /// An overridden key keeps the position of its original insertion.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Returns a copy of all data.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.data.clone()
    }
}

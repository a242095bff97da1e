//! Lazy model-engine initializers.
//!
//! Pipeline steps that talk to an external model-serving engine (a vLLM
//! instance, an Ollama server) should not pay construction cost until the
//! first step actually needs the client, and repeated initialization calls
//! must hand back the same client. [`LazyEngine`] captures that contract;
//! the engine configuration is typically read out of context entries via
//! [`engine_config`]. The clients themselves are out of scope here.

use crate::context::FrozenContext;
use crate::errors::{ContextLookupError, EngineInitError};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// The fallible constructor a lazy engine wraps.
type EngineFactory<T> = dyn Fn() -> Result<T, EngineInitError> + Send + Sync;

/// A lazily-constructed, idempotent-to-call engine initializer.
///
/// The factory runs at most once successfully; every later
/// [`handle`](Self::handle) call returns the cached client. A failed
/// construction caches nothing, so the next call retries the factory.
///
/// Unlike [`FrozenContext`], an engine handle is shared across pipeline
/// steps, so initialization is guarded by a lock.
pub struct LazyEngine<T> {
    name: String,
    factory: Box<EngineFactory<T>>,
    handle: Mutex<Option<Arc<T>>>,
}

impl<T> LazyEngine<T> {
    /// Creates a lazy engine around a fallible factory.
    ///
    /// The factory is not invoked here.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<T, EngineInitError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            handle: Mutex::new(None),
        }
    }

    /// Returns the engine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the client has already been constructed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Returns the ready-to-use client handle, constructing it on first
    /// call.
    ///
    /// # Errors
    ///
    /// Propagates the factory's `EngineInitError`. Nothing is cached on
    /// failure; a later call retries.
    pub fn handle(&self) -> Result<Arc<T>, EngineInitError> {
        let mut guard = self.handle.lock();
        if let Some(handle) = guard.as_ref() {
            return Ok(handle.clone());
        }

        tracing::info!(engine = %self.name, "initializing engine client");
        let client = Arc::new((self.factory)()?);
        *guard = Some(client.clone());
        Ok(client)
    }
}

impl<T> fmt::Debug for LazyEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyEngine")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

/// Reads a typed engine configuration out of a context entry.
///
/// Engine initializers are keyed by configuration values that originate
/// from context entries; this is the boundary where they are pulled out.
///
/// # Errors
///
/// Returns `ContextLookupError` if the key is absent or does not
/// deserialize into `T`.
pub fn engine_config<T: DeserializeOwned>(
    ctx: &FrozenContext,
    key: &str,
) -> Result<T, ContextLookupError> {
    ctx.get_as(key)
}

//! Error types for the crystallize framework.
//!
//! Every error here propagates unchanged to the caller: there are no
//! retries and no local recovery. A replicate that hits a mutation error
//! is aborted by its runner; other replicates own their own contexts and
//! are unaffected.

use thiserror::Error;

/// The main error type for crystallize operations.
#[derive(Debug, Error)]
pub enum CrystallizeError {
    /// A write-once violation in a context.
    #[error("{0}")]
    Mutation(#[from] ContextMutationError),

    /// A read of a missing context key.
    #[error("{0}")]
    Lookup(#[from] ContextLookupError),

    /// An engine initializer failed to construct its client.
    #[error("{0}")]
    EngineInit(#[from] EngineInitError),

    /// A replicate's pipeline function failed.
    #[error("Replicate execution failed: {0}")]
    Execution(String),

    /// A generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ContextError> for CrystallizeError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Mutation(e) => Self::Mutation(e),
            ContextError::Lookup(e) => Self::Lookup(e),
        }
    }
}

/// Errors a context operation (and therefore a treatment) can produce.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    /// A write-once violation.
    #[error("{0}")]
    Mutation(#[from] ContextMutationError),

    /// A read of a missing key.
    #[error("{0}")]
    Lookup(#[from] ContextLookupError),
}

/// Error raised when `add` targets a key the context already holds.
///
/// This is the primary correctness guarantee of the whole system: a key
/// that was read earlier has not been silently changed underneath the
/// reader. The only sanctioned replacement path is the override surface.
#[derive(Debug, Clone, Error)]
#[error("Context mutation denied: key '{key}' already exists (use the override surface to replace it)")]
pub struct ContextMutationError {
    /// The key that was already present.
    pub key: String,
}

impl ContextMutationError {
    /// Creates a new context mutation error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when reading a key the context does not hold.
#[derive(Debug, Clone, Error)]
#[error("Context lookup failed: key '{key}' not found")]
pub struct ContextLookupError {
    /// The missing key.
    pub key: String,
}

impl ContextLookupError {
    /// Creates a new context lookup error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when a lazy engine initializer fails to construct its
/// client handle.
#[derive(Debug, Clone, Error)]
#[error("Engine '{engine}' failed to initialize: {reason}")]
pub struct EngineInitError {
    /// The engine name.
    pub engine: String,
    /// The reason for the failure.
    pub reason: String,
}

impl EngineInitError {
    /// Creates a new engine initialization error.
    #[must_use]
    pub fn new(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            reason: reason.into(),
        }
    }
}

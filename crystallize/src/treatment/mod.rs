//! Treatments: named context mutations applied before a replicate runs.

use crate::context::FrozenContext;
use crate::errors::ContextError;
use std::fmt;

/// The normalized mutation procedure a treatment executes.
type ApplyFn = dyn Fn(&mut FrozenContext) -> Result<(), ContextError> + Send + Sync;

/// A named, reusable context mutation recipe.
///
/// Unlike a pipeline step, a treatment does not hook into the execution
/// lifecycle; it simply mutates the [`FrozenContext`] before the pipeline
/// starts. A treatment can be declared as a function over the context or
/// as a mapping of keys to insert; both forms are normalized at
/// construction into a single procedure, so [`apply`](Self::apply) has one
/// code path regardless of how the treatment was declared.
///
/// Treatments are stateless with respect to the context: they hold no
/// back-reference and are handed a context only for the duration of
/// `apply`. They are constructed once at experiment-definition time and
/// reused across replicates. Two treatments are distinguished by identity,
/// not structure; the name is for display and reporting only, and callers
/// who need unique names in reports must pick distinct ones.
pub struct Treatment {
    name: String,
    apply_fn: Box<ApplyFn>,
}

impl Treatment {
    /// Creates a treatment from a function over the context.
    ///
    /// The function performs zero or more `add`/`override_entries` calls.
    /// `name` should be a non-empty identifier.
    pub fn from_fn<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut FrozenContext) -> Result<(), ContextError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply_fn: Box::new(apply),
        }
    }

    /// Creates a treatment from a mapping of keys to insert.
    ///
    /// The entries are captured in iteration order and inserted with `add`
    /// one by one, so a key the target context already holds fails with a
    /// [`ContextMutationError`](crate::errors::ContextMutationError) at the
    /// point of collision.
    pub fn from_mapping<K, V, I>(name: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(String, serde_json::Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self::from_fn(name, move |ctx| {
            for (key, value) in &entries {
                ctx.add(key.clone(), value.clone())?;
            }
            Ok(())
        })
    }

    /// Returns the treatment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the treatment to the execution context.
    ///
    /// Runs the normalized mutation procedure against `ctx`. There are no
    /// retries: the context is either mutated exactly as specified, or the
    /// underlying error propagates and the context is left in whatever
    /// partial state the failing mutation produced. Callers that need
    /// atomicity must discard the partially-mutated context and rebuild.
    ///
    /// # Errors
    ///
    /// Propagates whatever the mutation procedure raises, notably
    /// `ContextMutationError` when inserting a key the context already
    /// holds.
    pub fn apply(&self, ctx: &mut FrozenContext) -> Result<(), ContextError> {
        tracing::debug!(treatment = %self.name, "applying treatment");
        (self.apply_fn)(ctx)
    }
}

impl fmt::Debug for Treatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Treatment")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

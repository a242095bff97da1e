//! # Crystallize
//!
//! Reproducible experiment configuration for pipeline-style computations.
//!
//! An experiment run establishes a base execution context once, and
//! treatments stage controlled mutations to that context before each
//! replicate executes:
//!
//! - **Write-once context**: [`FrozenContext`](context::FrozenContext)
//!   keys cannot be silently overwritten — replacement goes through an
//!   explicit, logged override surface
//! - **Treatments**: named mutation recipes, declared as a function or a
//!   mapping, applied uniformly to a fresh context per replicate
//! - **Pluggable execution**: backends consume fully-materialized contexts
//!   behind [`ExecutionBackend`](execution::ExecutionBackend)
//! - **Lazy engines**: idempotent initializers for external model-serving
//!   clients, keyed by context configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use crystallize::prelude::*;
//!
//! # fn main() -> Result<(), ContextError> {
//! let baseline = FrozenContext::from_entries([
//!     ("dataset", serde_json::json!("cifar10")),
//!     ("embed_dim", serde_json::json!(256)),
//! ])?;
//!
//! let wide = Treatment::from_fn("wide-embeddings", |ctx| {
//!     ctx.override_entry("embed_dim", 512);
//!     ctx.add("note", "doubled width")?;
//!     Ok(())
//! });
//!
//! let ctx = materialize_context(baseline, [&wide])?;
//! assert_eq!(ctx.get("embed_dim")?, &serde_json::json!(512));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod engine;
pub mod errors;
pub mod execution;
pub mod observability;
pub mod treatment;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::FrozenContext;
    pub use crate::engine::{engine_config, LazyEngine};
    pub use crate::errors::{
        ContextError, ContextLookupError, ContextMutationError, CrystallizeError,
        EngineInitError,
    };
    pub use crate::execution::{
        materialize_context, ExecutionBackend, LocalExecution, PipelineFn,
        ReplicateIdentity, ReplicateOutcome,
    };
    pub use crate::observability::init_tracing;
    pub use crate::treatment::Treatment;
}

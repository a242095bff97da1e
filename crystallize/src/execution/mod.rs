//! The runner and execution-backend boundary.
//!
//! The context/treatment core is synchronous and single-owner; everything
//! that schedules replicates lives behind the [`ExecutionBackend`] trait.
//! A backend receives a fully-materialized [`FrozenContext`] and must treat
//! it as immutable. Scheduling policy, retries, and distribution are the
//! backend's concern, not this crate's.

mod identity;
mod local;

pub use identity::ReplicateIdentity;
pub use local::LocalExecution;

use crate::context::FrozenContext;
use crate::errors::{ContextError, CrystallizeError};
use crate::treatment::Treatment;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The pipeline body run for one replicate.
///
/// Receives the materialized context read-only and returns the replicate's
/// output value.
pub type PipelineFn = dyn Fn(&FrozenContext) -> anyhow::Result<serde_json::Value> + Send + Sync;

/// Seeds a context and applies treatments in runner order.
///
/// This is the Runner → Context / Runner → Treatment contract in one
/// place: start from the seeded defaults, then apply each treatment in
/// the order given. Order matters — later treatments may override earlier
/// keys or fail on an `add` collision, and the first error wins.
///
/// # Errors
///
/// Propagates the first error a treatment raises. The returned context is
/// discarded in that case; per the no-rollback contract, a partially
/// mutated context must not be reused.
pub fn materialize_context<'a, I>(
    defaults: FrozenContext,
    treatments: I,
) -> Result<FrozenContext, ContextError>
where
    I: IntoIterator<Item = &'a Treatment>,
{
    let mut ctx = defaults;
    for treatment in treatments {
        treatment.apply(&mut ctx)?;
    }
    Ok(ctx)
}

/// The recorded result of one replicate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateOutcome {
    /// Identity of the replicate that produced this outcome.
    pub identity: ReplicateIdentity,
    /// The pipeline's output value.
    pub output: serde_json::Value,
    /// When the pipeline started.
    pub started_at: DateTime<Utc>,
    /// When the pipeline completed.
    pub completed_at: DateTime<Utc>,
}

impl ReplicateOutcome {
    /// Returns the wall-clock duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.completed_at - self.started_at).num_milliseconds()
    }
}

/// A pluggable executor for replicate runs.
///
/// Implementations own scheduling (in-process, worker pool, distributed).
/// The contract they must uphold: the context handed over is fully
/// materialized and immutable from this point on, and each context belongs
/// to exactly one replicate.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Runs one replicate's pipeline against its materialized context.
    ///
    /// # Errors
    ///
    /// Returns `CrystallizeError::Execution` if the pipeline body fails.
    async fn run_replicate(
        &self,
        identity: ReplicateIdentity,
        ctx: FrozenContext,
        pipeline: Arc<PipelineFn>,
    ) -> Result<ReplicateOutcome, CrystallizeError>;
}

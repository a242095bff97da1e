//! In-process reference execution backend.

use super::{ExecutionBackend, PipelineFn, ReplicateIdentity, ReplicateOutcome};
use crate::context::FrozenContext;
use crate::errors::CrystallizeError;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Runs each replicate inline on the calling task.
///
/// The simplest backend: no scheduling, no parallelism. Useful as the
/// default for local experiment runs and as the reference for what a
/// backend owes the core — run the pipeline against the handed-over
/// context, read-only, and report an outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecution;

impl LocalExecution {
    /// Creates a new local execution backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExecutionBackend for LocalExecution {
    async fn run_replicate(
        &self,
        identity: ReplicateIdentity,
        ctx: FrozenContext,
        pipeline: Arc<PipelineFn>,
    ) -> Result<ReplicateOutcome, CrystallizeError> {
        let span = tracing::info_span!(
            "replicate",
            replicate_id = identity.replicate_id_str().unwrap_or_default(),
            treatment = identity.treatment.as_deref().unwrap_or("none"),
        );
        let _guard = span.enter();

        let started_at = Utc::now();
        tracing::debug!(context_keys = ctx.len(), "running replicate pipeline");

        let output = pipeline(&ctx).map_err(|e| {
            tracing::warn!(error = %e, "replicate pipeline failed");
            CrystallizeError::Execution(e.to_string())
        })?;

        let completed_at = Utc::now();
        Ok(ReplicateOutcome {
            identity,
            output,
            started_at,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_local_execution_returns_pipeline_output() {
        let backend = LocalExecution::new();
        let mut ctx = FrozenContext::new();
        ctx.add("factor", 3).unwrap();

        let pipeline: Arc<PipelineFn> = Arc::new(|ctx| {
            let factor: i64 = ctx.get_as("factor")?;
            Ok(serde_json::json!(factor * 2))
        });

        let identity = ReplicateIdentity::new().with_treatment("doubler");
        let expected_id = identity.replicate_id;
        let outcome = backend.run_replicate(identity, ctx, pipeline).await.unwrap();

        assert_eq!(outcome.output, serde_json::json!(6));
        assert_eq!(outcome.identity.replicate_id, expected_id);
        assert!(outcome.completed_at >= outcome.started_at);
    }

    #[tokio::test]
    async fn test_local_execution_surfaces_pipeline_error() {
        let backend = LocalExecution::new();
        let pipeline: Arc<PipelineFn> =
            Arc::new(|_| Err(anyhow::anyhow!("model server unreachable")));

        let result = backend
            .run_replicate(ReplicateIdentity::new(), FrozenContext::new(), pipeline)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CrystallizeError::Execution(_)));
        assert!(err.to_string().contains("model server unreachable"));
    }

    #[tokio::test]
    async fn test_independent_replicates_own_their_contexts() {
        let backend = LocalExecution::new();
        let pipeline: Arc<PipelineFn> = Arc::new(|ctx| Ok(ctx.get("tag")?.clone()));

        for tag in ["control", "treated"] {
            let mut ctx = FrozenContext::new();
            ctx.add("tag", tag).unwrap();

            let outcome = backend
                .run_replicate(ReplicateIdentity::new(), ctx, pipeline.clone())
                .await
                .unwrap();
            assert_eq!(outcome.output, serde_json::json!(tag));
        }
    }
}

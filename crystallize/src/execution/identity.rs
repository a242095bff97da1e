//! Replicate identity for tracking experiment runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifies one replicate run with its correlation IDs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReplicateIdentity {
    /// The unique ID for this replicate run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicate_id: Option<Uuid>,

    /// The experiment this replicate belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_id: Option<Uuid>,

    /// Display label of the treatment applied to this replicate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
}

impl ReplicateIdentity {
    /// Creates a new identity with a generated replicate ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            replicate_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    /// Sets the experiment ID.
    #[must_use]
    pub fn with_experiment_id(mut self, experiment_id: Uuid) -> Self {
        self.experiment_id = Some(experiment_id);
        self
    }

    /// Sets the treatment label.
    #[must_use]
    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = Some(treatment.into());
        self
    }

    /// Returns the replicate ID as a string, or None.
    #[must_use]
    pub fn replicate_id_str(&self) -> Option<String> {
        self.replicate_id.map(|id| id.to_string())
    }

    /// Converts to a dictionary with string values (or null).
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert(
            "replicate_id".to_string(),
            self.replicate_id
                .map_or(serde_json::Value::Null, |id| serde_json::json!(id.to_string())),
        );
        map.insert(
            "experiment_id".to_string(),
            self.experiment_id
                .map_or(serde_json::Value::Null, |id| serde_json::json!(id.to_string())),
        );
        map.insert(
            "treatment".to_string(),
            self.treatment
                .as_ref()
                .map_or(serde_json::Value::Null, |t| serde_json::json!(t)),
        );
        map
    }
}

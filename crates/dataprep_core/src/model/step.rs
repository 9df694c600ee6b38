//! Preparation step actions sent to the backend.

use crate::model::column::{Column, SemanticDomain};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Step scope value for single-column actions.
pub const SCOPE_COLUMN: &str = "column";

/// One step appended to a preparation: an action name plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAction {
    pub action: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl StepAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: Map::new(),
        }
    }

    /// Action scoped to one column (`scope`, `column_id`, `column_name`).
    pub fn on_column(action: impl Into<String>, column: &Column) -> Self {
        Self::new(action)
            .with_parameter("scope", SCOPE_COLUMN)
            .with_parameter("column_id", column.id.as_str())
            .with_parameter("column_name", column.name.as_str())
    }

    pub fn type_change(column: &Column, new_type: &str) -> Self {
        Self::on_column("type_change", column).with_parameter("new_type", new_type)
    }

    pub fn domain_change(column: &Column, domain: &SemanticDomain) -> Self {
        Self::on_column("domain_change", column)
            .with_parameter("new_domain_id", domain.id.as_str())
            .with_parameter("new_domain_label", domain.label.as_str())
            .with_parameter("new_domain_frequency", domain.frequency)
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn parameter_str(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(Value::as_str)
    }
}

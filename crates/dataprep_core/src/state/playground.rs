//! Playground state record: the dataset or preparation being edited.

use crate::model::column::{Column, SemanticDomain, TypeDescriptor};
use crate::model::inventory::ItemKey;
use crate::model::step::StepAction;

/// Type menu data for the column it was loaded for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnTypesState {
    pub column_id: Option<String>,
    pub semantic_domains: Vec<SemanticDomain>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaygroundState {
    dataset_id: Option<String>,
    preparation_id: Option<String>,
    columns: Vec<Column>,
    column_types: ColumnTypesState,
    primitive_types: Option<Vec<TypeDescriptor>>,
    recipe: Vec<StepAction>,
}

impl PlaygroundState {
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    pub fn preparation_id(&self) -> Option<&str> {
        self.preparation_id.as_deref()
    }

    /// Inventory item that column metadata and steps are addressed to:
    /// the preparation when one is open, else the dataset.
    pub fn target(&self) -> Option<ItemKey> {
        self.preparation_id
            .as_deref()
            .map(ItemKey::preparation)
            .or_else(|| self.dataset_id.as_deref().map(ItemKey::dataset))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn column_types(&self) -> &ColumnTypesState {
        &self.column_types
    }

    /// Cached primitive types; `None` until fetched once.
    pub fn primitive_types(&self) -> Option<&[TypeDescriptor]> {
        self.primitive_types.as_deref()
    }

    pub fn recipe(&self) -> &[StepAction] {
        &self.recipe
    }

    /// Opens a dataset, optionally through one of its preparations.
    pub fn open(
        &mut self,
        dataset_id: impl Into<String>,
        preparation_id: Option<String>,
        columns: Vec<Column>,
    ) {
        self.dataset_id = Some(dataset_id.into());
        self.preparation_id = preparation_id;
        self.columns = columns;
        self.column_types = ColumnTypesState::default();
        self.recipe.clear();
    }

    pub fn set_preparation_id(&mut self, preparation_id: Option<String>) {
        self.preparation_id = preparation_id;
    }

    pub fn set_semantic_domains(&mut self, column_id: &str, domains: Vec<SemanticDomain>) {
        self.column_types = ColumnTypesState {
            column_id: Some(column_id.to_string()),
            semantic_domains: domains,
        };
    }

    pub fn set_primitive_types(&mut self, types: Vec<TypeDescriptor>) {
        self.primitive_types = Some(types);
    }

    pub fn append_steps(&mut self, steps: Vec<StepAction>) {
        self.recipe.extend(steps);
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == column_id)
    }
}

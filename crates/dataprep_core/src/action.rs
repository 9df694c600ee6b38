//! UI actions as closed sum types.
//!
//! # Responsibility
//! - Decode `{ "type": "@@<domain>/<NAME>", "payload": {...} }` messages
//!   into typed actions.
//!
//! # Invariants
//! - Every accepted `type` string maps to exactly one variant.
//! - An unknown `type` is reported as `ActionParseError::UnknownType`; a
//!   known `type` with a bad payload is `InvalidPayload`.

use crate::model::column::SemanticDomain;
use crate::model::inventory::{DisplayMode, ItemKind, SortField};
use crate::model::step::StepAction;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DatasetAction {
    #[serde(rename = "@@dataset/SORT")]
    Sort {
        #[serde(rename = "sortBy")]
        sort_by: SortField,
        #[serde(rename = "sortDesc")]
        sort_desc: bool,
    },
    #[serde(rename = "@@dataset/DATASET_FETCH")]
    Fetch,
    #[serde(rename = "@@dataset/SUBMIT_EDIT")]
    SubmitEdit { id: String, value: String },
    #[serde(rename = "@@dataset/REMOVE")]
    Remove { id: String },
    #[serde(rename = "@@dataset/CLONE")]
    Clone { id: String },
    #[serde(rename = "@@dataset/FAVOURITE")]
    Favourite { id: String },
    #[serde(rename = "@@dataset/UPDATE")]
    Update { id: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum PreparationAction {
    #[serde(rename = "@@preparation/CREATE")]
    Create,
    #[serde(rename = "@@preparation/SORT")]
    Sort {
        field: SortField,
        #[serde(rename = "isDescending")]
        is_descending: bool,
    },
    #[serde(rename = "@@preparation/FOLDER_FETCH")]
    FolderFetch {
        #[serde(default, rename = "folderId")]
        folder_id: Option<String>,
    },
    #[serde(rename = "@@preparation/COPY_MOVE")]
    CopyMove { id: String },
    /// Renames a preparation or a folder of the current listing.
    #[serde(rename = "@@preparation/SUBMIT_EDIT")]
    SubmitEdit {
        #[serde(default = "preparation_kind")]
        kind: ItemKind,
        id: String,
        value: String,
    },
    #[serde(rename = "@@preparation/REMOVE")]
    Remove { id: String },
    #[serde(rename = "@@preparation/REMOVE_FOLDER")]
    RemoveFolder { id: String },
}

fn preparation_kind() -> ItemKind {
    ItemKind::Preparation
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum InventoryAction {
    #[serde(rename = "@@inventory/DISPLAY_MODE")]
    DisplayMode {
        #[serde(rename = "type")]
        kind: ItemKind,
        mode: DisplayMode,
    },
    #[serde(rename = "@@inventory/EDIT")]
    Edit { kind: ItemKind, id: String },
    #[serde(rename = "@@inventory/CANCEL_EDIT")]
    CancelEdit { kind: ItemKind, id: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum PlaygroundAction {
    #[serde(rename = "@@playground/LOAD_COLUMN_TYPES")]
    LoadColumnTypes {
        #[serde(rename = "columnId")]
        column_id: String,
    },
    #[serde(rename = "@@playground/CHANGE_TYPE")]
    ChangeType {
        #[serde(rename = "columnId")]
        column_id: String,
        #[serde(rename = "type")]
        type_id: String,
    },
    #[serde(rename = "@@playground/CHANGE_DOMAIN")]
    ChangeDomain {
        #[serde(rename = "columnId")]
        column_id: String,
        domain: SemanticDomain,
    },
    #[serde(rename = "@@playground/APPEND_STEP")]
    AppendStep { actions: Vec<StepAction> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ImportAction {
    #[serde(rename = "@@import/FETCH_TYPES")]
    FetchTypes,
    #[serde(rename = "@@import/OPEN")]
    Open {
        /// `locationType` of the connector; the default connector when absent.
        #[serde(default, rename = "importType")]
        import_type: Option<String>,
    },
    #[serde(rename = "@@import/CLOSE")]
    Close,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SearchAction {
    #[serde(rename = "@@search/DOCUMENTATION")]
    Documentation { keyword: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dataset(DatasetAction),
    Preparation(PreparationAction),
    Inventory(InventoryAction),
    Playground(PlaygroundAction),
    Import(ImportAction),
    Search(SearchAction),
}

const DATASET_TYPES: &[&str] = &[
    "@@dataset/SORT",
    "@@dataset/DATASET_FETCH",
    "@@dataset/SUBMIT_EDIT",
    "@@dataset/REMOVE",
    "@@dataset/CLONE",
    "@@dataset/FAVOURITE",
    "@@dataset/UPDATE",
];
const PREPARATION_TYPES: &[&str] = &[
    "@@preparation/CREATE",
    "@@preparation/SORT",
    "@@preparation/FOLDER_FETCH",
    "@@preparation/COPY_MOVE",
    "@@preparation/SUBMIT_EDIT",
    "@@preparation/REMOVE",
    "@@preparation/REMOVE_FOLDER",
];
const INVENTORY_TYPES: &[&str] = &[
    "@@inventory/DISPLAY_MODE",
    "@@inventory/EDIT",
    "@@inventory/CANCEL_EDIT",
];
const PLAYGROUND_TYPES: &[&str] = &[
    "@@playground/LOAD_COLUMN_TYPES",
    "@@playground/CHANGE_TYPE",
    "@@playground/CHANGE_DOMAIN",
    "@@playground/APPEND_STEP",
];
const IMPORT_TYPES: &[&str] = &["@@import/FETCH_TYPES", "@@import/OPEN", "@@import/CLOSE"];
const SEARCH_TYPES: &[&str] = &["@@search/DOCUMENTATION"];

impl Action {
    pub fn from_json(raw: &str) -> Result<Self, ActionParseError> {
        let value: Value = serde_json::from_str(raw).map_err(ActionParseError::Malformed)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ActionParseError> {
        let action_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ActionParseError::MissingType)?
            .to_string();
        let invalid = |source| ActionParseError::InvalidPayload {
            action_type: action_type.clone(),
            source,
        };

        let known = |types: &[&str]| types.contains(&action_type.as_str());
        if known(DATASET_TYPES) {
            serde_json::from_value(value).map(Self::Dataset).map_err(invalid)
        } else if known(PREPARATION_TYPES) {
            serde_json::from_value(value).map(Self::Preparation).map_err(invalid)
        } else if known(INVENTORY_TYPES) {
            serde_json::from_value(value).map(Self::Inventory).map_err(invalid)
        } else if known(PLAYGROUND_TYPES) {
            serde_json::from_value(value).map(Self::Playground).map_err(invalid)
        } else if known(IMPORT_TYPES) {
            serde_json::from_value(value).map(Self::Import).map_err(invalid)
        } else if known(SEARCH_TYPES) {
            serde_json::from_value(value).map(Self::Search).map_err(invalid)
        } else {
            Err(ActionParseError::UnknownType(action_type))
        }
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dataset(action) => match action {
                DatasetAction::Sort { .. } => "dataset_sort",
                DatasetAction::Fetch => "dataset_fetch",
                DatasetAction::SubmitEdit { .. } => "dataset_submit_edit",
                DatasetAction::Remove { .. } => "dataset_remove",
                DatasetAction::Clone { .. } => "dataset_clone",
                DatasetAction::Favourite { .. } => "dataset_favourite",
                DatasetAction::Update { .. } => "dataset_update",
            },
            Self::Preparation(action) => match action {
                PreparationAction::Create => "preparation_create",
                PreparationAction::Sort { .. } => "preparation_sort",
                PreparationAction::FolderFetch { .. } => "preparation_folder_fetch",
                PreparationAction::CopyMove { .. } => "preparation_copy_move",
                PreparationAction::SubmitEdit { .. } => "preparation_submit_edit",
                PreparationAction::Remove { .. } => "preparation_remove",
                PreparationAction::RemoveFolder { .. } => "preparation_remove_folder",
            },
            Self::Inventory(action) => match action {
                InventoryAction::DisplayMode { .. } => "inventory_display_mode",
                InventoryAction::Edit { .. } => "inventory_edit",
                InventoryAction::CancelEdit { .. } => "inventory_cancel_edit",
            },
            Self::Playground(action) => match action {
                PlaygroundAction::LoadColumnTypes { .. } => "playground_load_column_types",
                PlaygroundAction::ChangeType { .. } => "playground_change_type",
                PlaygroundAction::ChangeDomain { .. } => "playground_change_domain",
                PlaygroundAction::AppendStep { .. } => "playground_append_step",
            },
            Self::Import(action) => match action {
                ImportAction::FetchTypes => "import_fetch_types",
                ImportAction::Open { .. } => "import_open",
                ImportAction::Close => "import_close",
            },
            Self::Search(SearchAction::Documentation { .. }) => "search_documentation",
        }
    }
}

#[derive(Debug)]
pub enum ActionParseError {
    Malformed(serde_json::Error),
    MissingType,
    UnknownType(String),
    InvalidPayload {
        action_type: String,
        source: serde_json::Error,
    },
}

impl Display for ActionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "action is not valid JSON: {err}"),
            Self::MissingType => write!(f, "action has no string `type`"),
            Self::UnknownType(action_type) => write!(f, "unknown action type `{action_type}`"),
            Self::InvalidPayload {
                action_type,
                source,
            } => write!(f, "invalid payload for `{action_type}`: {source}"),
        }
    }
}

impl Error for ActionParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidPayload { source, .. } => Some(source),
            Self::MissingType | Self::UnknownType(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ActionParseError, DatasetAction, PreparationAction};
    use crate::model::inventory::{ItemKind, SortField};

    #[test]
    fn parses_dataset_sort() {
        let action = Action::from_json(
            r#"{"type":"@@dataset/SORT","payload":{"sortBy":"date","sortDesc":true}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::Dataset(DatasetAction::Sort {
                sort_by: SortField::Date,
                sort_desc: true
            })
        );
    }

    #[test]
    fn unit_actions_need_no_payload() {
        let action = Action::from_json(r#"{"type":"@@dataset/DATASET_FETCH"}"#).unwrap();
        assert_eq!(action, Action::Dataset(DatasetAction::Fetch));
    }

    #[test]
    fn preparation_rename_defaults_to_preparation_kind() {
        let action = Action::from_json(
            r#"{"type":"@@preparation/SUBMIT_EDIT","payload":{"id":"p-1","value":"x"}}"#,
        )
        .unwrap();
        assert!(matches!(
            action,
            Action::Preparation(PreparationAction::SubmitEdit {
                kind: ItemKind::Preparation,
                ..
            })
        ));
    }

    #[test]
    fn unknown_type_is_reported() {
        let err = Action::from_json(r#"{"type":"@@dataset/EXPLODE","payload":{}}"#).unwrap_err();
        assert!(matches!(err, ActionParseError::UnknownType(ref t) if t == "@@dataset/EXPLODE"));
    }

    #[test]
    fn bad_payload_is_not_unknown() {
        let err = Action::from_json(r#"{"type":"@@dataset/REMOVE","payload":{}}"#).unwrap_err();
        assert!(matches!(err, ActionParseError::InvalidPayload { .. }));
        let err = Action::from_json(r#"{"payload":{}}"#).unwrap_err();
        assert!(matches!(err, ActionParseError::MissingType));
    }
}

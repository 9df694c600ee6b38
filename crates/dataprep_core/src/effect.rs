//! Side-effect descriptions produced by dispatchers.
//!
//! # Responsibility
//! - Describe every outward interaction (backend call, confirmation dialog,
//!   preference write, notification banner, native UI trigger) as a value.
//! - Describe how each interaction completed, so pending flows can resume.
//!
//! # Invariants
//! - Dispatchers never perform I/O; they return `Effect`s in the order they
//!   must run.
//! - A `RequestId` is issued once and resolved at most once.

use crate::model::column::{SemanticDomain, TypeDescriptor};
use crate::model::inventory::{FolderContent, InventoryItem, ItemKey, SortSelection};
use crate::model::step::StepAction;
use crate::preferences::PreferenceWrite;
use crate::state::import::ImportType;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Correlates a `Request` or `Confirm` effect with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request {
        id: RequestId,
        request: BackendRequest,
    },
    Confirm {
        id: RequestId,
        prompt: ConfirmPrompt,
    },
    /// Preference write; its outcome resumes the flow parked under `id`.
    SavePreference {
        id: RequestId,
        write: PreferenceWrite,
    },
    Notify(Notification),
    TriggerExternalUi(ExternalUiTrigger),
}

/// REST resource calls issued by dispatchers.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    ListDatasets { sort: SortSelection },
    RenameDataset { id: String, name: String },
    DeleteDataset { id: String },
    CloneDataset { id: String },
    SetFavourite { id: String, favorite: bool },
    ListFolder { folder_id: String, sort: SortSelection },
    RenameFolder { id: String, name: String },
    RenamePreparation { id: String, name: String },
    DeletePreparation { id: String },
    RemoveFolder { id: String },
    AppendStep {
        target: ItemKey,
        actions: Vec<StepAction>,
    },
    FetchColumnDomains { target: ItemKey, column_id: String },
    FetchTypes,
    SearchDocumentation { keyword: String },
    ListImportTypes,
}

impl BackendRequest {
    /// Stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListDatasets { .. } => "list_datasets",
            Self::RenameDataset { .. } => "rename_dataset",
            Self::DeleteDataset { .. } => "delete_dataset",
            Self::CloneDataset { .. } => "clone_dataset",
            Self::SetFavourite { .. } => "set_favourite",
            Self::ListFolder { .. } => "list_folder",
            Self::RenameFolder { .. } => "rename_folder",
            Self::RenamePreparation { .. } => "rename_preparation",
            Self::DeletePreparation { .. } => "delete_preparation",
            Self::RemoveFolder { .. } => "remove_folder",
            Self::AppendStep { .. } => "append_step",
            Self::FetchColumnDomains { .. } => "fetch_column_domains",
            Self::FetchTypes => "fetch_types",
            Self::SearchDocumentation { .. } => "search_documentation",
            Self::ListImportTypes => "list_import_types",
        }
    }
}

/// `data` payload of a successful backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    Done,
    Datasets(Vec<InventoryItem>),
    Folder(FolderContent),
    Domains(Vec<SemanticDomain>),
    Types(Vec<TypeDescriptor>),
    /// Raw help-center CSV body.
    Documentation(String),
    ImportTypes(Vec<ImportType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// HTTP-style rejection.
    Rejected { status: u16, message: String },
    Unavailable(String),
    /// The payload does not fit the request it answers.
    UnexpectedResponse { request: &'static str },
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected { status, message } => {
                write!(f, "backend rejected request with status {status}: {message}")
            }
            Self::Unavailable(message) => write!(f, "backend unavailable: {message}"),
            Self::UnexpectedResponse { request } => {
                write!(f, "unexpected response payload for `{request}`")
            }
        }
    }
}

impl Error for BackendError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Backend(Result<BackendResponse, BackendError>),
    /// `true` when the user confirmed.
    Confirmation(bool),
    /// Outcome of a preference write, with the store error rendered.
    Saved(Result<(), String>),
}

impl Completion {
    pub fn ok(response: BackendResponse) -> Self {
        Self::Backend(Ok(response))
    }

    pub fn failed(error: BackendError) -> Self {
        Self::Backend(Err(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// Transient banner, parameterized by message keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub title_key: String,
    pub message_key: String,
    pub params: Map<String, Value>,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        title_key: impl Into<String>,
        message_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            title_key: title_key.into(),
            message_key: message_key.into(),
            params: Map::new(),
        }
    }

    pub fn success(title_key: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title_key, message_key)
    }

    pub fn warning(title_key: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title_key, message_key)
    }

    pub fn error(title_key: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title_key, message_key)
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Blocking confirmation dialog content.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt {
    /// Enter must not confirm destructive prompts.
    pub disable_enter: bool,
    pub text_keys: Vec<String>,
    pub params: Map<String, Value>,
}

impl ConfirmPrompt {
    /// Permanent deletion prompt for one inventory item.
    pub fn delete(kind: &str, name: &str) -> Self {
        let mut params = Map::new();
        params.insert("type".to_string(), Value::from(kind));
        params.insert("name".to_string(), Value::from(name));
        Self {
            disable_enter: true,
            text_keys: vec![
                "DELETE_PERMANENTLY".to_string(),
                "NO_UNDONE_CONFIRM".to_string(),
            ],
            params,
        }
    }
}

/// Native UI that sits outside the action system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalUiTrigger {
    DatasetFilePicker,
}

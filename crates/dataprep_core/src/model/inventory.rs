//! Inventory view models: datasets, preparations and folders.
//!
//! # Responsibility
//! - Define list/grid items and the sort/display preferences applied to them.
//!
//! # Invariants
//! - `ItemKey` (kind + backend id) is the identity of an item. Two items with
//!   equal fields but different keys are different items.
//! - `edit_mode` is UI-only and never serialized.

use serde::{Deserialize, Serialize};

/// Inventory item family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Dataset,
    Preparation,
    Folder,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::Preparation => "preparation",
            Self::Folder => "folder",
        }
    }
}

/// Stable identity of one inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub id: String,
}

impl ItemKey {
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn dataset(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Dataset, id)
    }

    pub fn preparation(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Preparation, id)
    }

    pub fn folder(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Folder, id)
    }
}

/// Dataset, preparation or folder row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    /// Epoch ms.
    #[serde(default)]
    pub created: i64,
    /// Epoch ms.
    #[serde(default)]
    pub updated: i64,
    #[serde(default, rename = "folderId")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    /// Import connector, e.g. `local` or `tcomp-JDBCDatastore`.
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(skip)]
    pub edit_mode: bool,
}

impl InventoryItem {
    pub fn new(kind: ItemKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            owner: None,
            created: 0,
            updated: 0,
            folder_id: None,
            favorite: false,
            origin: None,
            edit_mode: false,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.kind, self.id.clone())
    }

    /// Whether this dataset comes from a component-based connector and is
    /// edited through a form rather than a file upload.
    pub fn is_component_backed(&self) -> bool {
        self.origin
            .as_deref()
            .is_some_and(|origin| origin.contains("tcomp"))
    }
}

/// Folder metadata of the preparation inventory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FolderMetadata {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

impl FolderMetadata {
    pub fn root() -> Self {
        Self {
            id: String::new(),
            name: "HOME".to_string(),
            path: "/".to_string(),
        }
    }
}

/// One folder listing: sub-folders and preparations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FolderContent {
    pub metadata: FolderMetadata,
    #[serde(default)]
    pub folders: Vec<InventoryItem>,
    #[serde(default)]
    pub preparations: Vec<InventoryItem>,
}

/// Sort key offered by inventory headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Date,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
        }
    }

    /// Item property the backend sorts on.
    pub fn property(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "created",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Name => "NAME_SORT",
            Self::Date => "DATE_SORT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Asc => "ASC_ORDER",
            Self::Desc => "DESC_ORDER",
        }
    }
}

/// Sort field and order applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSelection {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSelection {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

impl Default for SortSelection {
    fn default() -> Self {
        Self::new(SortField::Name, SortOrder::Desc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Table,
    Large,
}

/// Whether `name` is taken by an item other than `except`.
pub fn name_in_use<'a>(
    items: impl IntoIterator<Item = &'a InventoryItem>,
    name: &str,
    except: &ItemKey,
) -> bool {
    items
        .into_iter()
        .any(|item| item.name == name && item.key() != *except)
}

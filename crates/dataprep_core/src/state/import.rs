//! Import state record: available connectors and the import dialog.

use serde::{Deserialize, Serialize};

/// One import connector offered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportType {
    #[serde(rename = "locationType")]
    pub location_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "defaultImport")]
    pub default_import: bool,
    #[serde(default)]
    pub dynamic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportState {
    visible: bool,
    import_types: Vec<ImportType>,
    import_item: Option<ImportType>,
}

impl ImportState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn import_types(&self) -> &[ImportType] {
        &self.import_types
    }

    pub fn import_item(&self) -> Option<&ImportType> {
        self.import_item.as_ref()
    }

    /// Connector flagged as default, else the first one.
    pub fn default_import_type(&self) -> Option<&ImportType> {
        self.import_types
            .iter()
            .find(|import_type| import_type.default_import)
            .or_else(|| self.import_types.first())
    }

    pub fn set_import_types(&mut self, import_types: Vec<ImportType>) {
        self.import_types = import_types;
    }

    pub fn set_visible(&mut self, import_item: ImportType) {
        self.import_item = Some(import_item);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

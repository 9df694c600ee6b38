//! Inventory state record.
//!
//! # Invariants
//! - Fields change only through the named setters below.
//! - Replacing a list drops every item's edit-mode flag.

use crate::model::inventory::{
    DisplayMode, FolderContent, FolderMetadata, InventoryItem, ItemKey, ItemKind, SortSelection,
};

/// Target of the copy/move dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyMoveTarget {
    pub folder: FolderMetadata,
    pub item: ItemKey,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryState {
    datasets: Vec<InventoryItem>,
    folder: FolderContent,
    datasets_sort: SortSelection,
    preparations_sort: SortSelection,
    datasets_display_mode: DisplayMode,
    preparations_display_mode: DisplayMode,
    fetching_datasets: bool,
    fetching_preparations: bool,
    dataset_to_update: Option<String>,
    dataset_to_edit: Option<String>,
    copy_move: Option<CopyMoveTarget>,
    preparation_creator_visible: bool,
}

impl InventoryState {
    pub fn datasets(&self) -> &[InventoryItem] {
        &self.datasets
    }

    pub fn folder(&self) -> &FolderContent {
        &self.folder
    }

    pub fn datasets_sort(&self) -> SortSelection {
        self.datasets_sort
    }

    pub fn preparations_sort(&self) -> SortSelection {
        self.preparations_sort
    }

    pub fn display_mode(&self, kind: ItemKind) -> DisplayMode {
        match kind {
            ItemKind::Dataset => self.datasets_display_mode,
            ItemKind::Preparation | ItemKind::Folder => self.preparations_display_mode,
        }
    }

    pub fn is_fetching_datasets(&self) -> bool {
        self.fetching_datasets
    }

    pub fn is_fetching_preparations(&self) -> bool {
        self.fetching_preparations
    }

    pub fn dataset_to_update(&self) -> Option<&str> {
        self.dataset_to_update.as_deref()
    }

    pub fn dataset_to_edit(&self) -> Option<&str> {
        self.dataset_to_edit.as_deref()
    }

    pub fn copy_move(&self) -> Option<&CopyMoveTarget> {
        self.copy_move.as_ref()
    }

    pub fn is_preparation_creator_visible(&self) -> bool {
        self.preparation_creator_visible
    }

    pub fn find(&self, key: &ItemKey) -> Option<&InventoryItem> {
        self.list(key.kind).iter().find(|item| item.id == key.id)
    }

    /// Items whose names must differ from `key`'s item: same kind, same list.
    pub fn siblings(&self, key: &ItemKey) -> impl Iterator<Item = &InventoryItem> + '_ {
        let key = key.clone();
        self.list(key.kind)
            .iter()
            .filter(move |item| item.id != key.id)
    }

    pub fn set_datasets(&mut self, datasets: Vec<InventoryItem>) {
        self.datasets = datasets;
    }

    pub fn set_folder(&mut self, folder: FolderContent) {
        self.folder = folder;
    }

    pub fn set_datasets_sort(&mut self, sort: SortSelection) {
        self.datasets_sort = sort;
    }

    pub fn set_preparations_sort(&mut self, sort: SortSelection) {
        self.preparations_sort = sort;
    }

    pub fn set_display_mode(&mut self, kind: ItemKind, mode: DisplayMode) {
        match kind {
            ItemKind::Dataset => self.datasets_display_mode = mode,
            ItemKind::Preparation | ItemKind::Folder => self.preparations_display_mode = mode,
        }
    }

    pub fn set_fetching_datasets(&mut self, fetching: bool) {
        self.fetching_datasets = fetching;
    }

    pub fn set_fetching_preparations(&mut self, fetching: bool) {
        self.fetching_preparations = fetching;
    }

    /// Returns `false` when the item is not listed.
    pub fn enable_edit(&mut self, key: &ItemKey) -> bool {
        self.set_edit_mode(key, true)
    }

    pub fn disable_edit(&mut self, key: &ItemKey) -> bool {
        self.set_edit_mode(key, false)
    }

    /// Renames a listed item and returns its previous name.
    pub fn rename(&mut self, key: &ItemKey, name: &str) -> Option<String> {
        let item = self.find_mut(key)?;
        Some(std::mem::replace(&mut item.name, name.to_string()))
    }

    /// Sets the favourite flag and returns the previous one.
    pub fn set_favorite(&mut self, key: &ItemKey, favorite: bool) -> Option<bool> {
        let item = self.find_mut(key)?;
        Some(std::mem::replace(&mut item.favorite, favorite))
    }

    pub fn remove(&mut self, key: &ItemKey) -> Option<InventoryItem> {
        let list = self.list_mut(key.kind);
        let index = list.iter().position(|item| item.id == key.id)?;
        Some(list.remove(index))
    }

    pub fn set_dataset_to_update(&mut self, dataset_id: Option<String>) {
        self.dataset_to_update = dataset_id;
    }

    pub fn set_dataset_to_edit(&mut self, dataset_id: Option<String>) {
        self.dataset_to_edit = dataset_id;
    }

    /// Opens the copy/move dialog for `item`, or closes it when already open.
    pub fn toggle_copy_move(&mut self, folder: FolderMetadata, item: ItemKey) {
        self.copy_move = match self.copy_move.take() {
            Some(_) => None,
            None => Some(CopyMoveTarget { folder, item }),
        };
    }

    pub fn toggle_preparation_creator(&mut self) {
        self.preparation_creator_visible = !self.preparation_creator_visible;
    }

    fn set_edit_mode(&mut self, key: &ItemKey, enabled: bool) -> bool {
        match self.find_mut(key) {
            Some(item) => {
                item.edit_mode = enabled;
                true
            }
            None => false,
        }
    }

    fn find_mut(&mut self, key: &ItemKey) -> Option<&mut InventoryItem> {
        self.list_mut(key.kind)
            .iter_mut()
            .find(|item| item.id == key.id)
    }

    fn list(&self, kind: ItemKind) -> &[InventoryItem] {
        match kind {
            ItemKind::Dataset => &self.datasets,
            ItemKind::Preparation => &self.folder.preparations,
            ItemKind::Folder => &self.folder.folders,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<InventoryItem> {
        match kind {
            ItemKind::Dataset => &mut self.datasets,
            ItemKind::Preparation => &mut self.folder.preparations,
            ItemKind::Folder => &mut self.folder.folders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InventoryState;
    use crate::model::inventory::{FolderContent, FolderMetadata, InventoryItem, ItemKey, ItemKind};

    fn state_with_folder() -> InventoryState {
        let mut state = InventoryState::default();
        state.set_folder(FolderContent {
            metadata: FolderMetadata::root(),
            folders: vec![InventoryItem::new(ItemKind::Folder, "f-1", "archive")],
            preparations: vec![
                InventoryItem::new(ItemKind::Preparation, "p-1", "cleanup"),
                InventoryItem::new(ItemKind::Preparation, "p-2", "enrich"),
            ],
        });
        state
    }

    #[test]
    fn siblings_are_same_kind_items_of_the_same_list() {
        let state = state_with_folder();
        let names: Vec<&str> = state
            .siblings(&ItemKey::preparation("p-1"))
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["enrich"]);
    }

    #[test]
    fn rename_returns_previous_name() {
        let mut state = state_with_folder();
        let previous = state.rename(&ItemKey::folder("f-1"), "old stuff");
        assert_eq!(previous.as_deref(), Some("archive"));
        assert_eq!(state.find(&ItemKey::folder("f-1")).unwrap().name, "old stuff");
        assert!(state.rename(&ItemKey::folder("missing"), "x").is_none());
    }

    #[test]
    fn copy_move_toggles() {
        let mut state = state_with_folder();
        state.toggle_copy_move(FolderMetadata::root(), ItemKey::preparation("p-1"));
        assert!(state.copy_move().is_some());
        state.toggle_copy_move(FolderMetadata::root(), ItemKey::preparation("p-1"));
        assert!(state.copy_move().is_none());
    }
}

//! Search state record.

use crate::search::documentation::DocumentationEntry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    searching: bool,
    keyword: Option<String>,
    documentation: Vec<DocumentationEntry>,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn documentation(&self) -> &[DocumentationEntry] {
        &self.documentation
    }

    pub fn start(&mut self, keyword: &str) {
        self.keyword = Some(keyword.to_string());
        self.searching = true;
    }

    pub fn set_documentation(&mut self, entries: Vec<DocumentationEntry>) {
        self.documentation = entries;
        self.searching = false;
    }

    /// Forgets the keyword and its results; a late response for the old
    /// keyword no longer matches.
    pub fn clear(&mut self) {
        self.keyword = None;
        self.documentation.clear();
        self.searching = false;
    }

    pub fn stop(&mut self) {
        self.searching = false;
    }
}

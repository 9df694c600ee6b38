//! Message catalog lookup.
//!
//! Notifications carry message keys; the host turns them into text through
//! a catalog. Unknown keys resolve to the key itself.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: BTreeMap<String, String>,
}

impl MessageCatalog {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Resolves `key` and substitutes `{{name}}` placeholders from `params`.
    /// Placeholders without a param are left as written.
    pub fn translate(&self, key: &str, params: &Map<String, Value>) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

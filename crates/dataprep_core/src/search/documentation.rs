//! Help-center documentation search results.
//!
//! # Responsibility
//! - Parse the help-center CSV answer into documentation entries.
//! - Highlight the searched keyword in entry names and descriptions.
//!
//! # Invariants
//! - Only lines with exactly `url`, `name`, `description` parts survive.
//! - Non-ASCII characters are replaced by spaces before parsing.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

static NON_ASCII_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]").expect("valid non-ascii regex"));
static QUOTED_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(.*)"$"#).expect("valid quoted line regex"));

const FIELD_SEPARATOR: &str = "\",\"";
const FIELD_COUNT: usize = 3;
const HIGHLIGHT_CLASS: &str = "highlighted";

/// One documentation hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationEntry {
    pub url: String,
    pub name: String,
    pub description: String,
    pub tooltip_name: String,
}

/// Parses the help-center CSV body.
pub fn parse_help_center_csv(body: &str) -> Vec<DocumentationEntry> {
    let ascii = NON_ASCII_RE.replace_all(body, " ");
    ascii
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let unquoted = QUOTED_LINE_RE.replace(line, "$1");
            let parts: Vec<&str> = unquoted.split(FIELD_SEPARATOR).collect();
            if parts.len() != FIELD_COUNT {
                return None;
            }
            Some(DocumentationEntry {
                url: parts[0].to_string(),
                name: parts[1].to_string(),
                description: parts[2].to_string(),
                tooltip_name: parts[1].to_string(),
            })
        })
        .collect()
}

/// Wraps case-insensitive occurrences of `keyword` in a highlight span.
pub fn highlight(text: &str, keyword: &str) -> String {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return text.to_string();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };
    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("<span class=\"{HIGHLIGHT_CLASS}\">{}</span>", &caps[0])
        })
        .into_owned()
}

/// Parses then highlights name and description; the tooltip keeps the raw
/// name.
pub fn search_results(body: &str, keyword: &str) -> Vec<DocumentationEntry> {
    parse_help_center_csv(body)
        .into_iter()
        .map(|mut entry| {
            entry.name = highlight(&entry.name, keyword);
            entry.description = highlight(&entry.description, keyword);
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{highlight, parse_help_center_csv, search_results};

    const BODY: &str = "\"https://help/a\",\"Split a column\",\"How to split values\"\n\
                        \n\
                        \"broken line\"\n  \"https://help/b\",\"Round\u{00e9}\",\"Round numbers\"  \n";

    #[test]
    fn parses_three_part_lines_only() {
        let entries = parse_help_center_csv(BODY);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://help/a");
        assert_eq!(entries[0].tooltip_name, "Split a column");
        assert_eq!(entries[1].name, "Round ");
    }

    #[test]
    fn highlight_is_case_insensitive_and_keeps_original_case() {
        assert_eq!(
            highlight("Split a column", "split"),
            "<span class=\"highlighted\">Split</span> a column"
        );
        assert_eq!(highlight("a+b", "+"), "a<span class=\"highlighted\">+</span>b");
        assert_eq!(highlight("unchanged", "  "), "unchanged");
    }

    #[test]
    fn search_results_keep_plain_tooltip() {
        let entries = search_results(BODY, "round");
        assert_eq!(entries[1].tooltip_name, "Round ");
        assert!(entries[1].name.contains("<span"));
        assert!(entries[1].description.contains("<span"));
    }
}

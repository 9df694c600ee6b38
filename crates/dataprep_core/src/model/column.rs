//! Column view model.
//!
//! # Responsibility
//! - Describe one grid column: primitive type, semantic domain, statistics.
//! - Derive the "current domain" projections used by the type menu.
//!
//! # Invariants
//! - Derived fields are never stored; they are recomputed from `kind` and
//!   `domain` on every read, so a rollback of those two fields is enough to
//!   restore every projection.
//! - An empty `domain` means "no semantic domain"; the column is then
//!   described by its primitive type.

use serde::{Deserialize, Serialize};

/// Primitive column type as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Any,
    String,
    Char,
    Numeric,
    Integer,
    Double,
    Float,
    Decimal,
    Boolean,
    Date,
}

impl PrimitiveType {
    /// Parses a backend type id, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "string" => Some(Self::String),
            "char" => Some(Self::Char),
            "numeric" => Some(Self::Numeric),
            "integer" => Some(Self::Integer),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "decimal" => Some(Self::Decimal),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Char => "char",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }

    /// Returns the display bucket for this type.
    pub fn simplify(self) -> SimplifiedType {
        match self {
            Self::Integer => SimplifiedType::Integer,
            Self::Numeric | Self::Double | Self::Float | Self::Decimal => SimplifiedType::Decimal,
            Self::Boolean => SimplifiedType::Boolean,
            Self::String | Self::Char => SimplifiedType::Text,
            Self::Date => SimplifiedType::Date,
            Self::Any => SimplifiedType::Unknown,
        }
    }
}

/// Coarse type bucket. `double` and `float` both land in `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplifiedType {
    Integer,
    Decimal,
    Boolean,
    Text,
    Date,
    Unknown,
}

impl SimplifiedType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Date => "date",
            Self::Unknown => "unknown",
        }
    }
}

/// Simplifies any type name, including names that are not primitive types
/// (semantic domain ids simplify to `Unknown`).
pub fn simplify_type_name(value: &str) -> SimplifiedType {
    PrimitiveType::parse(value).map_or(SimplifiedType::Unknown, PrimitiveType::simplify)
}

/// Semantic domain classification, e.g. `CITY` at 99.2%.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticDomain {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub frequency: f64,
}

impl SemanticDomain {
    pub fn new(id: impl Into<String>, label: impl Into<String>, frequency: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            frequency,
        }
    }

    /// The "no domain" value written when a column type is forced.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.id.is_empty()
    }
}

/// Primitive type entry offered by the type menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Backend id, usually uppercase (`STRING`, `FLOAT`).
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "labelKey")]
    pub label_key: String,
}

impl TypeDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.to_ascii_lowercase(),
            label_key: id.to_ascii_uppercase(),
            id,
        }
    }
}

/// Value-quality counters shown under a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnStatistics {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub valid: u64,
    #[serde(default)]
    pub empty: u64,
    #[serde(default)]
    pub invalid: u64,
}

/// Grid column view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    /// Serialized as `type` to match backend metadata.
    #[serde(rename = "type")]
    pub kind: PrimitiveType,
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "domainLabel")]
    pub domain_label: String,
    #[serde(default, rename = "domainFrequency")]
    pub domain_frequency: f64,
    #[serde(default)]
    pub statistics: ColumnStatistics,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PrimitiveType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            domain: String::new(),
            domain_label: String::new(),
            domain_frequency: 0.0,
            statistics: ColumnStatistics::default(),
        }
    }

    /// Builder-style helper used by fixtures and importers.
    pub fn with_domain(mut self, domain: &SemanticDomain) -> Self {
        self.apply_domain(domain);
        self
    }

    /// Domain when present, else the uppercased primitive type.
    pub fn current_domain(&self) -> String {
        if self.domain.is_empty() {
            self.kind.as_str().to_ascii_uppercase()
        } else {
            self.domain.clone()
        }
    }

    /// Domain when present, else the simplified type bucket name.
    pub fn current_simplified_domain(&self) -> String {
        if self.domain.is_empty() {
            self.kind.simplify().as_str().to_string()
        } else {
            self.domain.clone()
        }
    }

    /// Whether `type_id` should render as the selected type.
    ///
    /// Compares simplified buckets; `Unknown` never matches, so a column
    /// carrying a semantic domain has no checked primitive type.
    pub fn should_be_checked(&self, type_id: &str) -> bool {
        let candidate = simplify_type_name(type_id);
        candidate != SimplifiedType::Unknown
            && candidate == simplify_type_name(&self.current_domain())
    }

    pub fn domain_info(&self) -> SemanticDomain {
        SemanticDomain::new(
            self.domain.clone(),
            self.domain_label.clone(),
            self.domain_frequency,
        )
    }

    pub fn snapshot(&self) -> ColumnTypeSnapshot {
        ColumnTypeSnapshot {
            kind: self.kind,
            domain: self.domain_info(),
        }
    }

    /// Writes domain fields and, when given, the primitive type.
    pub fn set_domain_and_type(&mut self, domain: &SemanticDomain, kind: Option<PrimitiveType>) {
        self.apply_domain(domain);
        if let Some(kind) = kind {
            self.kind = kind;
        }
    }

    pub fn restore(&mut self, snapshot: &ColumnTypeSnapshot) {
        self.set_domain_and_type(&snapshot.domain, Some(snapshot.kind));
    }

    fn apply_domain(&mut self, domain: &SemanticDomain) {
        self.domain = domain.id.clone();
        self.domain_label = domain.label.clone();
        self.domain_frequency = domain.frequency;
    }
}

/// Captured type + domain, used as rollback value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTypeSnapshot {
    pub kind: PrimitiveType,
    pub domain: SemanticDomain,
}

/// Drops domains without id and orders by frequency, highest first.
///
/// Ties keep the reverse of their input order.
pub fn adapt_semantic_domains(domains: Vec<SemanticDomain>) -> Vec<SemanticDomain> {
    let mut adapted: Vec<SemanticDomain> = domains
        .into_iter()
        .filter(|domain| !domain.is_none())
        .collect();
    adapted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    adapted.reverse();
    adapted
}

/// Removes types that the menu never offers (`double`, `numeric`, `any`).
pub fn filter_menu_types(types: Vec<TypeDescriptor>) -> Vec<TypeDescriptor> {
    const IGNORED: &[&str] = &["double", "numeric", "any"];
    types
        .into_iter()
        .filter(|descriptor| !IGNORED.contains(&descriptor.id.to_ascii_lowercase().as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        adapt_semantic_domains, filter_menu_types, simplify_type_name, Column, PrimitiveType,
        SemanticDomain, SimplifiedType, TypeDescriptor,
    };

    fn city_column() -> Column {
        Column::new("0001", "awesome cities", PrimitiveType::String)
            .with_domain(&SemanticDomain::new("CITY", "City", 18.0))
    }

    #[test]
    fn float_and_double_share_the_decimal_bucket() {
        assert_eq!(simplify_type_name("FLOAT"), SimplifiedType::Decimal);
        assert_eq!(simplify_type_name("double"), SimplifiedType::Decimal);
        assert_eq!(simplify_type_name("CITY"), SimplifiedType::Unknown);
    }

    #[test]
    fn should_be_checked_compares_simplified_types() {
        let column = Column::new("0002", "price", PrimitiveType::Double);
        assert!(column.should_be_checked("FLOAT"));

        let text = Column::new("0003", "label", PrimitiveType::String);
        assert!(!text.should_be_checked("INTEGER"));
        assert!(text.should_be_checked("STRING"));
    }

    #[test]
    fn domain_overrides_type_in_current_domain() {
        let mut column = city_column();
        assert_eq!(column.current_domain(), "CITY");
        assert_eq!(column.current_simplified_domain(), "CITY");
        assert!(!column.should_be_checked("STRING"));

        column.set_domain_and_type(&SemanticDomain::none(), None);
        assert_eq!(column.current_domain(), "STRING");
        assert_eq!(column.current_simplified_domain(), "text");
    }

    #[test]
    fn adapt_domains_drops_empty_ids_and_sorts_by_frequency() {
        let adapted = adapt_semantic_domains(vec![
            SemanticDomain::new("", "", 15.0),
            SemanticDomain::new("AIRPORT", "Airport", 3.03),
            SemanticDomain::new("CITY", "City", 99.24),
        ]);
        let ids: Vec<&str> = adapted.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["CITY", "AIRPORT"]);
    }

    #[test]
    fn menu_types_hide_internal_types() {
        let filtered = filter_menu_types(
            ["ANY", "STRING", "NUMERIC", "INTEGER", "DOUBLE", "FLOAT"]
                .into_iter()
                .map(TypeDescriptor::new)
                .collect(),
        );
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["STRING", "INTEGER", "FLOAT"]);
    }

    #[test]
    fn column_deserializes_backend_shape() {
        let column: Column = serde_json::from_value(serde_json::json!({
            "id": "0001",
            "name": "city",
            "type": "string",
            "domain": "CITY",
            "domainLabel": "City",
            "domainFrequency": 18.0
        }))
        .unwrap();
        assert_eq!(column.kind, PrimitiveType::String);
        assert_eq!(column.domain_label, "City");
        assert_eq!(column.statistics.count, 0);
    }
}

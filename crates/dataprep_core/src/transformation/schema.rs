//! Transformation parameter schema.
//!
//! # Responsibility
//! - Decode backend transformation descriptors into a recursive schema.
//!
//! # Invariants
//! - A `select` parameter always decodes to `Parameter::Choice`, even when no
//!   option carries nested parameters.
//! - Option values are unique within one choice.
//! - Nesting depth is unbounded; decoding recurses through option parameters.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input widget family of a simple parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Column,
    Regex,
    Other(String),
}

impl ParameterKind {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Self::String,
            "integer" => Self::Integer,
            "float" | "double" | "numeric" => Self::Float,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "column" => Self::Column,
            "regex" => Self::Regex,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Scalar parameter rendered as one input.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleParameter {
    pub name: String,
    pub label: String,
    pub description: String,
    pub kind: ParameterKind,
    pub default: Option<Value>,
    /// Filled by the caller (scope, column id...), never shown.
    pub implicit: bool,
    pub can_be_blank: bool,
}

/// One option of a choice parameter and the parameters it reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub parameters: Vec<Parameter>,
}

/// Selection parameter whose current option reveals a sub-form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceParameter {
    pub name: String,
    pub label: String,
    pub description: String,
    pub default: Option<String>,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceParameter {
    pub fn option(&self, value: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Default option value, falling back to the first option.
    pub fn initial_value(&self) -> Option<&str> {
        self.default
            .as_deref()
            .filter(|value| self.option(value).is_some())
            .or_else(|| self.options.first().map(|option| option.value.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Simple(SimpleParameter),
    Choice(ChoiceParameter),
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(parameter) => &parameter.name,
            Self::Choice(parameter) => &parameter.name,
        }
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Simple(parameter) if parameter.implicit)
    }

    /// Decodes one backend parameter descriptor.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let raw = RawParameter::deserialize(value)
            .map_err(|err| SchemaError::Malformed(err.to_string()))?;
        raw.into_parameter()
    }
}

/// Transformation offered by the column menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub name: String,
    pub label: String,
    pub description: String,
    pub category: String,
    pub parameters: Vec<Parameter>,
}

impl Transformation {
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let raw = RawTransformation::deserialize(value)
            .map_err(|err| SchemaError::Malformed(err.to_string()))?;
        if raw.name.trim().is_empty() {
            return Err(SchemaError::MissingName);
        }
        let parameters = decode_parameters(raw.parameters)?;
        Ok(Self {
            label: raw.label.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            description: raw.description,
            category: raw.category,
            parameters,
        })
    }

    /// Whether the menu must open a form before appending the step.
    pub fn has_visible_parameters(&self) -> bool {
        self.parameters.iter().any(|parameter| !parameter.is_implicit())
    }
}

/// Decodes a backend list of transformation descriptors.
pub fn decode_transformations(value: &Value) -> Result<Vec<Transformation>, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::Malformed("expected an array of transformations".into()))?;
    items.iter().map(Transformation::from_json).collect()
}

/// Schema decoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Malformed(String),
    MissingName,
    ChoiceWithoutOptions(String),
    DuplicateOption { parameter: String, value: String },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed transformation schema: {message}"),
            Self::MissingName => write!(f, "transformation schema entry has no name"),
            Self::ChoiceWithoutOptions(name) => {
                write!(f, "choice parameter has no options: {name}")
            }
            Self::DuplicateOption { parameter, value } => {
                write!(f, "choice parameter `{parameter}` repeats option `{value}`")
            }
        }
    }
}

impl Error for SchemaError {}

#[derive(Debug, Deserialize)]
struct RawTransformation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    implicit: bool,
    #[serde(default, rename = "canBeBlank")]
    can_be_blank: bool,
    #[serde(default)]
    configuration: Option<RawConfiguration>,
}

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    values: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    value: Value,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

impl RawParameter {
    fn into_parameter(self) -> Result<Parameter, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingName);
        }
        let label = self.label.unwrap_or_else(|| self.name.clone());

        if !self.kind.eq_ignore_ascii_case("select") {
            return Ok(Parameter::Simple(SimpleParameter {
                kind: ParameterKind::parse(&self.kind),
                name: self.name,
                label,
                description: self.description,
                default: self.default.filter(|value| !value.is_null()),
                implicit: self.implicit,
                can_be_blank: self.can_be_blank,
            }));
        }

        let raw_options = self.configuration.map(|config| config.values).unwrap_or_default();
        if raw_options.is_empty() {
            return Err(SchemaError::ChoiceWithoutOptions(self.name));
        }

        let mut seen = BTreeSet::new();
        let mut options = Vec::with_capacity(raw_options.len());
        for raw in raw_options {
            let value = scalar_to_string(&raw.value);
            if !seen.insert(value.clone()) {
                return Err(SchemaError::DuplicateOption {
                    parameter: self.name,
                    value,
                });
            }
            options.push(ChoiceOption {
                label: raw.label.unwrap_or_else(|| value.clone()),
                parameters: decode_parameters(raw.parameters)?,
                value,
            });
        }

        Ok(Parameter::Choice(ChoiceParameter {
            default: self.default.as_ref().map(scalar_to_string),
            name: self.name,
            label,
            description: self.description,
            options,
        }))
    }
}

fn decode_parameters(raw: Vec<RawParameter>) -> Result<Vec<Parameter>, SchemaError> {
    raw.into_iter().map(RawParameter::into_parameter).collect()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

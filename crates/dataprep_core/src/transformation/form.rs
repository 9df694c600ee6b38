//! Parameter form instances built from a transformation schema.
//!
//! # Responsibility
//! - Hold the live values of one parameter-entry form.
//! - Keep one sub-form per choice field, matching the current selection.
//!
//! # Invariants
//! - A choice field owns at most one sub-form, and only when the selected
//!   option declares parameters.
//! - Changing the selection disposes the previous sub-form before the new
//!   one is created; values typed into a disposed sub-form are lost.
//! - Implicit parameters never become fields.

use crate::transformation::schema::{ChoiceParameter, Parameter, ParameterKind, SimpleParameter};
use log::debug;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rendered field descriptor, depth-first.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    /// Dotted path usable with `set_value`/`select`.
    pub path: String,
    /// 0 for top-level fields, +1 per enclosing choice.
    pub depth: usize,
    pub label: String,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Input { kind: ParameterKind, value: Value },
    Select { options: Vec<String>, selected: Option<String> },
}

#[derive(Debug)]
struct SimpleField {
    parameter: SimpleParameter,
    value: Value,
}

#[derive(Debug)]
struct ChoiceField {
    parameter: ChoiceParameter,
    selected: Option<String>,
    sub_form: Option<Box<ParameterForm>>,
}

impl ChoiceField {
    fn new(parameter: ChoiceParameter) -> Self {
        let mut field = Self {
            selected: None,
            sub_form: None,
            parameter,
        };
        if let Some(initial) = field.parameter.initial_value().map(str::to_string) {
            field.switch_to(initial);
        }
        field
    }

    fn switch_to(&mut self, value: String) {
        if self.selected.as_deref() == Some(value.as_str()) {
            return;
        }
        if self.sub_form.take().is_some() {
            debug!(
                "event=subform_dispose module=transformation status=ok parameter={}",
                self.parameter.name
            );
        }
        self.sub_form = self
            .parameter
            .option(&value)
            .filter(|option| !option.parameters.is_empty())
            .map(|option| Box::new(ParameterForm::new(&option.parameters)));
        self.selected = Some(value);
    }
}

#[derive(Debug)]
enum Field {
    Simple(SimpleField),
    Choice(ChoiceField),
}

impl Field {
    fn name(&self) -> &str {
        match self {
            Self::Simple(field) => &field.parameter.name,
            Self::Choice(field) => &field.parameter.name,
        }
    }
}

/// Live parameter-entry form.
#[derive(Debug, Default)]
pub struct ParameterForm {
    fields: Vec<Field>,
}

impl ParameterForm {
    pub fn new(parameters: &[Parameter]) -> Self {
        let fields = parameters
            .iter()
            .filter(|parameter| !parameter.is_implicit())
            .map(|parameter| match parameter {
                Parameter::Simple(simple) => Field::Simple(SimpleField {
                    value: simple.default.clone().unwrap_or(Value::Null),
                    parameter: simple.clone(),
                }),
                Parameter::Choice(choice) => Field::Choice(ChoiceField::new(choice.clone())),
            })
            .collect();
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a simple field value by dotted path.
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        match self.resolve_mut(path)? {
            Field::Simple(field) => {
                field.value = value;
                Ok(())
            }
            Field::Choice(_) => Err(FormError::NotAnInput(path.to_string())),
        }
    }

    /// Selects a choice option by dotted path, swapping its sub-form.
    pub fn select(&mut self, path: &str, value: &str) -> Result<(), FormError> {
        match self.resolve_mut(path)? {
            Field::Choice(field) => {
                if field.parameter.option(value).is_none() {
                    return Err(FormError::UnknownOption {
                        path: path.to_string(),
                        value: value.to_string(),
                    });
                }
                field.switch_to(value.to_string());
                Ok(())
            }
            Field::Simple(_) => Err(FormError::NotAChoice(path.to_string())),
        }
    }

    /// Flattened, depth-first view of the visible fields.
    pub fn fields(&self) -> Vec<RenderedField> {
        let mut rendered = Vec::new();
        self.render_into("", 0, &mut rendered);
        rendered
    }

    /// Values of every visible field, flattened into one object.
    pub fn values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        self.collect_into(&mut values);
        values
    }

    /// Number of sub-forms currently alive, nested ones included.
    pub fn live_sub_forms(&self) -> usize {
        self.fields
            .iter()
            .map(|field| match field {
                Field::Choice(choice) => choice
                    .sub_form
                    .as_ref()
                    .map_or(0, |form| 1 + form.live_sub_forms()),
                Field::Simple(_) => 0,
            })
            .sum()
    }

    fn resolve_mut(&mut self, path: &str) -> Result<&mut Field, FormError> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name() == head)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;

        let Some(rest) = rest else {
            return Ok(field);
        };
        match field {
            Field::Choice(ChoiceField {
                sub_form: Some(sub_form),
                ..
            }) => sub_form
                .resolve_mut(rest)
                .map_err(|_| FormError::UnknownField(path.to_string())),
            _ => Err(FormError::UnknownField(path.to_string())),
        }
    }

    fn render_into(&self, prefix: &str, depth: usize, out: &mut Vec<RenderedField>) {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name().to_string()
            } else {
                format!("{prefix}.{}", field.name())
            };
            match field {
                Field::Simple(simple) => out.push(RenderedField {
                    path,
                    depth,
                    label: simple.parameter.label.clone(),
                    widget: Widget::Input {
                        kind: simple.parameter.kind.clone(),
                        value: simple.value.clone(),
                    },
                }),
                Field::Choice(choice) => {
                    out.push(RenderedField {
                        path: path.clone(),
                        depth,
                        label: choice.parameter.label.clone(),
                        widget: Widget::Select {
                            options: choice
                                .parameter
                                .options
                                .iter()
                                .map(|option| option.value.clone())
                                .collect(),
                            selected: choice.selected.clone(),
                        },
                    });
                    if let Some(sub_form) = &choice.sub_form {
                        sub_form.render_into(&path, depth + 1, out);
                    }
                }
            }
        }
    }

    fn collect_into(&self, out: &mut Map<String, Value>) {
        for field in &self.fields {
            match field {
                Field::Simple(simple) => {
                    if !simple.value.is_null() {
                        out.insert(simple.parameter.name.clone(), simple.value.clone());
                    }
                }
                Field::Choice(choice) => {
                    if let Some(selected) = &choice.selected {
                        out.insert(choice.parameter.name.clone(), Value::from(selected.as_str()));
                    }
                    if let Some(sub_form) = &choice.sub_form {
                        sub_form.collect_into(out);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownField(String),
    NotAChoice(String),
    NotAnInput(String),
    UnknownOption { path: String, value: String },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(path) => write!(f, "no visible form field at `{path}`"),
            Self::NotAChoice(path) => write!(f, "form field `{path}` is not a choice"),
            Self::NotAnInput(path) => write!(f, "form field `{path}` is a choice, not an input"),
            Self::UnknownOption { path, value } => {
                write!(f, "choice `{path}` has no option `{value}`")
            }
        }
    }
}

impl Error for FormError {}

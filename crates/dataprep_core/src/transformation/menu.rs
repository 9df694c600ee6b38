//! Column transformation menu.
//!
//! # Responsibility
//! - Group transformations by category for the column menu.
//! - Turn a menu selection into either an immediate step or a form.

use crate::model::column::Column;
use crate::model::step::StepAction;
use crate::transformation::form::ParameterForm;
use crate::transformation::schema::Transformation;

/// Transformations sharing one category, in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory {
    pub name: String,
    pub transformations: Vec<Transformation>,
}

/// Outcome of picking a menu entry.
#[derive(Debug)]
pub enum MenuSelection {
    /// No visible parameter: the step can be appended right away.
    Immediate(StepAction),
    /// Parameters must be entered first.
    Form(ParameterForm),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformationMenu {
    categories: Vec<MenuCategory>,
}

impl TransformationMenu {
    /// Groups by category, keeping first-seen category order.
    pub fn new(transformations: Vec<Transformation>) -> Self {
        let mut categories: Vec<MenuCategory> = Vec::new();
        for transformation in transformations {
            match categories
                .iter_mut()
                .find(|category| category.name == transformation.category)
            {
                Some(category) => category.transformations.push(transformation),
                None => categories.push(MenuCategory {
                    name: transformation.category.clone(),
                    transformations: vec![transformation],
                }),
            }
        }
        Self { categories }
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn find(&self, name: &str) -> Option<&Transformation> {
        self.categories
            .iter()
            .flat_map(|category| category.transformations.iter())
            .find(|transformation| transformation.name == name)
    }

    /// Selects a transformation for `column`.
    pub fn select(&self, name: &str, column: &Column) -> Option<MenuSelection> {
        let transformation = self.find(name)?;
        if transformation.has_visible_parameters() {
            Some(MenuSelection::Form(ParameterForm::new(
                &transformation.parameters,
            )))
        } else {
            Some(MenuSelection::Immediate(StepAction::on_column(
                transformation.name.as_str(),
                column,
            )))
        }
    }
}

/// Builds the step submitted from a filled form.
///
/// Column scope parameters win over form values with the same name.
pub fn build_step(
    transformation: &Transformation,
    form: &ParameterForm,
    column: &Column,
) -> StepAction {
    let mut step = StepAction::new(transformation.name.as_str());
    step.parameters = form.values();
    let scoped = StepAction::on_column(transformation.name.as_str(), column);
    step.parameters.extend(scoped.parameters);
    step
}

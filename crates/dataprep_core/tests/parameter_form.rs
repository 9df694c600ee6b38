use dataprep_core::model::column::{Column, PrimitiveType};
use dataprep_core::transformation::form::{FormError, ParameterForm, Widget};
use dataprep_core::transformation::menu::{build_step, MenuSelection, TransformationMenu};
use dataprep_core::transformation::schema::{decode_transformations, Transformation};
use serde_json::{json, Value};

fn catalog() -> Vec<Transformation> {
    decode_transformations(&json!([
        {
            "name": "uppercase",
            "label": "Change to upper case",
            "category": "strings",
            "parameters": [
                { "name": "column_id", "type": "string", "implicit": true },
                { "name": "scope", "type": "string", "implicit": true }
            ]
        },
        {
            "name": "replace_on_value",
            "category": "strings",
            "parameters": [
                { "name": "column_id", "type": "string", "implicit": true },
                {
                    "name": "cell_value",
                    "type": "select",
                    "default": "regex",
                    "configuration": { "values": [
                        { "value": "regex", "parameters": [
                            { "name": "pattern", "type": "regex", "default": ".*" },
                            {
                                "name": "flags",
                                "type": "select",
                                "configuration": { "values": [
                                    { "value": "none" },
                                    { "value": "custom", "parameters": [
                                        { "name": "flag_list", "type": "string" }
                                    ]}
                                ]}
                            }
                        ]},
                        { "value": "exact", "parameters": [
                            { "name": "token", "type": "string" }
                        ]},
                        { "value": "empty" }
                    ]}
                },
                { "name": "replace_value", "type": "string", "default": "" }
            ]
        },
        {
            "name": "round",
            "category": "numbers",
            "parameters": [{ "name": "precision", "type": "integer", "default": 2 }]
        }
    ]))
    .unwrap()
}

fn replace_form() -> ParameterForm {
    let transformations = catalog();
    let replace = transformations
        .iter()
        .find(|transformation| transformation.name == "replace_on_value")
        .unwrap();
    ParameterForm::new(&replace.parameters)
}

fn paths(form: &ParameterForm) -> Vec<String> {
    form.fields().into_iter().map(|field| field.path).collect()
}

#[test]
fn initial_form_renders_default_option_sub_form() {
    let form = replace_form();
    assert_eq!(
        paths(&form),
        vec![
            "cell_value",
            "cell_value.pattern",
            "cell_value.flags",
            "replace_value"
        ]
    );
    let fields = form.fields();
    assert_eq!(fields[1].depth, 1);
    assert!(matches!(
        &fields[0].widget,
        Widget::Select { selected: Some(selected), .. } if selected == "regex"
    ));
    // regex sub-form plus the flags choice, whose `none` option has no fields
    assert_eq!(form.live_sub_forms(), 1);
}

#[test]
fn switching_option_disposes_previous_sub_form() {
    let mut form = replace_form();
    form.select("cell_value.flags", "custom").unwrap();
    form.set_value("cell_value.flags.flag_list", json!("i")).unwrap();
    assert_eq!(form.live_sub_forms(), 2);

    form.select("cell_value", "exact").unwrap();
    assert_eq!(form.live_sub_forms(), 1);
    assert_eq!(
        paths(&form),
        vec!["cell_value", "cell_value.token", "replace_value"]
    );
    assert!(matches!(
        form.set_value("cell_value.flags.flag_list", json!("g")),
        Err(FormError::UnknownField(_))
    ));

    // coming back starts from fresh defaults
    form.select("cell_value", "regex").unwrap();
    let values = form.values();
    assert_eq!(values.get("pattern"), Some(&json!(".*")));
    assert!(values.get("flag_list").is_none());
}

#[test]
fn option_without_parameters_has_no_sub_form() {
    let mut form = replace_form();
    form.select("cell_value", "empty").unwrap();
    assert_eq!(form.live_sub_forms(), 0);
    assert_eq!(paths(&form), vec!["cell_value", "replace_value"]);
}

#[test]
fn addressing_errors_are_typed() {
    let mut form = replace_form();
    assert!(matches!(
        form.select("replace_value", "x"),
        Err(FormError::NotAChoice(_))
    ));
    assert!(matches!(
        form.set_value("cell_value", json!("exact")),
        Err(FormError::NotAnInput(_))
    ));
    assert!(matches!(
        form.select("cell_value", "fuzzy"),
        Err(FormError::UnknownOption { .. })
    ));
    assert!(matches!(
        form.set_value("column_id", json!("0001")),
        Err(FormError::UnknownField(_))
    ));
}

#[test]
fn menu_groups_by_category_and_builds_column_steps() {
    let menu = TransformationMenu::new(catalog());
    let names: Vec<&str> = menu
        .categories()
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(names, vec!["strings", "numbers"]);
    assert_eq!(menu.categories()[0].transformations.len(), 2);

    let column = Column::new("0001", "city", PrimitiveType::String);
    let Some(MenuSelection::Immediate(step)) = menu.select("uppercase", &column) else {
        panic!("uppercase has no visible parameter");
    };
    assert_eq!(step.action, "uppercase");
    assert_eq!(step.parameter_str("column_id"), Some("0001"));
    assert_eq!(step.parameter_str("scope"), Some("column"));

    let Some(MenuSelection::Form(mut form)) = menu.select("replace_on_value", &column) else {
        panic!("replace_on_value needs a form");
    };
    form.select("cell_value", "exact").unwrap();
    form.set_value("cell_value.token", json!("Paris")).unwrap();
    form.set_value("replace_value", json!("PARIS")).unwrap();
    let transformation = menu.find("replace_on_value").unwrap();
    let step = build_step(transformation, &form, &column);

    assert_eq!(step.parameters.get("cell_value"), Some(&json!("exact")));
    assert_eq!(step.parameters.get("token"), Some(&json!("Paris")));
    assert_eq!(step.parameters.get("replace_value"), Some(&json!("PARIS")));
    assert_eq!(step.parameters.get("column_name"), Some(&Value::from("city")));
    assert!(menu.select("missing", &column).is_none());
}

use dataprep_core::action::{
    Action, ActionParseError, DatasetAction, ImportAction, InventoryAction, PlaygroundAction,
    PreparationAction, SearchAction,
};
use dataprep_core::model::inventory::{DisplayMode, ItemKind, SortField};
use serde_json::json;

fn parse(value: serde_json::Value) -> Action {
    Action::from_value(value).unwrap()
}

#[test]
fn every_domain_prefix_is_routed() {
    assert!(matches!(
        parse(json!({"type": "@@dataset/CLONE", "payload": {"id": "ds-1"}})),
        Action::Dataset(DatasetAction::Clone { .. })
    ));
    assert!(matches!(
        parse(json!({"type": "@@preparation/CREATE"})),
        Action::Preparation(PreparationAction::Create)
    ));
    assert!(matches!(
        parse(json!({"type": "@@inventory/CANCEL_EDIT", "payload": {"kind": "folder", "id": "f-1"}})),
        Action::Inventory(InventoryAction::CancelEdit {
            kind: ItemKind::Folder,
            ..
        })
    ));
    assert!(matches!(
        parse(json!({"type": "@@playground/LOAD_COLUMN_TYPES", "payload": {"columnId": "0001"}})),
        Action::Playground(PlaygroundAction::LoadColumnTypes { .. })
    ));
    assert!(matches!(
        parse(json!({"type": "@@import/CLOSE"})),
        Action::Import(ImportAction::Close)
    ));
    assert!(matches!(
        parse(json!({"type": "@@search/DOCUMENTATION", "payload": {"keyword": "split"}})),
        Action::Search(SearchAction::Documentation { .. })
    ));
}

#[test]
fn payload_field_names_follow_the_wire() {
    assert_eq!(
        parse(json!({
            "type": "@@preparation/SORT",
            "payload": {"field": "name", "isDescending": false}
        })),
        Action::Preparation(PreparationAction::Sort {
            field: SortField::Name,
            is_descending: false
        })
    );
    assert_eq!(
        parse(json!({
            "type": "@@inventory/DISPLAY_MODE",
            "payload": {"type": "dataset", "mode": "large"}
        })),
        Action::Inventory(InventoryAction::DisplayMode {
            kind: ItemKind::Dataset,
            mode: DisplayMode::Large
        })
    );
    assert_eq!(
        parse(json!({
            "type": "@@playground/CHANGE_TYPE",
            "payload": {"columnId": "0001", "type": "integer"}
        })),
        Action::Playground(PlaygroundAction::ChangeType {
            column_id: "0001".to_string(),
            type_id: "integer".to_string()
        })
    );
    assert_eq!(
        parse(json!({"type": "@@preparation/FOLDER_FETCH", "payload": {"folderId": "Lw=="}})),
        Action::Preparation(PreparationAction::FolderFetch {
            folder_id: Some("Lw==".to_string())
        })
    );
}

#[test]
fn append_step_carries_step_actions() {
    let action = parse(json!({
        "type": "@@playground/APPEND_STEP",
        "payload": {"actions": [
            {"action": "uppercase", "parameters": {"scope": "column", "column_id": "0002"}}
        ]}
    }));
    let Action::Playground(PlaygroundAction::AppendStep { actions }) = action else {
        panic!("expected APPEND_STEP");
    };
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].parameter_str("column_id"), Some("0002"));
}

#[test]
fn errors_distinguish_unknown_from_invalid() {
    assert!(matches!(
        Action::from_json(r#"{"type":"@@unknown/THING"}"#),
        Err(ActionParseError::UnknownType(_))
    ));
    assert!(matches!(
        Action::from_json(r#"{"type":"@@dataset/SORT","payload":{"sortBy":"size","sortDesc":true}}"#),
        Err(ActionParseError::InvalidPayload { .. })
    ));
    assert!(matches!(
        Action::from_json("not json"),
        Err(ActionParseError::Malformed(_))
    ));
}

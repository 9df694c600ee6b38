use dataprep_core::action::{Action, ImportAction};
use dataprep_core::effect::{BackendRequest, BackendResponse, Completion, Effect};
use dataprep_core::state::import::ImportType;
use dataprep_core::{AppState, Dispatcher};

fn connectors() -> Vec<ImportType> {
    vec![
        import_type("local", false),
        import_type("hdfs", true),
        import_type("tcomp-JDBCDatastore", false),
    ]
}

#[test]
fn fetched_connectors_land_in_state() {
    let mut dispatcher = Dispatcher::new();
    let mut state = AppState::new();

    let effects = dispatcher.dispatch(&mut state, Action::Import(ImportAction::FetchTypes));
    let [Effect::Request { id, request }] = effects.as_slice() else {
        panic!("expected an import types request");
    };
    assert_eq!(request, &BackendRequest::ListImportTypes);

    dispatcher.resolve(
        &mut state,
        *id,
        Completion::ok(BackendResponse::ImportTypes(connectors())),
    );
    assert_eq!(state.import.import_types().len(), 3);
}

#[test]
fn open_without_type_uses_default_connector() {
    let mut dispatcher = Dispatcher::new();
    let mut state = AppState::new();
    state.import.set_import_types(connectors());

    dispatcher.dispatch(
        &mut state,
        Action::Import(ImportAction::Open { import_type: None }),
    );
    assert!(state.import.is_visible());
    assert_eq!(state.import.import_item().unwrap().location_type, "hdfs");

    dispatcher.dispatch(&mut state, Action::Import(ImportAction::Close));
    assert!(!state.import.is_visible());
}

#[test]
fn open_with_type_selects_that_connector() {
    let mut dispatcher = Dispatcher::new();
    let mut state = AppState::new();
    state.import.set_import_types(connectors());

    dispatcher.dispatch(
        &mut state,
        Action::Import(ImportAction::Open {
            import_type: Some("tcomp-JDBCDatastore".to_string()),
        }),
    );
    assert_eq!(
        state.import.import_item().unwrap().location_type,
        "tcomp-JDBCDatastore"
    );

    // unknown connector leaves the dialog closed
    let mut state = AppState::new();
    dispatcher.dispatch(
        &mut state,
        Action::Import(ImportAction::Open {
            import_type: Some("ftp".to_string()),
        }),
    );
    assert!(!state.import.is_visible());
}

#[test]
fn connectors_decode_from_backend_json() {
    let decoded: Vec<ImportType> = serde_json::from_str(
        r#"[{"locationType":"local","label":"Local file","defaultImport":true}]"#,
    )
    .unwrap();
    assert!(decoded[0].default_import);
    assert!(!decoded[0].dynamic);
}

fn import_type(location_type: &str, default_import: bool) -> ImportType {
    ImportType {
        location_type: location_type.to_string(),
        label: location_type.to_string(),
        default_import,
        dynamic: false,
    }
}

use std::collections::VecDeque;

use dataprep_core::action::{Action, DatasetAction, PlaygroundAction, SearchAction};
use dataprep_core::effect::{
    BackendError, BackendRequest, BackendResponse, Completion, ConfirmPrompt, Effect,
    ExternalUiTrigger, Notification,
};
use dataprep_core::model::column::{Column, PrimitiveType, SemanticDomain, TypeDescriptor};
use dataprep_core::model::inventory::{
    DisplayMode, InventoryItem, ItemKind, SortField, SortOrder, SortSelection,
};
use dataprep_core::preferences::{
    InventoryPreferences, MemoryPreferenceStore, PreferenceError, PreferenceResult,
    PreferenceStore, PreferenceWrite, KEY_DATASETS_ORDER, KEY_DATASETS_SORT,
};
use dataprep_core::{
    ActionParseError, AppState, BackendClient, Dispatcher, Runtime, UiBridge,
};

/// Answers requests from a script, in order, and records what was asked.
#[derive(Default)]
struct ScriptedBackend {
    responses: VecDeque<Result<BackendResponse, BackendError>>,
    requests: Vec<BackendRequest>,
}

impl ScriptedBackend {
    fn answering(
        responses: impl IntoIterator<Item = Result<BackendResponse, BackendError>>,
    ) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            requests: Vec::new(),
        }
    }
}

impl BackendClient for ScriptedBackend {
    fn execute(&mut self, request: &BackendRequest) -> Result<BackendResponse, BackendError> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Unavailable("script exhausted".to_string())))
    }
}

#[derive(Default)]
struct RecordingUi {
    confirm_answer: bool,
    prompts: Vec<ConfirmPrompt>,
    notifications: Vec<Notification>,
    triggers: Vec<ExternalUiTrigger>,
}

impl UiBridge for RecordingUi {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.push(prompt.clone());
        self.confirm_answer
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn trigger(&mut self, trigger: ExternalUiTrigger) {
        self.triggers.push(trigger);
    }
}

/// Memory store that refuses writes to one key.
struct FailingStore {
    inner: MemoryPreferenceStore,
    failing_key: &'static str,
}

impl PreferenceStore for FailingStore {
    fn get_raw(&self, key: &str) -> PreferenceResult<Option<String>> {
        self.inner.get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> PreferenceResult<()> {
        if key == self.failing_key {
            let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            return Err(PreferenceError::Encoding(err));
        }
        self.inner.set_raw(key, value)
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        self.inner.remove(key)
    }
}

type TestRuntime = Runtime<ScriptedBackend, MemoryPreferenceStore, RecordingUi>;

fn runtime(backend: ScriptedBackend) -> TestRuntime {
    Runtime::new(backend, MemoryPreferenceStore::new(), RecordingUi::default())
}

fn dataset(id: &str, name: &str) -> InventoryItem {
    InventoryItem::new(ItemKind::Dataset, id, name)
}

#[test]
fn sort_success_persists_preferences() {
    let mut runtime = runtime(ScriptedBackend::answering([Ok(BackendResponse::Datasets(
        vec![dataset("ds-1", "customers")],
    ))]));

    runtime.dispatch(Action::Dataset(DatasetAction::Sort {
        sort_by: SortField::Date,
        sort_desc: false,
    }));

    let preferences = InventoryPreferences::load(runtime.preferences());
    assert_eq!(
        preferences.datasets_sort,
        SortSelection::new(SortField::Date, SortOrder::Asc)
    );
    assert_eq!(runtime.state().inventory.datasets().len(), 1);
}

#[test]
fn sort_failure_leaves_preferences_untouched() {
    let mut runtime = runtime(ScriptedBackend::answering([Err(BackendError::Rejected {
        status: 503,
        message: "maintenance".to_string(),
    })]));

    runtime.dispatch(Action::Dataset(DatasetAction::Sort {
        sort_by: SortField::Date,
        sort_desc: false,
    }));

    assert!(runtime.preferences().is_empty());
    assert_eq!(
        runtime.state().inventory.datasets_sort(),
        SortSelection::default()
    );
}

#[test]
fn failed_sort_save_skips_order_and_restores_selection() {
    let store = FailingStore {
        inner: MemoryPreferenceStore::new(),
        failing_key: KEY_DATASETS_SORT,
    };
    let backend = ScriptedBackend::answering([Ok(BackendResponse::Datasets(vec![dataset(
        "ds-1",
        "customers",
    )]))]);
    let mut runtime = Runtime::new(backend, store, RecordingUi::default());

    runtime.dispatch(Action::Dataset(DatasetAction::Sort {
        sort_by: SortField::Date,
        sort_desc: false,
    }));

    assert_eq!(runtime.preferences().get_raw(KEY_DATASETS_ORDER).unwrap(), None);
    assert_eq!(
        runtime.state().inventory.datasets_sort(),
        SortSelection::default()
    );
    assert_eq!(runtime.state().inventory.datasets().len(), 1);
}

#[test]
fn preferences_are_restored_on_start() {
    let store = MemoryPreferenceStore::new();
    PreferenceWrite::PreparationsSort(SortField::Date)
        .apply(&store)
        .unwrap();
    PreferenceWrite::DatasetsDisplayMode(DisplayMode::Large)
        .apply(&store)
        .unwrap();

    let runtime = Runtime::new(ScriptedBackend::default(), store, RecordingUi::default());
    let inventory = &runtime.state().inventory;
    assert_eq!(inventory.preparations_sort().field, SortField::Date);
    assert_eq!(inventory.display_mode(ItemKind::Dataset), DisplayMode::Large);
    assert_eq!(inventory.display_mode(ItemKind::Preparation), DisplayMode::Table);
}

#[test]
fn wire_actions_are_parsed_and_unknown_types_ignored() {
    let mut runtime = runtime(ScriptedBackend::default());

    runtime
        .dispatch_json(r#"{"type":"@@inventory/DISPLAY_MODE","payload":{"type":"preparation","mode":"large"}}"#)
        .unwrap();
    assert_eq!(
        runtime.preferences().get_raw("org.talend.dataprep.preparations.displaymode").unwrap(),
        Some("\"large\"".to_string())
    );

    runtime
        .dispatch_json(r#"{"type":"@@router/GO","payload":{"route":"home"}}"#)
        .unwrap();
    assert!(runtime.backend().requests.is_empty());

    assert!(matches!(
        runtime.dispatch_json(r#"{"payload":{}}"#),
        Err(ActionParseError::MissingType)
    ));
}

#[test]
fn confirmed_removal_runs_the_whole_chain() {
    let mut runtime = runtime(ScriptedBackend::answering([Ok(BackendResponse::Done)]));
    runtime
        .state_mut()
        .inventory
        .set_datasets(vec![dataset("ds-1", "customers")]);
    runtime.ui_mut().confirm_answer = true;

    runtime.dispatch(Action::Dataset(DatasetAction::Remove {
        id: "ds-1".to_string(),
    }));

    assert_eq!(runtime.ui().prompts.len(), 1);
    assert_eq!(
        runtime.backend().requests,
        vec![BackendRequest::DeleteDataset {
            id: "ds-1".to_string()
        }]
    );
    assert_eq!(runtime.ui().notifications.len(), 1);
    assert_eq!(runtime.ui().notifications[0].message_key, "REMOVE_SUCCESS");
    assert!(runtime.state().inventory.datasets().is_empty());
}

#[test]
fn declined_removal_sends_nothing() {
    let mut runtime = runtime(ScriptedBackend::default());
    runtime
        .state_mut()
        .inventory
        .set_datasets(vec![dataset("ds-1", "customers")]);

    runtime.dispatch(Action::Dataset(DatasetAction::Remove {
        id: "ds-1".to_string(),
    }));

    assert_eq!(runtime.ui().prompts.len(), 1);
    assert!(runtime.backend().requests.is_empty());
    assert_eq!(runtime.state().inventory.datasets().len(), 1);
}

#[test]
fn local_file_update_opens_the_picker() {
    let mut runtime = runtime(ScriptedBackend::default());
    runtime
        .state_mut()
        .inventory
        .set_datasets(vec![dataset("ds-1", "customers")]);

    runtime.dispatch(Action::Dataset(DatasetAction::Update {
        id: "ds-1".to_string(),
    }));
    assert_eq!(
        runtime.ui().triggers,
        vec![ExternalUiTrigger::DatasetFilePicker]
    );
}

#[test]
fn documentation_search_highlights_results() {
    let body = "\"https://help/split\",\"Split a column\",\"Split values on a separator\"\n\
                \"https://help/trim\",\"Trim\",\"Remove leading spaces\"\n";
    let mut runtime = runtime(ScriptedBackend::answering([Ok(
        BackendResponse::Documentation(body.to_string()),
    )]));

    runtime.dispatch(Action::Search(SearchAction::Documentation {
        keyword: "  split ".to_string(),
    }));

    let search = &runtime.state().search;
    assert!(!search.is_searching());
    assert_eq!(search.keyword(), Some("split"));
    assert_eq!(search.documentation().len(), 2);
    assert_eq!(
        search.documentation()[0].name,
        "<span class=\"highlighted\">Split</span> a column"
    );
    assert_eq!(search.documentation()[0].tooltip_name, "Split a column");
    assert_eq!(
        runtime.backend().requests,
        vec![BackendRequest::SearchDocumentation {
            keyword: "split".to_string()
        }]
    );
}

#[test]
fn blank_keyword_drops_the_pending_search() {
    let mut dispatcher = Dispatcher::new();
    let mut state = AppState::new();
    let search = |keyword: &str| {
        Action::Search(SearchAction::Documentation {
            keyword: keyword.to_string(),
        })
    };

    let effects = dispatcher.dispatch(&mut state, search("round"));
    let [Effect::Request { id, .. }] = effects.as_slice() else {
        panic!("expected a search request");
    };
    let id = *id;

    assert!(dispatcher.dispatch(&mut state, search("  ")).is_empty());
    assert_eq!(state.search.keyword(), None);

    let body = "\"https://help/round\",\"Round\",\"Round a number\"\n";
    dispatcher.resolve(
        &mut state,
        id,
        Completion::ok(BackendResponse::Documentation(body.to_string())),
    );
    assert!(state.search.documentation().is_empty());
    assert!(!state.search.is_searching());
}

#[test]
fn column_types_are_fetched_once_per_session() {
    let mut runtime = runtime(ScriptedBackend::answering([
        Ok(BackendResponse::Domains(vec![SemanticDomain::new(
            "CITY", "City", 80.0,
        )])),
        Ok(BackendResponse::Types(vec![
            TypeDescriptor::new("STRING"),
            TypeDescriptor::new("NUMERIC"),
        ])),
        Ok(BackendResponse::Domains(Vec::new())),
    ]));
    runtime.state_mut().playground.open(
        "ds-1",
        None,
        vec![
            Column::new("0001", "city", PrimitiveType::String),
            Column::new("0002", "amount", PrimitiveType::Float),
        ],
    );

    for column_id in ["0001", "0002"] {
        runtime.dispatch(Action::Playground(PlaygroundAction::LoadColumnTypes {
            column_id: column_id.to_string(),
        }));
    }

    let requests = &runtime.backend().requests;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1], BackendRequest::FetchTypes);
    assert_eq!(
        runtime.state().playground.column_types().column_id.as_deref(),
        Some("0002")
    );
    assert_eq!(runtime.state().playground.primitive_types().unwrap().len(), 1);
}

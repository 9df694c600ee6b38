//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dataprep_core` linkage, configuration and preference storage.
//! - Keep output deterministic for quick local sanity checks.

use dataprep_core::db::open_db;
use dataprep_core::{
    init_from_config, CoreConfig, InventoryPreferences, MemoryPreferenceStore, MessageCatalog,
    SqlitePreferenceStore,
};
use log::info;
use serde_json::Map;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("dataprep_core ping={}", dataprep_core::ping());
    println!("dataprep_core version={}", dataprep_core::core_version());

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("dataprep_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read `{path}`: {err}"))?;
            CoreConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => CoreConfig::default(),
    };

    let logging = init_from_config(&config)?;
    println!("logging enabled={logging}");

    let preferences = match config.preferences_path.as_deref() {
        Some(path) => {
            let conn = open_db(path).map_err(|err| err.to_string())?;
            let store = SqlitePreferenceStore::try_new(&conn).map_err(|err| err.to_string())?;
            InventoryPreferences::load(&store)
        }
        None => InventoryPreferences::load(&MemoryPreferenceStore::new()),
    };
    println!(
        "datasets sort={} order={}",
        preferences.datasets_sort.field.as_str(),
        preferences.datasets_sort.order.as_str()
    );
    println!(
        "preparations sort={} order={}",
        preferences.preparations_sort.field.as_str(),
        preferences.preparations_sort.order.as_str()
    );

    let catalog = MessageCatalog::new(config.message_catalog.clone());
    println!(
        "catalog REMOVE_SUCCESS={}",
        catalog.translate("REMOVE_SUCCESS", &Map::new())
    );
    info!("event=cli_probe module=cli status=ok");
    Ok(())
}

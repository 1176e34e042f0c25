//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide store handle and error reporter; core stays free
//!   of global state.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back inside response envelopes, never as thrown errors.
//! - The store is opened once per process; `in_memory=true` redirects it to
//!   a throwaway location for tests and previews.

use studiomanager_core::db::{open_db, open_db_in_memory};
use studiomanager_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppError, CatalogRepository, ErrorReporter, GearRepository, LastErrorReporter, RepoResult,
    SqliteCatalogRepository, SqliteGearRepository,
};
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

static STORE: OnceLock<Mutex<Connection>> = OnceLock::new();
static REPORTER: OnceLock<Mutex<LastErrorReporter>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and a readable message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the shared store once per process.
///
/// `in_memory=true` is the throwaway test mode; otherwise `db_path` names
/// the SQLite file inside the app's documents directory.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String, in_memory: bool) -> String {
    if STORE.get().is_some() {
        return String::new();
    }

    let opened = if in_memory {
        open_db_in_memory()
    } else {
        open_db(&db_path)
    };

    match opened {
        Ok(conn) => {
            let _ = STORE.set(Mutex::new(conn));
            String::new()
        }
        Err(err) => format!("failed to open store: {err}"),
    }
}

/// One gear row shaped for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearListItem {
    pub uuid: String,
    pub name: String,
    pub manufacturer_uuid: Option<String>,
    pub type_uuids: Vec<String>,
}

/// One catalog row shaped for pickers and the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedListItem {
    pub uuid: String,
    pub name: String,
}

/// List response envelope; `message` is empty on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearListResponse {
    pub items: Vec<GearListItem>,
    pub message: String,
}

/// List response envelope for catalog rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedListResponse {
    pub items: Vec<NamedListItem>,
    pub message: String,
}

/// Generic action response envelope for command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub uuid: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(uuid: String) -> Self {
        Self {
            ok: true,
            uuid: Some(uuid),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            uuid: None,
            message: message.into(),
        }
    }
}

/// Error alert state read by the Dart display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub visible: bool,
    pub message: String,
    pub recovery_suggestion: String,
}

/// Lists all gear items sorted by name.
#[flutter_rust_bridge::frb(sync)]
pub fn gear_list() -> GearListResponse {
    let result = with_store(|conn| {
        let repo = SqliteGearRepository::try_new(conn)?;
        repo.fetch_all_gear()
    });

    match result {
        Ok(items) => GearListResponse {
            items: items
                .into_iter()
                .map(|item| GearListItem {
                    uuid: item.uuid.to_string(),
                    name: item.name,
                    manufacturer_uuid: item.manufacturer.map(|id| id.to_string()),
                    type_uuids: item.types.iter().map(Uuid::to_string).collect(),
                })
                .collect(),
            message: String::new(),
        },
        Err(message) => GearListResponse {
            items: Vec::new(),
            message,
        },
    }
}

/// Creates one gear item with optional manufacturer and gear-type tags.
#[flutter_rust_bridge::frb(sync)]
pub fn gear_create(
    name: String,
    manufacturer_uuid: Option<String>,
    type_uuids: Vec<String>,
) -> ActionResponse {
    let manufacturer = match manufacturer_uuid.as_deref().map(parse_uuid_arg) {
        Some(Ok(id)) => Some(id),
        Some(Err(message)) => return ActionResponse::failure(message),
        None => None,
    };
    let mut types = BTreeSet::new();
    for value in &type_uuids {
        match parse_uuid_arg(value) {
            Ok(id) => {
                types.insert(id);
            }
            Err(message) => return ActionResponse::failure(message),
        }
    }

    let result = with_store_classified(AppError::save_failed, "gear_create", |conn| {
        let mut repo = SqliteGearRepository::try_new(conn)?;
        repo.create_gear(name.as_str(), manufacturer, &types)
    });

    match result {
        Ok(gear) => ActionResponse::success(gear.uuid.to_string()),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Deletes one gear item; controls and settings cascade in the store.
#[flutter_rust_bridge::frb(sync)]
pub fn gear_delete(uuid: String) -> ActionResponse {
    let id = match parse_uuid_arg(&uuid) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };

    let result = with_store_classified(AppError::delete_failed, "gear_delete", |conn| {
        let repo = SqliteGearRepository::try_new(conn)?;
        repo.delete_gear(id)
    });

    match result {
        Ok(()) => ActionResponse::success(uuid),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Lists all manufacturers sorted by name.
#[flutter_rust_bridge::frb(sync)]
pub fn manufacturer_list() -> NamedListResponse {
    let result = with_store(|conn| {
        let repo = SqliteCatalogRepository::try_new(conn)?;
        repo.fetch_all_manufacturers()
    });

    match result {
        Ok(items) => NamedListResponse {
            items: items
                .into_iter()
                .map(|manufacturer| NamedListItem {
                    uuid: manufacturer.uuid.to_string(),
                    name: manufacturer.name,
                })
                .collect(),
            message: String::new(),
        },
        Err(message) => NamedListResponse {
            items: Vec::new(),
            message,
        },
    }
}

/// Creates one manufacturer.
#[flutter_rust_bridge::frb(sync)]
pub fn manufacturer_create(name: String) -> ActionResponse {
    let result = with_store_classified(AppError::save_failed, "manufacturer_create", |conn| {
        let repo = SqliteCatalogRepository::try_new(conn)?;
        repo.create_manufacturer(name.as_str())
    });

    match result {
        Ok(manufacturer) => ActionResponse::success(manufacturer.uuid.to_string()),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Reads the current error alert state.
#[flutter_rust_bridge::frb(sync)]
pub fn last_error() -> ErrorState {
    let reporter = reporter().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    match reporter.current_error() {
        Some(error) => ErrorState {
            visible: reporter.is_visible(),
            message: error.message(),
            recovery_suggestion: error.recovery_suggestion().to_string(),
        },
        None => ErrorState {
            visible: false,
            message: String::new(),
            recovery_suggestion: String::new(),
        },
    }
}

/// Clears the current error alert state.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_error() {
    reporter().lock().unwrap_or_else(std::sync::PoisonError::into_inner).clear();
}

fn reporter() -> &'static Mutex<LastErrorReporter> {
    REPORTER.get_or_init(|| Mutex::new(LastErrorReporter::new()))
}

fn parse_uuid_arg(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value).map_err(|_| format!("invalid uuid argument `{value}`"))
}

/// Runs a fetch-style closure against the shared store; failures become
/// reported fetch errors.
fn with_store<T>(operation: impl FnOnce(&mut Connection) -> RepoResult<T>) -> Result<T, String> {
    with_store_classified(AppError::fetch_failed, "fetch", operation)
}

fn with_store_classified<T>(
    classify: impl FnOnce(studiomanager_core::RepoError) -> AppError,
    context: &str,
    operation: impl FnOnce(&mut Connection) -> RepoResult<T>,
) -> Result<T, String> {
    let Some(store) = STORE.get() else {
        return Err("store not initialized; call init_store first".to_string());
    };
    let mut conn = store.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

    operation(&mut conn).map_err(|err| {
        let error = classify(err);
        let message = error.message();
        reporter()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .report(error, context);
        message
    })
}

//! Core domain logic for the StudioManager inventory app.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::gear::{
    ControlType, ControlTypeId, GearControl, GearControlId, GearItem, GearItemId, GearType,
    GearTypeId, Manufacturer, ManufacturerId,
};
pub use model::preset::{Preset, PresetId, Scenario, ScenarioId, Setting, SettingId};
pub use repo::catalog_repo::{CatalogRepository, SqliteCatalogRepository};
pub use repo::gear_repo::{GearRepository, SqliteGearRepository};
pub use repo::preset_repo::{PresetRepository, SqlitePresetRepository};
pub use repo::{RepoError, RepoResult};
pub use report::{AppError, ErrorReporter, LastErrorReporter};
pub use validate::{validate_control_value, validate_name, ValidationResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

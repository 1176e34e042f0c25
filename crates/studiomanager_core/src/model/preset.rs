//! Scenario, preset and setting records.
//!
//! # Invariants
//! - A preset belongs to exactly one scenario; a setting to exactly one
//!   preset.
//! - A setting records one (preset, gear item, control) -> value triple and
//!   is removed together with any of the three referenced records.

use crate::model::gear::{GearControlId, GearItemId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a scenario.
pub type ScenarioId = Uuid;
/// Stable identifier for a preset.
pub type PresetId = Uuid;
/// Stable identifier for a setting.
pub type SettingId = Uuid;

/// Named grouping of presets (e.g. "Drum Recording").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub uuid: ScenarioId,
    pub name: String,
}

impl Scenario {
    /// Creates a scenario with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Named collection of control-value settings within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub uuid: PresetId,
    pub name: String,
    /// Owning scenario.
    pub scenario: ScenarioId,
}

/// One (preset, gear item, control) -> value record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub uuid: SettingId,
    /// Captured control position, stored as entered (e.g. "7", "-3 dB").
    pub control_value: String,
    pub preset: PresetId,
    pub gear_item: GearItemId,
    pub control: GearControlId,
}

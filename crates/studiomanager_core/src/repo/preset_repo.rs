//! Scenario/preset/setting repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD for the preset side of the model: scenarios, their presets, and
//!   the control-value settings captured inside a preset.
//!
//! # Invariants
//! - Deleting a scenario removes its presets; deleting a preset removes its
//!   settings (cascade rules live in the schema and are tested directly).
//! - Scenario and preset fetches are sorted ascending by name.

use crate::model::gear::{GearControlId, GearItemId};
use crate::model::preset::{Preset, PresetId, Scenario, ScenarioId, Setting, SettingId};
use crate::repo::{
    delete_by_uuid, ensure_connection_ready, fetch_named_rows, parse_uuid, rename_by_uuid,
    require_valid, row_exists, RepoError, RepoResult,
};
use crate::validate;
use rusqlite::{params, Connection, Row};

const SETTING_SELECT_SQL: &str = "SELECT uuid, control_value, preset_uuid, gear_uuid, control_uuid
     FROM settings";

/// Repository interface for scenarios, presets and settings.
pub trait PresetRepository {
    /// Lists all scenarios sorted by name.
    fn fetch_all_scenarios(&self) -> RepoResult<Vec<Scenario>>;
    fn create_scenario(&self, name: &str) -> RepoResult<Scenario>;
    fn rename_scenario(&self, id: ScenarioId, name: &str) -> RepoResult<()>;
    /// Deletes a scenario and, transitively, its presets and their settings.
    fn delete_scenario(&self, id: ScenarioId) -> RepoResult<()>;

    /// Lists the presets of one scenario sorted by name.
    fn list_presets(&self, scenario_id: ScenarioId) -> RepoResult<Vec<Preset>>;
    fn get_preset(&self, id: PresetId) -> RepoResult<Option<Preset>>;
    fn create_preset(&self, name: &str, scenario_id: ScenarioId) -> RepoResult<Preset>;
    fn rename_preset(&self, id: PresetId, name: &str) -> RepoResult<()>;
    /// Deletes a preset and its settings.
    fn delete_preset(&self, id: PresetId) -> RepoResult<()>;

    /// Records one control-value setting inside a preset.
    fn add_setting(
        &self,
        preset_id: PresetId,
        gear_id: GearItemId,
        control_id: GearControlId,
        value: &str,
    ) -> RepoResult<Setting>;
    fn list_settings(&self, preset_id: PresetId) -> RepoResult<Vec<Setting>>;
    fn get_setting(&self, id: SettingId) -> RepoResult<Option<Setting>>;
    fn update_setting(&self, id: SettingId, value: &str) -> RepoResult<()>;
    fn delete_setting(&self, id: SettingId) -> RepoResult<()>;
}

/// SQLite-backed preset repository.
pub struct SqlitePresetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePresetRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["scenarios", "presets", "settings"])?;
        Ok(Self { conn })
    }
}

impl PresetRepository for SqlitePresetRepository<'_> {
    fn fetch_all_scenarios(&self) -> RepoResult<Vec<Scenario>> {
        let rows = fetch_named_rows(self.conn, "scenarios", "scenarios.uuid")?;
        Ok(rows
            .into_iter()
            .map(|(uuid, name)| Scenario { uuid, name })
            .collect())
    }

    fn create_scenario(&self, name: &str) -> RepoResult<Scenario> {
        require_valid(validate::validate_scenario(name))?;
        let record = Scenario::new(name);
        self.conn.execute(
            "INSERT INTO scenarios (uuid, name) VALUES (?1, ?2);",
            params![record.uuid.to_string(), record.name.as_str()],
        )?;
        Ok(record)
    }

    fn rename_scenario(&self, id: ScenarioId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "scenario",
            "scenarios",
            id,
            name,
            validate::validate_scenario(name),
        )
    }

    fn delete_scenario(&self, id: ScenarioId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "scenarios", id)
    }

    fn list_presets(&self, scenario_id: ScenarioId) -> RepoResult<Vec<Preset>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, scenario_uuid
             FROM presets
             WHERE scenario_uuid = ?1
             ORDER BY name ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([scenario_id.to_string()])?;
        let mut presets = Vec::new();
        while let Some(row) = rows.next()? {
            presets.push(parse_preset_row(row)?);
        }
        Ok(presets)
    }

    fn get_preset(&self, id: PresetId) -> RepoResult<Option<Preset>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, scenario_uuid FROM presets WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_preset_row(row)?));
        }
        Ok(None)
    }

    fn create_preset(&self, name: &str, scenario_id: ScenarioId) -> RepoResult<Preset> {
        require_valid(validate::validate_preset(name))?;

        if !row_exists(self.conn, "scenarios", scenario_id)? {
            return Err(RepoError::NotFound {
                entity: "scenario",
                id: scenario_id,
            });
        }

        let record = Preset {
            uuid: PresetId::new_v4(),
            name: name.to_string(),
            scenario: scenario_id,
        };
        self.conn.execute(
            "INSERT INTO presets (uuid, name, scenario_uuid) VALUES (?1, ?2, ?3);",
            params![
                record.uuid.to_string(),
                record.name.as_str(),
                record.scenario.to_string(),
            ],
        )?;
        Ok(record)
    }

    fn rename_preset(&self, id: PresetId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "preset",
            "presets",
            id,
            name,
            validate::validate_preset(name),
        )
    }

    fn delete_preset(&self, id: PresetId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "presets", id)
    }

    fn add_setting(
        &self,
        preset_id: PresetId,
        gear_id: GearItemId,
        control_id: GearControlId,
        value: &str,
    ) -> RepoResult<Setting> {
        require_valid(validate::validate_control_value(value))?;

        if !row_exists(self.conn, "presets", preset_id)? {
            return Err(RepoError::NotFound {
                entity: "preset",
                id: preset_id,
            });
        }

        let record = Setting {
            uuid: SettingId::new_v4(),
            control_value: value.to_string(),
            preset: preset_id,
            gear_item: gear_id,
            control: control_id,
        };
        self.conn.execute(
            "INSERT INTO settings (uuid, control_value, preset_uuid, gear_uuid, control_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.uuid.to_string(),
                record.control_value.as_str(),
                record.preset.to_string(),
                record.gear_item.to_string(),
                record.control.to_string(),
            ],
        )?;
        Ok(record)
    }

    fn list_settings(&self, preset_id: PresetId) -> RepoResult<Vec<Setting>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SETTING_SELECT_SQL}
             WHERE preset_uuid = ?1
             ORDER BY uuid ASC;"
        ))?;
        let mut rows = stmt.query([preset_id.to_string()])?;
        let mut settings = Vec::new();
        while let Some(row) = rows.next()? {
            settings.push(parse_setting_row(row)?);
        }
        Ok(settings)
    }

    fn get_setting(&self, id: SettingId) -> RepoResult<Option<Setting>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SETTING_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_setting_row(row)?));
        }
        Ok(None)
    }

    fn update_setting(&self, id: SettingId, value: &str) -> RepoResult<()> {
        require_valid(validate::validate_control_value(value))?;

        let changed = self.conn.execute(
            "UPDATE settings SET control_value = ?2 WHERE uuid = ?1;",
            params![id.to_string(), value],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "setting",
                id,
            });
        }
        Ok(())
    }

    fn delete_setting(&self, id: SettingId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "settings", id)
    }
}

fn parse_preset_row(row: &Row<'_>) -> RepoResult<Preset> {
    let uuid_text: String = row.get("uuid")?;
    let scenario_text: String = row.get("scenario_uuid")?;
    Ok(Preset {
        uuid: parse_uuid(&uuid_text, "presets.uuid")?,
        name: row.get("name")?,
        scenario: parse_uuid(&scenario_text, "presets.scenario_uuid")?,
    })
}

fn parse_setting_row(row: &Row<'_>) -> RepoResult<Setting> {
    let uuid_text: String = row.get("uuid")?;
    let preset_text: String = row.get("preset_uuid")?;
    let gear_text: String = row.get("gear_uuid")?;
    let control_text: String = row.get("control_uuid")?;
    Ok(Setting {
        uuid: parse_uuid(&uuid_text, "settings.uuid")?,
        control_value: row.get("control_value")?,
        preset: parse_uuid(&preset_text, "settings.preset_uuid")?,
        gear_item: parse_uuid(&gear_text, "settings.gear_uuid")?,
        control: parse_uuid(&control_text, "settings.control_uuid")?,
    })
}


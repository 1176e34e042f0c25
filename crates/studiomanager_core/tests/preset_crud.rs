use rusqlite::Connection;
use std::collections::BTreeSet;
use studiomanager_core::db::open_db_in_memory;
use studiomanager_core::{
    GearControl, GearItem, GearRepository, PresetRepository, RepoError, ScenarioId,
    SqliteGearRepository, SqlitePresetRepository,
};

fn seed_gear_with_control(conn: &mut Connection) -> (GearItem, GearControl) {
    let mut repo = SqliteGearRepository::try_new(conn).unwrap();
    let gear = repo.create_gear("LA-2A", None, &BTreeSet::new()).unwrap();
    let control = repo.add_control(gear.uuid, "Gain", None).unwrap();
    (gear, control)
}

#[test]
fn fetch_all_scenarios_is_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    repo.create_scenario("Vocal Tracking").unwrap();
    repo.create_scenario("Drum Recording").unwrap();
    repo.create_scenario("Mixdown").unwrap();

    let names: Vec<String> = repo
        .fetch_all_scenarios()
        .unwrap()
        .into_iter()
        .map(|scenario| scenario.name)
        .collect();
    assert_eq!(names, ["Drum Recording", "Mixdown", "Vocal Tracking"]);
}

#[test]
fn create_scenario_rejects_invalid_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    let err = repo.create_scenario("").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ref reasons)
            if reasons == &["Scenario name cannot be empty".to_string()]
    ));
}

#[test]
fn presets_live_inside_their_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    let drums = repo.create_scenario("Drum Recording").unwrap();
    let vocals = repo.create_scenario("Vocal Tracking").unwrap();

    repo.create_preset("Tight Kick", drums.uuid).unwrap();
    repo.create_preset("Ambient Room", drums.uuid).unwrap();
    repo.create_preset("Lead Take", vocals.uuid).unwrap();

    let names: Vec<String> = repo
        .list_presets(drums.uuid)
        .unwrap()
        .into_iter()
        .map(|preset| preset.name)
        .collect();
    assert_eq!(names, ["Ambient Room", "Tight Kick"]);
}

#[test]
fn create_preset_in_missing_scenario_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    let err = repo
        .create_preset("Orphan", ScenarioId::new_v4())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "scenario",
            ..
        }
    ));
}

#[test]
fn rename_scenario_and_preset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    let scenario = repo.create_scenario("Drafts").unwrap();
    let preset = repo.create_preset("Take 1", scenario.uuid).unwrap();

    repo.rename_scenario(scenario.uuid, "Drum Recording").unwrap();
    repo.rename_preset(preset.uuid, "Final Take").unwrap();

    assert_eq!(
        repo.fetch_all_scenarios().unwrap()[0].name,
        "Drum Recording"
    );
    assert_eq!(
        repo.get_preset(preset.uuid).unwrap().unwrap().name,
        "Final Take"
    );
}

#[test]
fn add_setting_records_value_as_entered() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    let scenario = repo.create_scenario("Mixdown").unwrap();
    let preset = repo.create_preset("Bus Glue", scenario.uuid).unwrap();

    let setting = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, " -3 dB ")
        .unwrap();
    assert_eq!(setting.control_value, " -3 dB ");
    assert_eq!(setting.preset, preset.uuid);
    assert_eq!(setting.gear_item, gear.uuid);
    assert_eq!(setting.control, control.uuid);

    let loaded = repo.get_setting(setting.uuid).unwrap().unwrap();
    assert_eq!(loaded, setting);
    assert_eq!(repo.list_settings(preset.uuid).unwrap(), vec![setting]);
}

#[test]
fn add_setting_validates_control_value() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    let scenario = repo.create_scenario("Mixdown").unwrap();
    let preset = repo.create_preset("Bus Glue", scenario.uuid).unwrap();

    let err = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, "  ")
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ref reasons)
            if reasons == &["Control value cannot be empty".to_string()]
    ));

    let long_value = "a".repeat(51);
    let err = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, &long_value)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ref reasons)
            if reasons == &["Control value must be 50 characters or less".to_string()]
    ));

    let max_value = "a".repeat(50);
    repo.add_setting(preset.uuid, gear.uuid, control.uuid, &max_value)
        .unwrap();
}

#[test]
fn update_setting_replaces_value() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    let scenario = repo.create_scenario("Mixdown").unwrap();
    let preset = repo.create_preset("Bus Glue", scenario.uuid).unwrap();
    let setting = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, "3")
        .unwrap();

    repo.update_setting(setting.uuid, "7").unwrap();
    assert_eq!(
        repo.get_setting(setting.uuid).unwrap().unwrap().control_value,
        "7"
    );

    let err = repo.update_setting(setting.uuid, "").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    repo.delete_setting(setting.uuid).unwrap();
    let err = repo.update_setting(setting.uuid, "5").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "setting",
            ..
        }
    ));
}

#[test]
fn deleting_preset_cascades_its_settings() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    let scenario = repo.create_scenario("Mixdown").unwrap();
    let preset = repo.create_preset("Bus Glue", scenario.uuid).unwrap();
    let setting = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, "7")
        .unwrap();

    repo.delete_preset(preset.uuid).unwrap();

    assert!(repo.get_preset(preset.uuid).unwrap().is_none());
    assert!(repo.get_setting(setting.uuid).unwrap().is_none());
    assert!(repo.list_settings(preset.uuid).unwrap().is_empty());
}

#[test]
fn deleting_scenario_cascades_presets_and_settings() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    let scenario = repo.create_scenario("Drum Recording").unwrap();
    let preset = repo.create_preset("Tight Kick", scenario.uuid).unwrap();
    let setting = repo
        .add_setting(preset.uuid, gear.uuid, control.uuid, "7")
        .unwrap();

    repo.delete_scenario(scenario.uuid).unwrap();

    assert!(repo.fetch_all_scenarios().unwrap().is_empty());
    assert!(repo.get_preset(preset.uuid).unwrap().is_none());
    assert!(repo.get_setting(setting.uuid).unwrap().is_none());
}

#[test]
fn deleting_gear_or_control_cascades_settings() {
    let mut conn = open_db_in_memory().unwrap();
    let (gear, control) = seed_gear_with_control(&mut conn);

    let (preset_id, first_setting, second_setting) = {
        let repo = SqlitePresetRepository::try_new(&conn).unwrap();
        let scenario = repo.create_scenario("Mixdown").unwrap();
        let preset = repo.create_preset("Bus Glue", scenario.uuid).unwrap();
        let first = repo
            .add_setting(preset.uuid, gear.uuid, control.uuid, "7")
            .unwrap();
        let second = repo
            .add_setting(preset.uuid, gear.uuid, control.uuid, "9")
            .unwrap();
        (preset.uuid, first, second)
    };

    {
        let mut repo = SqliteGearRepository::try_new(&mut conn).unwrap();
        repo.delete_control(control.uuid).unwrap();
    }
    {
        let repo = SqlitePresetRepository::try_new(&conn).unwrap();
        assert!(repo.get_setting(first_setting.uuid).unwrap().is_none());
        assert!(repo.get_setting(second_setting.uuid).unwrap().is_none());
    }

    // A setting referencing the gear item directly disappears with it too.
    let third_setting = {
        let mut gear_repo = SqliteGearRepository::try_new(&mut conn).unwrap();
        let refitted = gear_repo.add_control(gear.uuid, "Peak Reduction", None).unwrap();
        drop(gear_repo);
        let repo = SqlitePresetRepository::try_new(&conn).unwrap();
        repo.add_setting(preset_id, gear.uuid, refitted.uuid, "5")
            .unwrap()
    };

    {
        let mut repo = SqliteGearRepository::try_new(&mut conn).unwrap();
        repo.delete_gear(gear.uuid).unwrap();
    }
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();
    assert!(repo.get_setting(third_setting.uuid).unwrap().is_none());
}

#[test]
fn scenario_and_preset_deletes_are_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePresetRepository::try_new(&conn).unwrap();

    let scenario = repo.create_scenario("Temp").unwrap();
    let preset = repo.create_preset("Scratch", scenario.uuid).unwrap();

    repo.delete_preset(preset.uuid).unwrap();
    repo.delete_preset(preset.uuid).unwrap();
    repo.delete_scenario(scenario.uuid).unwrap();
    repo.delete_scenario(scenario.uuid).unwrap();
}

use std::collections::BTreeSet;
use studiomanager_core::{GearItem, GearType, Manufacturer, Scenario};

#[test]
fn constructors_generate_distinct_ids() {
    let first = Manufacturer::new("Neve");
    let second = Manufacturer::new("Neve");
    assert_ne!(first.uuid, second.uuid);

    let gear = GearItem::new("1073");
    assert_eq!(gear.manufacturer, None);
    assert!(gear.types.is_empty());
}

#[test]
fn gear_item_serializes_with_stable_field_names() {
    let gear_type = GearType::new("Preamp");
    let mut gear = GearItem::new("1073");
    gear.types = BTreeSet::from([gear_type.uuid]);

    let value = serde_json::to_value(&gear).unwrap();
    assert_eq!(value["name"], "1073");
    assert_eq!(value["manufacturer"], serde_json::Value::Null);
    assert_eq!(
        value["types"],
        serde_json::json!([gear_type.uuid.to_string()])
    );

    let back: GearItem = serde_json::from_value(value).unwrap();
    assert_eq!(back, gear);
}

#[test]
fn scenario_serializes_and_deserializes() {
    let scenario = Scenario::new("Drum Recording");
    let text = serde_json::to_string(&scenario).unwrap();
    let back: Scenario = serde_json::from_str(&text).unwrap();
    assert_eq!(back, scenario);
}

//! Gear catalog records: manufacturers, gear types, gear items and controls.
//!
//! # Responsibility
//! - Define the equipment side of the data model.
//! - Keep ownership explicit: a control always knows its owning gear item.
//!
//! # Invariants
//! - `uuid` fields are stable and never reused for another record.
//! - `GearItem.types` has set semantics; iteration order carries no meaning.
//! - A `GearControl` row never outlives its owning `GearItem`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for a manufacturer record.
pub type ManufacturerId = Uuid;
/// Stable identifier for a gear type tag.
pub type GearTypeId = Uuid;
/// Stable identifier for a gear item.
pub type GearItemId = Uuid;
/// Stable identifier for a control type.
pub type ControlTypeId = Uuid;
/// Stable identifier for a gear control.
pub type GearControlId = Uuid;

/// Equipment maker referenced by gear items (one-to-many).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub uuid: ManufacturerId,
    pub name: String,
}

impl Manufacturer {
    /// Creates a manufacturer with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Category tag for gear items (e.g. "Microphone", "Compressor").
///
/// Many-to-many with `GearItem`; membership lives in `GearItem.types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearType {
    pub uuid: GearTypeId,
    pub name: String,
}

impl GearType {
    /// Creates a gear type with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A piece of studio equipment being cataloged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearItem {
    /// Stable global id used for linking from controls and settings.
    pub uuid: GearItemId,
    pub name: String,
    /// Optional maker reference; `None` for unbranded or unknown gear.
    pub manufacturer: Option<ManufacturerId>,
    /// Gear type tags attached to this item. Uniqueness is defined by the
    /// set; iteration order is irrelevant to callers.
    pub types: BTreeSet<GearTypeId>,
}

impl GearItem {
    /// Creates an untagged gear item with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            manufacturer: None,
            types: BTreeSet::new(),
        }
    }
}

/// Kind of adjustable control (e.g. "Knob", "Fader").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlType {
    pub uuid: ControlTypeId,
    pub name: String,
}

impl ControlType {
    /// Creates a control type with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A named adjustable parameter on one gear item.
///
/// Owned by its gear item: deleting the item removes its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearControl {
    pub uuid: GearControlId,
    pub name: String,
    /// Optional kind reference; `None` once the control type was removed
    /// from the catalog.
    pub control_type: Option<ControlTypeId>,
    /// Owning gear item.
    pub gear_item: GearItemId,
}

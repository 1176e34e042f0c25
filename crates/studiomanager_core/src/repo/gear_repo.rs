//! Gear repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD for gear items, their gear-type tag sets and their controls.
//! - Own the tag-set replacement logic with atomic semantics.
//!
//! # Invariants
//! - Creating or replacing a gear item writes the row and its full tag set
//!   in a single transaction.
//! - Controls belong to exactly one gear item and disappear with it.
//! - `fetch_all_gear` and `list_controls` are sorted ascending by name.

use crate::model::gear::{
    ControlTypeId, GearControl, GearControlId, GearItem, GearItemId, GearTypeId, ManufacturerId,
};
use crate::repo::{
    delete_by_uuid, ensure_connection_ready, parse_uuid, rename_by_uuid, require_valid, row_exists,
    RepoError, RepoResult,
};
use crate::validate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;

const GEAR_TABLES: &[&str] = &["gear_items", "gear_item_types", "gear_controls"];

/// Repository interface for gear items and their controls.
pub trait GearRepository {
    /// Lists all gear items sorted by name, tag sets included.
    fn fetch_all_gear(&self) -> RepoResult<Vec<GearItem>>;
    /// Gets one gear item by id.
    fn get_gear(&self, id: GearItemId) -> RepoResult<Option<GearItem>>;
    /// Creates a gear item with its tag set in one transaction.
    fn create_gear(
        &mut self,
        name: &str,
        manufacturer: Option<ManufacturerId>,
        types: &BTreeSet<GearTypeId>,
    ) -> RepoResult<GearItem>;
    /// Replaces name, manufacturer and the full tag set in place.
    fn update_gear(
        &mut self,
        id: GearItemId,
        name: &str,
        manufacturer: Option<ManufacturerId>,
        types: &BTreeSet<GearTypeId>,
    ) -> RepoResult<()>;
    /// Deletes a gear item; its controls (and settings touching it) cascade.
    fn delete_gear(&self, id: GearItemId) -> RepoResult<()>;
    /// Adds a control to an existing gear item.
    fn add_control(
        &self,
        gear_id: GearItemId,
        name: &str,
        control_type: Option<ControlTypeId>,
    ) -> RepoResult<GearControl>;
    /// Lists the controls of one gear item sorted by name.
    fn list_controls(&self, gear_id: GearItemId) -> RepoResult<Vec<GearControl>>;
    /// Renames one control.
    fn rename_control(&self, id: GearControlId, name: &str) -> RepoResult<()>;
    /// Deletes one control; settings referencing it cascade.
    fn delete_control(&self, id: GearControlId) -> RepoResult<()>;
}

/// SQLite-backed gear repository.
pub struct SqliteGearRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteGearRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, GEAR_TABLES)?;
        Ok(Self { conn })
    }
}

impl GearRepository for SqliteGearRepository<'_> {
    fn fetch_all_gear(&self) -> RepoResult<Vec<GearItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, manufacturer_uuid
             FROM gear_items
             ORDER BY name ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_gear_row(self.conn, row)?);
        }
        Ok(items)
    }

    fn get_gear(&self, id: GearItemId) -> RepoResult<Option<GearItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, manufacturer_uuid
             FROM gear_items
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_gear_row(self.conn, row)?));
        }
        Ok(None)
    }

    fn create_gear(
        &mut self,
        name: &str,
        manufacturer: Option<ManufacturerId>,
        types: &BTreeSet<GearTypeId>,
    ) -> RepoResult<GearItem> {
        require_valid(validate::validate_gear_item(name))?;

        let mut record = GearItem::new(name);
        record.manufacturer = manufacturer;
        record.types = types.clone();

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO gear_items (uuid, name, manufacturer_uuid) VALUES (?1, ?2, ?3);",
            params![
                record.uuid.to_string(),
                record.name.as_str(),
                record.manufacturer.map(|id| id.to_string()),
            ],
        )?;
        insert_type_links(&tx, record.uuid, types)?;
        tx.commit()?;

        Ok(record)
    }

    fn update_gear(
        &mut self,
        id: GearItemId,
        name: &str,
        manufacturer: Option<ManufacturerId>,
        types: &BTreeSet<GearTypeId>,
    ) -> RepoResult<()> {
        require_valid(validate::validate_gear_item(name))?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE gear_items SET name = ?2, manufacturer_uuid = ?3 WHERE uuid = ?1;",
            params![
                id.to_string(),
                name,
                manufacturer.map(|value| value.to_string()),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "gear item",
                id,
            });
        }

        tx.execute(
            "DELETE FROM gear_item_types WHERE gear_uuid = ?1;",
            [id.to_string()],
        )?;
        insert_type_links(&tx, id, types)?;
        tx.commit()?;

        Ok(())
    }

    fn delete_gear(&self, id: GearItemId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "gear_items", id)
    }

    fn add_control(
        &self,
        gear_id: GearItemId,
        name: &str,
        control_type: Option<ControlTypeId>,
    ) -> RepoResult<GearControl> {
        require_valid(validate::validate_control(name))?;

        if !row_exists(self.conn, "gear_items", gear_id)? {
            return Err(RepoError::NotFound {
                entity: "gear item",
                id: gear_id,
            });
        }

        let record = GearControl {
            uuid: GearControlId::new_v4(),
            name: name.to_string(),
            control_type,
            gear_item: gear_id,
        };
        self.conn.execute(
            "INSERT INTO gear_controls (uuid, name, control_type_uuid, gear_uuid)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                record.uuid.to_string(),
                record.name.as_str(),
                record.control_type.map(|id| id.to_string()),
                record.gear_item.to_string(),
            ],
        )?;

        Ok(record)
    }

    fn list_controls(&self, gear_id: GearItemId) -> RepoResult<Vec<GearControl>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, control_type_uuid, gear_uuid
             FROM gear_controls
             WHERE gear_uuid = ?1
             ORDER BY name ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([gear_id.to_string()])?;
        let mut controls = Vec::new();
        while let Some(row) = rows.next()? {
            controls.push(parse_control_row(row)?);
        }
        Ok(controls)
    }

    fn rename_control(&self, id: GearControlId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "control",
            "gear_controls",
            id,
            name,
            validate::validate_control(name),
        )
    }

    fn delete_control(&self, id: GearControlId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "gear_controls", id)
    }
}

fn parse_gear_row(conn: &Connection, row: &Row<'_>) -> RepoResult<GearItem> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid(&uuid_text, "gear_items.uuid")?;

    let manufacturer = match row.get::<_, Option<String>>("manufacturer_uuid")? {
        Some(value) => Some(parse_uuid(&value, "gear_items.manufacturer_uuid")?),
        None => None,
    };

    Ok(GearItem {
        uuid,
        name: row.get("name")?,
        manufacturer,
        types: load_type_links(conn, &uuid_text)?,
    })
}

fn parse_control_row(row: &Row<'_>) -> RepoResult<GearControl> {
    let uuid_text: String = row.get("uuid")?;
    let control_type = match row.get::<_, Option<String>>("control_type_uuid")? {
        Some(value) => Some(parse_uuid(&value, "gear_controls.control_type_uuid")?),
        None => None,
    };
    let gear_text: String = row.get("gear_uuid")?;

    Ok(GearControl {
        uuid: parse_uuid(&uuid_text, "gear_controls.uuid")?,
        name: row.get("name")?,
        control_type,
        gear_item: parse_uuid(&gear_text, "gear_controls.gear_uuid")?,
    })
}

fn load_type_links(conn: &Connection, gear_uuid: &str) -> RepoResult<BTreeSet<GearTypeId>> {
    let mut stmt =
        conn.prepare("SELECT type_uuid FROM gear_item_types WHERE gear_uuid = ?1;")?;
    let mut rows = stmt.query([gear_uuid])?;
    let mut types = BTreeSet::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        types.insert(parse_uuid(&value, "gear_item_types.type_uuid")?);
    }
    Ok(types)
}

fn insert_type_links(
    tx: &Transaction<'_>,
    gear_id: GearItemId,
    types: &BTreeSet<GearTypeId>,
) -> RepoResult<()> {
    for type_id in types {
        tx.execute(
            "INSERT INTO gear_item_types (gear_uuid, type_uuid) VALUES (?1, ?2);",
            params![gear_id.to_string(), type_id.to_string()],
        )?;
    }
    Ok(())
}


//! Catalog repository: manufacturers, gear types and control types.
//!
//! # Responsibility
//! - CRUD for the three flat lookup tables managed from the settings screen.
//!
//! # Invariants
//! - Deleting a manufacturer or control type nullifies references from gear
//!   items/controls; deleting a gear type only drops tag memberships.
//! - All fetches are sorted ascending by name.

use crate::model::gear::{ControlType, ControlTypeId, GearType, GearTypeId, Manufacturer, ManufacturerId};
use crate::repo::{
    delete_by_uuid, ensure_connection_ready, fetch_named_rows, rename_by_uuid, require_valid,
    RepoResult,
};
use crate::validate;
use rusqlite::{params, Connection};

/// Repository interface for the lookup-table entities.
pub trait CatalogRepository {
    fn fetch_all_manufacturers(&self) -> RepoResult<Vec<Manufacturer>>;
    fn create_manufacturer(&self, name: &str) -> RepoResult<Manufacturer>;
    fn rename_manufacturer(&self, id: ManufacturerId, name: &str) -> RepoResult<()>;
    fn delete_manufacturer(&self, id: ManufacturerId) -> RepoResult<()>;

    fn fetch_all_gear_types(&self) -> RepoResult<Vec<GearType>>;
    fn create_gear_type(&self, name: &str) -> RepoResult<GearType>;
    fn rename_gear_type(&self, id: GearTypeId, name: &str) -> RepoResult<()>;
    fn delete_gear_type(&self, id: GearTypeId) -> RepoResult<()>;

    fn fetch_all_control_types(&self) -> RepoResult<Vec<ControlType>>;
    fn create_control_type(&self, name: &str) -> RepoResult<ControlType>;
    fn rename_control_type(&self, id: ControlTypeId, name: &str) -> RepoResult<()>;
    fn delete_control_type(&self, id: ControlTypeId) -> RepoResult<()>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["manufacturers", "gear_types", "control_types"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn fetch_all_manufacturers(&self) -> RepoResult<Vec<Manufacturer>> {
        let rows = fetch_named_rows(self.conn, "manufacturers", "manufacturers.uuid")?;
        Ok(rows
            .into_iter()
            .map(|(uuid, name)| Manufacturer { uuid, name })
            .collect())
    }

    fn create_manufacturer(&self, name: &str) -> RepoResult<Manufacturer> {
        require_valid(validate::validate_manufacturer(name))?;
        let record = Manufacturer::new(name);
        self.conn.execute(
            "INSERT INTO manufacturers (uuid, name) VALUES (?1, ?2);",
            params![record.uuid.to_string(), record.name.as_str()],
        )?;
        Ok(record)
    }

    fn rename_manufacturer(&self, id: ManufacturerId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "manufacturer",
            "manufacturers",
            id,
            name,
            validate::validate_manufacturer(name),
        )
    }

    fn delete_manufacturer(&self, id: ManufacturerId) -> RepoResult<()> {
        // Gear rows keep existing with manufacturer_uuid nulled by the FK rule.
        delete_by_uuid(self.conn, "manufacturers", id)
    }

    fn fetch_all_gear_types(&self) -> RepoResult<Vec<GearType>> {
        let rows = fetch_named_rows(self.conn, "gear_types", "gear_types.uuid")?;
        Ok(rows
            .into_iter()
            .map(|(uuid, name)| GearType { uuid, name })
            .collect())
    }

    fn create_gear_type(&self, name: &str) -> RepoResult<GearType> {
        require_valid(validate::validate_gear_type(name))?;
        let record = GearType::new(name);
        self.conn.execute(
            "INSERT INTO gear_types (uuid, name) VALUES (?1, ?2);",
            params![record.uuid.to_string(), record.name.as_str()],
        )?;
        Ok(record)
    }

    fn rename_gear_type(&self, id: GearTypeId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "gear type",
            "gear_types",
            id,
            name,
            validate::validate_gear_type(name),
        )
    }

    fn delete_gear_type(&self, id: GearTypeId) -> RepoResult<()> {
        delete_by_uuid(self.conn, "gear_types", id)
    }

    fn fetch_all_control_types(&self) -> RepoResult<Vec<ControlType>> {
        let rows = fetch_named_rows(self.conn, "control_types", "control_types.uuid")?;
        Ok(rows
            .into_iter()
            .map(|(uuid, name)| ControlType { uuid, name })
            .collect())
    }

    fn create_control_type(&self, name: &str) -> RepoResult<ControlType> {
        require_valid(validate::validate_control_type(name))?;
        let record = ControlType::new(name);
        self.conn.execute(
            "INSERT INTO control_types (uuid, name) VALUES (?1, ?2);",
            params![record.uuid.to_string(), record.name.as_str()],
        )?;
        Ok(record)
    }

    fn rename_control_type(&self, id: ControlTypeId, name: &str) -> RepoResult<()> {
        rename_by_uuid(
            self.conn,
            "control type",
            "control_types",
            id,
            name,
            validate::validate_control_type(name),
        )
    }

    fn delete_control_type(&self, id: ControlTypeId) -> RepoResult<()> {
        // Controls keep existing with control_type_uuid nulled by the FK rule.
        delete_by_uuid(self.conn, "control_types", id)
    }
}

//! Domain records for the studio inventory.
//!
//! # Responsibility
//! - Define the persisted record shapes shared by repositories and callers.
//! - Keep relationship fields explicit: optional references are `Option`,
//!   set-valued relations are id sets with defined uniqueness.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated at creation.
//! - Records carry foreign ids, never embedded child records; children are
//!   loaded through their owning repository.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod gear;
pub mod preset;

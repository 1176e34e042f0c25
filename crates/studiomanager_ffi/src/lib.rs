//! Flutter-facing bindings for the StudioManager core crate.

pub mod api;

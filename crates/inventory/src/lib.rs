//! Inventory domain module.
//!
//! This crate contains business rules for the inventory store, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod store;

pub use store::{Inventory, InventoryEvent};

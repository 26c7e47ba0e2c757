//! Products domain module.
//!
//! This crate contains the product model: a closed set of product kinds over
//! a shared base attribute set, implemented purely as deterministic domain
//! logic (no IO, no clock reads, no storage).

pub mod product;

pub use product::{Product, ProductKind};

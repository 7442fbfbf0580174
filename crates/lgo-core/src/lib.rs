//! # lgo-core
//!
//! Core types and error types for LichensGo.
//!
//! This crate provides the foundational types shared across all LichensGo crates:
//! - Entity structs for the survey tables (observations, trees, quadrants, sightings, species)
//! - Ecological trait enums parsed from the reference vocabulary
//! - The canonical square representation (`OrientationSet`) and its input adapter
//! - Ordinal categories for every bucketed index
//! - The `Degree` sum type separating "ratio 0" from "no data"
//! - Derived record types consumed by charts, tables, and exports
//! - The [`source::SnapshotSource`] seam and the flat [`export::ExportTable`]

pub mod categories;
pub mod degree;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod orientation;
pub mod records;
pub mod source;

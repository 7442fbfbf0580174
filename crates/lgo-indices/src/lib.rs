//! # lgo-indices
//!
//! The ecological index pipeline for LichensGo.
//!
//! Data flows one way, from a [`Snapshot`](lgo_core::entities::Snapshot)
//! of the survey tables to a [`Dataset`] holding every derived table:
//!
//! ```text
//! quadrants -> orientation counts -> merged with sightings/observations
//!           -> richness, VDL, pollution degrees -> observation summaries
//!           -> per-sighting, per-species, per-thallus aggregates
//! ```
//!
//! Each stage is a pure function over slices, so building twice from the
//! same snapshot yields identical datasets. [`SnapshotCache`] adds a TTL
//! around any [`SnapshotSource`](lgo_core::source::SnapshotSource).

pub mod aggregates;
pub mod cache;
pub mod dataset;
pub mod degrees;
pub mod error;
pub mod export;
pub mod merge;
pub mod orientation;
pub mod richness;
pub mod vdl;

pub use cache::{DEFAULT_TTL, SnapshotCache};
pub use dataset::{Dataset, IndexSettings, ObservationFilter, SpeciesOption};
pub use error::IndexError;
pub use export::ExportField;

//! Entity structs for the LichensGo survey tables.
//!
//! Each entity maps to a table in the DuckDB store (see `lgo-store`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod ecology;
mod observation;
mod quadrant;
mod sighting;
mod snapshot;
mod species;
mod tree;

pub use ecology::EcologyRecord;
pub use observation::Observation;
pub use quadrant::QuadrantRecord;
pub use sighting::LichenSighting;
pub use snapshot::Snapshot;
pub use species::{EcologicalTraits, LichenSpecies};
pub use tree::Tree;

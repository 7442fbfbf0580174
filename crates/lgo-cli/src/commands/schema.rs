use anyhow::bail;
use lgo_core::entities::{
    EcologyRecord, LichenSighting, LichenSpecies, Observation, QuadrantRecord, Snapshot, Tree,
};
use lgo_core::export::ExportTable;
use lgo_core::records::{
    MergedQuadrant, ObservationDetail, ObservationSummary, QuadrantCount, SightingCount,
    SpeciesCount, SpeciesDetail, SpeciesPresence, ThallusSlice,
};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `lgo schema`.
pub const TYPE_NAMES: [&str; 17] = [
    "observation",
    "tree",
    "lichen_sighting",
    "lichen_species",
    "quadrant_record",
    "ecology_record",
    "snapshot",
    "quadrant_count",
    "merged_quadrant",
    "observation_summary",
    "sighting_count",
    "species_count",
    "thallus_slice",
    "species_presence",
    "observation_detail",
    "species_detail",
    "export_table",
];

/// JSON Schema of a registered type, by snake_case name.
#[must_use]
pub fn schema_by_name(name: &str) -> Option<Schema> {
    let schema = match name {
        "observation" => schema_for!(Observation),
        "tree" => schema_for!(Tree),
        "lichen_sighting" => schema_for!(LichenSighting),
        "lichen_species" => schema_for!(LichenSpecies),
        "quadrant_record" => schema_for!(QuadrantRecord),
        "ecology_record" => schema_for!(EcologyRecord),
        "snapshot" => schema_for!(Snapshot),
        "quadrant_count" => schema_for!(QuadrantCount),
        "merged_quadrant" => schema_for!(MergedQuadrant),
        "observation_summary" => schema_for!(ObservationSummary),
        "sighting_count" => schema_for!(SightingCount),
        "species_count" => schema_for!(SpeciesCount),
        "thallus_slice" => schema_for!(ThallusSlice),
        "species_presence" => schema_for!(SpeciesPresence),
        "observation_detail" => schema_for!(ObservationDetail),
        "species_detail" => schema_for!(SpeciesDetail),
        "export_table" => schema_for!(ExportTable),
        _ => return None,
    };
    Some(schema)
}

/// Handle `lgo schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = args.type_name.replace('-', "_");
    let Some(schema) = schema_by_name(&name) else {
        bail!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)
}

//! Serde roundtrip and JsonSchema validation tests for entity and record types.

use chrono::NaiveDate;
use lgo_core::categories::{DegreeCategory, SpeciesCountCategory, VdlCategory};
use lgo_core::degree::Degree;
use lgo_core::entities::*;
use lgo_core::enums::*;
use lgo_core::orientation::OrientationSet;
use lgo_core::records::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn crustose_traits() -> EcologicalTraits {
    EcologicalTraits {
        ph: Some(PhTolerance::Acidophilous),
        eutrophication: Some(EutrophicationTolerance::Other("hypertrophic".into())),
        poleotolerance: Some(Poleotolerance::Resistant),
        thallus: Some(Thallus::Crustose),
        rarity: None,
    }
}

roundtrip_and_validate!(
    observation_roundtrip,
    Observation,
    Observation {
        id: 42,
        date: date(2024, 5, 17),
        lat: 48.5,
        lon: 2.25,
        user_id: Some(7),
    }
);

roundtrip_and_validate!(
    quadrant_roundtrip,
    QuadrantRecord,
    QuadrantRecord {
        id: 1,
        lichen_id: Some(10),
        tree_id: None,
        squares: [
            OrientationSet::parse("N").unwrap(),
            OrientationSet::parse("NE").unwrap(),
            OrientationSet::parse("S").unwrap(),
            OrientationSet::EMPTY,
            OrientationSet::EMPTY,
        ],
    }
);

roundtrip_and_validate!(
    species_roundtrip,
    LichenSpecies,
    LichenSpecies {
        id: 3,
        name: "Autre lichen crustacé".into(),
        name_en: Some("Other crustose lichen".into()),
        name_fr: Some("Autre lichen crustacé".into()),
        unique: false,
        traits: crustose_traits(),
    }
);

roundtrip_and_validate!(
    ecology_roundtrip,
    EcologyRecord,
    EcologyRecord {
        name: "Lecanora chlarotera".into(),
        traits: crustose_traits(),
    }
);

roundtrip_and_validate!(
    summary_roundtrip,
    ObservationSummary,
    ObservationSummary {
        observation_id: 42,
        date: date(2024, 5, 17),
        lat: 45.0,
        lon: 4.5,
        user_id: None,
        nb_species: 8,
        nb_species_cat: SpeciesCountCategory::From7To10,
        nb_lichen: 12,
        vdl: 12.5,
        vdl_cat: VdlCategory::Under25,
        deg_toxitolerance: Degree::Value(0.75),
        deg_toxitolerance_cat: Some(DegreeCategory::From50To75),
        deg_acidity: Degree::Undefined,
        deg_acidity_cat: None,
        deg_eutrophication: Degree::Value(0.0),
        deg_eutrophication_cat: Some(DegreeCategory::UpTo25),
    }
);

roundtrip_and_validate!(
    sighting_count_roundtrip,
    SightingCount,
    SightingCount {
        lichen_id: 5,
        observation_id: Some(42),
        species_id: Some(3),
        name: Some("Autre lichen crustacé".into()),
        unique: false,
        counts: OrientationCounts::new(3, 2, 1, 1),
        nb_lichen_ratio: 0.125,
        unique_name: Some("Autre lichen crustacé 1".into()),
    }
);

roundtrip_and_validate!(
    thallus_slice_roundtrip,
    ThallusSlice,
    ThallusSlice {
        observation_id: 42,
        thallus: Thallus::Foliose,
        nb_lichen: 9,
        nb_lichen_id: 2,
    }
);

roundtrip_and_validate!(
    species_count_roundtrip,
    SpeciesCount,
    SpeciesCount {
        species_id: 3,
        name: "Xanthoria parietina".into(),
        count: 18,
    }
);

#[test]
fn summary_uses_dashboard_column_names() {
    let summary = ObservationSummary {
        observation_id: 1,
        date: date(2023, 1, 2),
        lat: 0.0,
        lon: 0.0,
        user_id: None,
        nb_species: 0,
        nb_species_cat: SpeciesCountCategory::Under7,
        nb_lichen: 0,
        vdl: 0.0,
        vdl_cat: VdlCategory::Under25,
        deg_toxitolerance: Degree::Undefined,
        deg_toxitolerance_cat: None,
        deg_acidity: Degree::Undefined,
        deg_acidity_cat: None,
        deg_eutrophication: Degree::Undefined,
        deg_eutrophication_cat: None,
    };
    let value = serde_json::to_value(&summary).unwrap();
    assert!(value.get("VDL").is_some());
    assert_eq!(value["VDL_cat"], "< 25");
    assert!(value["deg_toxitolerance"].is_null());
    assert_eq!(value["nb_species_cat"], "< 7");
}

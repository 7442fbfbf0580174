//! Shared survey fixture for the pipeline tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use lgo_core::entities::{
    EcologicalTraits, LichenSighting, LichenSpecies, Observation, QuadrantRecord, Snapshot,
};
use lgo_core::enums::{EutrophicationTolerance, PhTolerance, Poleotolerance, Thallus};
use lgo_core::orientation::OrientationSet;

pub const GENERIC: &str = "Autre lichen crustacé";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A quadrant grid holding exactly `total` orientation marks.
pub fn grid(id: i64, lichen_id: i64, tree_id: i64, total: u32) -> QuadrantRecord {
    let mut remaining = total;
    let squares = std::array::from_fn(|_| {
        let take = remaining.min(4) as usize;
        remaining -= take as u32;
        OrientationSet::parse(&"NESO"[..take]).unwrap()
    });
    QuadrantRecord {
        id,
        lichen_id: Some(lichen_id),
        tree_id: Some(tree_id),
        squares,
    }
}

fn species(
    id: i64,
    name: &str,
    name_fr: Option<&str>,
    name_en: Option<&str>,
    unique: bool,
    traits: EcologicalTraits,
) -> LichenSpecies {
    LichenSpecies {
        id,
        name: name.into(),
        name_en: name_en.map(Into::into),
        name_fr: name_fr.map(Into::into),
        unique,
        traits,
    }
}

fn sighting(id: i64, species_id: i64, observation_id: i64) -> LichenSighting {
    LichenSighting {
        id,
        species_id: Some(species_id),
        observation_id,
    }
}

/// Three observations:
/// - 1: Xanthoria (5), two generic crustose (3, 2), Parmelia (2)
/// - 2: three generic crustose (4, 7, 2)
/// - 3: nothing sighted
pub fn survey() -> Snapshot {
    let observations = vec![
        Observation {
            id: 1,
            date: date(2024, 5, 17),
            lat: 48.5,
            lon: 2.25,
            user_id: Some(7),
        },
        Observation {
            id: 2,
            date: date(2024, 6, 1),
            lat: 45.0,
            lon: 4.5,
            user_id: Some(8),
        },
        Observation {
            id: 3,
            date: date(2023, 3, 10),
            lat: 43.5,
            lon: 1.5,
            user_id: None,
        },
    ];

    let species = vec![
        species(
            1,
            "Xanthoria parietina",
            Some("Xanthorie des murailles"),
            Some("Common orange lichen"),
            true,
            EcologicalTraits {
                poleotolerance: Some(Poleotolerance::Resistant),
                eutrophication: Some(EutrophicationTolerance::Eutrophic),
                thallus: Some(Thallus::Foliose),
                ..EcologicalTraits::default()
            },
        ),
        species(
            2,
            "Parmelia sulcata",
            Some("Parmélie sillonnée"),
            Some("Hammered shield lichen"),
            true,
            EcologicalTraits {
                poleotolerance: Some(Poleotolerance::Sensitive),
                ph: Some(PhTolerance::Acidophilous),
                thallus: Some(Thallus::Foliose),
                ..EcologicalTraits::default()
            },
        ),
        species(
            3,
            GENERIC,
            Some(GENERIC),
            Some("Other crustose lichen"),
            false,
            EcologicalTraits {
                poleotolerance: Some(Poleotolerance::Resistant),
                thallus: Some(Thallus::Crustose),
                ..EcologicalTraits::default()
            },
        ),
        species(
            4,
            "Physcia adscendens",
            None,
            None,
            true,
            EcologicalTraits::default(),
        ),
    ];

    let sightings = vec![
        sighting(10, 1, 1),
        sighting(11, 3, 1),
        sighting(12, 3, 1),
        sighting(13, 2, 1),
        sighting(20, 3, 2),
        sighting(21, 3, 2),
        sighting(22, 3, 2),
    ];

    let quadrants = vec![
        grid(1, 10, 100, 5),
        grid(2, 11, 100, 3),
        grid(3, 12, 101, 2),
        grid(4, 13, 102, 2),
        grid(5, 20, 200, 4),
        grid(6, 21, 200, 7),
        grid(7, 22, 201, 2),
    ];

    Snapshot {
        observations,
        trees: Vec::new(),
        sightings,
        species,
        quadrants,
        missing_ecology: vec!["Physcia adscendens".into()],
    }
}

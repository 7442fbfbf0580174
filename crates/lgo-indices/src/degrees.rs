//! Pollution degrees: share of lichen carried by species with a trait.

use std::collections::{BTreeMap, HashMap};

use lgo_core::degree::Degree;
use lgo_core::entities::{EcologicalTraits, LichenSpecies};
use lgo_core::enums::{EutrophicationTolerance, PhTolerance, Poleotolerance};
use lgo_core::records::MergedQuadrant;

/// The three degree indices and the trait each one tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeKind {
    /// Poleotolerance `resistant`.
    Toxitolerance,
    /// pH `acidophilous`.
    Acidity,
    /// Eutrophication `eutrophic`.
    Eutrophication,
}

impl DegreeKind {
    pub const ALL: [Self; 3] = [Self::Toxitolerance, Self::Acidity, Self::Eutrophication];

    #[must_use]
    pub fn matches(self, traits: &EcologicalTraits) -> bool {
        match self {
            Self::Toxitolerance => traits.poleotolerance == Some(Poleotolerance::Resistant),
            Self::Acidity => traits.ph == Some(PhTolerance::Acidophilous),
            Self::Eutrophication => {
                traits.eutrophication == Some(EutrophicationTolerance::Eutrophic)
            }
        }
    }

    /// Column name in summaries.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Toxitolerance => "deg_toxitolerance",
            Self::Acidity => "deg_acidity",
            Self::Eutrophication => "deg_eutrophication",
        }
    }
}

/// Degrees of one observation, plus the lichen total they are relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationDegrees {
    pub nb_lichen: u32,
    pub toxitolerance: Degree,
    pub acidity: Degree,
    pub eutrophication: Degree,
}

impl Default for ObservationDegrees {
    fn default() -> Self {
        Self {
            nb_lichen: 0,
            toxitolerance: Degree::Undefined,
            acidity: Degree::Undefined,
            eutrophication: Degree::Undefined,
        }
    }
}

impl ObservationDegrees {
    #[must_use]
    pub const fn get(&self, kind: DegreeKind) -> Degree {
        match kind {
            DegreeKind::Toxitolerance => self.toxitolerance,
            DegreeKind::Acidity => self.acidity,
            DegreeKind::Eutrophication => self.eutrophication,
        }
    }
}

#[derive(Default)]
struct Tally {
    total: u32,
    matching: [u32; 3],
}

/// Degrees per observation.
///
/// Species with missing traits (or sightings with no species) count in the
/// denominator only. An observation whose lichen total is zero gets
/// [`Degree::Undefined`] for all three degrees.
#[must_use]
pub fn pollution_degrees(
    merged: &[MergedQuadrant],
    species: &[LichenSpecies],
) -> BTreeMap<i64, ObservationDegrees> {
    let traits_by_id: HashMap<i64, &EcologicalTraits> =
        species.iter().map(|s| (s.id, &s.traits)).collect();

    let mut tallies: BTreeMap<i64, Tally> = BTreeMap::new();
    for row in merged {
        let Some(observation_id) = row.observation_id else {
            continue;
        };
        let tally = tallies.entry(observation_id).or_default();
        let nb_lichen = row.counts.total();
        tally.total += nb_lichen;

        let traits = row.species_id.and_then(|id| traits_by_id.get(&id).copied());
        if let Some(traits) = traits {
            for (i, kind) in DegreeKind::ALL.into_iter().enumerate() {
                if kind.matches(traits) {
                    tally.matching[i] += nb_lichen;
                }
            }
        }
    }

    tallies
        .into_iter()
        .map(|(observation_id, tally)| {
            let [toxitolerance, acidity, eutrophication] =
                tally.matching.map(|n| Degree::ratio(n, tally.total));
            (
                observation_id,
                ObservationDegrees {
                    nb_lichen: tally.total,
                    toxitolerance,
                    acidity,
                    eutrophication,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lgo_core::categories::DegreeCategory;
    use lgo_core::records::OrientationCounts;
    use pretty_assertions::assert_eq;

    use super::*;

    fn species(id: i64, poleotolerance: Option<&str>, ph: Option<&str>) -> LichenSpecies {
        LichenSpecies {
            id,
            name: format!("species {id}"),
            name_en: None,
            name_fr: None,
            unique: true,
            traits: EcologicalTraits {
                poleotolerance: poleotolerance.and_then(Poleotolerance::parse),
                ph: ph.and_then(PhTolerance::parse),
                ..EcologicalTraits::default()
            },
        }
    }

    fn row(observation_id: i64, species_id: Option<i64>, total: u32) -> MergedQuadrant {
        MergedQuadrant {
            quadrant_id: 0,
            lichen_id: None,
            tree_id: None,
            species_id,
            observation_id: Some(observation_id),
            date: None,
            user_id: None,
            counts: OrientationCounts::new(total, 0, 0, 0),
        }
    }

    #[test]
    fn resistant_share_of_twelve() {
        let species = [
            species(1, Some("resistant"), None),
            species(2, Some("resistant"), None),
            species(3, Some("resistant"), None),
            species(4, Some("sensitive"), None),
        ];
        let merged = [
            row(1, Some(1), 5),
            row(1, Some(2), 3),
            row(1, Some(3), 2),
            row(1, Some(4), 2),
        ];
        let degrees = pollution_degrees(&merged, &species)[&1];
        let value = degrees.toxitolerance.value().unwrap();
        assert!((value - 10.0 / 12.0).abs() < 1e-9);
        assert_eq!(
            degrees.toxitolerance.category(),
            Some(DegreeCategory::From75To100)
        );
        assert_eq!(degrees.acidity, Degree::Value(0.0));
        assert_eq!(degrees.nb_lichen, 12);
    }

    #[test]
    fn missing_traits_only_grow_the_denominator() {
        let species = [species(1, None, Some("acidophilous")), species(2, None, None)];
        let merged = [row(1, Some(1), 1), row(1, Some(2), 1), row(1, None, 2)];
        let degrees = pollution_degrees(&merged, &species)[&1];
        assert_eq!(degrees.acidity, Degree::Value(0.25));
    }

    #[test]
    fn zero_lichen_is_undefined() {
        let species = [species(1, Some("resistant"), None)];
        let degrees = pollution_degrees(&[row(1, Some(1), 0)], &species)[&1];
        for kind in DegreeKind::ALL {
            assert_eq!(degrees.get(kind), Degree::Undefined, "{}", kind.column());
        }
    }

    #[test]
    fn defined_degrees_stay_in_unit_interval() {
        let species = [species(1, Some("resistant"), Some("acidophilous"))];
        for total in 0..25 {
            let degrees = pollution_degrees(&[row(1, Some(1), total), row(1, None, 3)], &species);
            for kind in DegreeKind::ALL {
                if let Some(value) = degrees[&1].get(kind).value() {
                    assert!((0.0..=1.0).contains(&value));
                }
            }
        }
    }
}

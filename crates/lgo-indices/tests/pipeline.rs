//! Dataset-level behavior over a small survey.

mod common;

use common::{GENERIC, date, survey};
use lgo_core::categories::{DegreeCategory, SpeciesCountCategory, VdlCategory};
use lgo_core::degree::Degree;
use lgo_core::enums::{Language, Thallus};
use lgo_core::records::ObservationSummary;
use lgo_indices::{Dataset, IndexSettings, ObservationFilter};
use pretty_assertions::assert_eq;

fn ids(rows: &[&ObservationSummary]) -> Vec<i64> {
    rows.iter().map(|s| s.observation_id).collect()
}

fn dataset() -> Dataset {
    Dataset::build(survey(), &IndexSettings::default()).expect("dataset builds")
}

#[test]
fn summaries_carry_every_index() {
    let dataset = dataset();
    let first = &dataset.observations()[0];

    assert_eq!(first.observation_id, 1);
    // Xanthoria, Parmelia, and two separate generic sightings.
    assert_eq!(first.nb_species, 4);
    assert_eq!(first.nb_species_cat, SpeciesCountCategory::Under7);
    assert_eq!(first.nb_lichen, 12);
    assert!((first.vdl - 12.0).abs() < 1e-9);
    assert_eq!(first.vdl_cat, VdlCategory::Under25);

    let toxitolerance = first.deg_toxitolerance.value().unwrap();
    assert!((toxitolerance - 10.0 / 12.0).abs() < 1e-9);
    assert_eq!(
        first.deg_toxitolerance_cat,
        Some(DegreeCategory::From75To100)
    );
    assert_eq!(first.deg_acidity, Degree::Value(2.0 / 12.0));
    assert_eq!(first.deg_eutrophication, Degree::Value(5.0 / 12.0));
    assert_eq!(
        first.deg_eutrophication_cat,
        Some(DegreeCategory::From25To50)
    );
}

#[test]
fn empty_observation_has_zero_indices_and_undefined_degrees() {
    let dataset = dataset();
    let empty = dataset
        .observations()
        .iter()
        .find(|s| s.observation_id == 3)
        .unwrap();

    assert_eq!(empty.nb_species, 0);
    assert_eq!(empty.nb_lichen, 0);
    assert!(empty.vdl.abs() < f64::EPSILON);
    assert_eq!(empty.vdl_cat, VdlCategory::Under25);
    assert_eq!(empty.deg_toxitolerance, Degree::Undefined);
    assert_eq!(empty.deg_acidity_cat, None);

    let json = serde_json::to_value(empty).unwrap();
    assert!(json["deg_eutrophication"].is_null());
    assert!(json["deg_eutrophication_cat"].is_null());
}

#[test]
fn building_twice_is_identical() {
    assert_eq!(dataset(), dataset());
}

#[test]
fn vdl_divisor_applies() {
    let settings = IndexSettings {
        vdl_divisor: 3.0,
        ..IndexSettings::default()
    };
    let dataset = Dataset::build(survey(), &settings).unwrap();
    assert!((dataset.observations()[0].vdl - 4.0).abs() < 1e-9);
}

#[test]
fn non_positive_divisor_is_rejected() {
    let settings = IndexSettings {
        vdl_divisor: 0.0,
        ..IndexSettings::default()
    };
    assert!(Dataset::build(survey(), &settings).is_err());
}

#[test]
fn generic_sightings_get_ranked_names() {
    let detail = dataset().drill_down(2).unwrap();
    let mut names: Vec<(u32, String)> = detail
        .sightings
        .iter()
        .map(|s| (s.counts.total(), s.unique_name.clone().unwrap()))
        .collect();
    names.sort_by(|a, b| b.0.cmp(&a.0));
    assert_eq!(
        names,
        vec![
            (7, format!("{GENERIC} 1")),
            (4, format!("{GENERIC} 2")),
            (2, format!("{GENERIC} 3")),
        ]
    );
}

#[test]
fn drill_down_includes_thallus_slices() {
    let detail = dataset().drill_down(1).unwrap();
    assert_eq!(detail.summary.observation_id, 1);
    assert_eq!(detail.sightings.len(), 4);

    let foliose = detail
        .thallus
        .iter()
        .find(|t| t.thallus == Thallus::Foliose)
        .unwrap();
    assert_eq!((foliose.nb_lichen, foliose.nb_lichen_id), (7, 2));
    let crustose = detail
        .thallus
        .iter()
        .find(|t| t.thallus == Thallus::Crustose)
        .unwrap();
    assert_eq!((crustose.nb_lichen, crustose.nb_lichen_id), (5, 2));
}

#[test]
fn unknown_selectors_are_none() {
    let dataset = dataset();
    assert!(dataset.drill_down(404).is_none());
    assert!(dataset.species_detail(404).is_none());
    assert!(dataset.observation_at(0.0, 0.0, 1e-6).is_none());
}

#[test]
fn map_click_finds_nearest_within_tolerance() {
    let dataset = dataset();
    let hit = dataset.observation_at(48.500_000_1, 2.25, 1e-6).unwrap();
    assert_eq!(hit.observation_id, 1);
    let wide = dataset.observation_at(44.8, 4.0, 1.0).unwrap();
    assert_eq!(wide.observation_id, 2);
}

#[test]
fn filters_by_date_and_user() {
    let dataset = dataset();

    assert_eq!(
        ids(&dataset.filter_by_date(date(2024, 1, 1), date(2024, 5, 17))),
        vec![1]
    );
    assert_eq!(ids(&dataset.filter_by_user(8)), vec![2]);
    assert_eq!(
        ids(&dataset.filter(&ObservationFilter {
            from: Some(date(2024, 1, 1)),
            to: None,
            user_id: Some(7),
        })),
        vec![1]
    );
    assert_eq!(
        dataset.date_bounds(),
        Some((date(2023, 3, 10), date(2024, 6, 1)))
    );
}

#[test]
fn species_ranking_and_presence() {
    let dataset = dataset();
    let ranking: Vec<(i64, u32)> = dataset
        .species_ranking()
        .iter()
        .map(|c| (c.species_id, c.count))
        .collect();
    assert_eq!(ranking, vec![(3, 5), (1, 1), (2, 1)]);

    let detail = dataset.species_detail(2).unwrap();
    assert_eq!(detail.count, 1);
    let present: Vec<i64> = detail
        .presence
        .iter()
        .filter(|p| p.selected_species_present)
        .map(|p| p.observation_id)
        .collect();
    assert_eq!(present, vec![1]);
    assert_eq!(detail.presence.len(), 3);

    // Known species never sighted: listed with a zero count.
    assert_eq!(dataset.species_detail(4).unwrap().count, 0);
}

#[test]
fn species_options_sorted_by_localized_name() {
    let names: Vec<String> = dataset()
        .species_options(Language::En)
        .into_iter()
        .map(|o| o.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Common orange lichen",
            "Hammered shield lichen",
            "Other crustose lichen",
            "Physcia adscendens",
        ]
    );
}

#[test]
fn missing_ecology_is_carried() {
    assert_eq!(dataset().missing_ecology(), ["Physcia adscendens".to_string()]);
}

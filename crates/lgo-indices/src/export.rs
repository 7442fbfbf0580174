//! Flat per-observation export with localized headers.

use std::collections::{BTreeMap, HashSet};

use lgo_core::degree::Degree;
use lgo_core::enums::Language;
use lgo_core::export::{ColumnKind, ExportColumn, ExportTable, ExportValue};

use crate::dataset::Dataset;

/// Fixed columns preceding the species columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    ObservationId,
    Date,
    Latitude,
    Longitude,
    SpeciesCount,
    Vdl,
    Toxitolerance,
    Eutrophication,
    Acidity,
}

impl ExportField {
    pub const ALL: [Self; 9] = [
        Self::ObservationId,
        Self::Date,
        Self::Latitude,
        Self::Longitude,
        Self::SpeciesCount,
        Self::Vdl,
        Self::Toxitolerance,
        Self::Eutrophication,
        Self::Acidity,
    ];

    #[must_use]
    pub const fn header(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::ObservationId, Language::Fr) => "ID observation",
            (Self::ObservationId, Language::En) => "Observation ID",
            (Self::Date, _) => "Date",
            (Self::Latitude, _) => "Latitude",
            (Self::Longitude, _) => "Longitude",
            (Self::SpeciesCount, Language::Fr) => "Nombre d'espèces",
            (Self::SpeciesCount, Language::En) => "Number of species",
            (Self::Vdl, _) => "VDL",
            (Self::Toxitolerance, Language::Fr) => "Degré de toxitolérance",
            (Self::Toxitolerance, Language::En) => "Toxitolerance degree",
            (Self::Eutrophication, Language::Fr) => "Degré d'eutrophisation",
            (Self::Eutrophication, Language::En) => "Eutrophication degree",
            (Self::Acidity, Language::Fr) => "Degré d'acidité",
            (Self::Acidity, Language::En) => "Acidity degree",
        }
    }

    const fn kind(self) -> ColumnKind {
        match self {
            Self::ObservationId | Self::SpeciesCount => ColumnKind::Integer,
            Self::Date => ColumnKind::Text,
            _ => ColumnKind::Float,
        }
    }
}

fn degree_cell(degree: Degree) -> ExportValue {
    degree.value().map_or(ExportValue::Empty, ExportValue::Float)
}

/// Pick a header not yet in `taken` (compared lower-cased) and claim it.
///
/// The plain name is preferred; a shared or taken name gets ` ({id})`, then
/// a ` #n` counter if that is taken too.
fn unique_header(taken: &mut HashSet<String>, name: &str, id: i64, shared: bool) -> String {
    let with_id = format!("{name} ({id})");
    let mut header = if shared || taken.contains(&name.to_lowercase()) {
        with_id.clone()
    } else {
        name.to_string()
    };
    let mut counter = 2;
    while taken.contains(&header.to_lowercase()) {
        header = format!("{with_id} #{counter}");
        counter += 1;
    }
    taken.insert(header.to_lowercase());
    header
}

impl Dataset {
    /// Build the download table.
    ///
    /// One row per observation with at least one sighting, sorted by id.
    /// Dates are `dd/mm/YYYY`; undefined degrees are empty cells. Every
    /// species follows as a column of sighting counts, ordered by localized
    /// name; species sharing a localized name get their id appended.
    /// Headers are unique ignoring case, so the table loads as SQL columns.
    #[must_use]
    pub fn export_table(&self, lang: Language) -> ExportTable {
        let mut species_columns: Vec<(String, i64)> = self
            .snapshot()
            .species
            .iter()
            .map(|s| (s.display_name(lang).to_string(), s.id))
            .collect();
        species_columns.sort();

        let mut name_uses: BTreeMap<&str, usize> = BTreeMap::new();
        for (name, _) in &species_columns {
            *name_uses.entry(name.as_str()).or_default() += 1;
        }
        let mut taken: HashSet<String> = ExportField::ALL
            .iter()
            .map(|field| field.header(lang).to_lowercase())
            .collect();
        let species_headers: Vec<String> = species_columns
            .iter()
            .map(|(name, id)| {
                let shared = name_uses.get(name.as_str()).copied().unwrap_or(0) > 1;
                unique_header(&mut taken, name, *id, shared)
            })
            .collect();

        let mut columns: Vec<ExportColumn> = ExportField::ALL
            .iter()
            .map(|field| ExportColumn {
                header: field.header(lang).to_string(),
                kind: field.kind(),
            })
            .collect();
        columns.extend(species_headers.into_iter().map(|header| ExportColumn {
            header,
            kind: ColumnKind::Integer,
        }));

        let pivot = self.species_pivot();
        let rows = self
            .observations()
            .iter()
            .filter_map(|summary| {
                let per_species = pivot.get(&summary.observation_id)?;
                let mut row = vec![
                    ExportValue::Integer(summary.observation_id),
                    ExportValue::Text(summary.date.format("%d/%m/%Y").to_string()),
                    ExportValue::Float(summary.lat),
                    ExportValue::Float(summary.lon),
                    ExportValue::Integer(i64::from(summary.nb_species)),
                    ExportValue::Float(summary.vdl),
                    degree_cell(summary.deg_toxitolerance),
                    degree_cell(summary.deg_eutrophication),
                    degree_cell(summary.deg_acidity),
                ];
                row.extend(species_columns.iter().map(|(_, species_id)| {
                    ExportValue::Integer(i64::from(
                        per_species.get(species_id).copied().unwrap_or(0),
                    ))
                }));
                Some(row)
            })
            .collect();

        ExportTable { columns, rows }
    }
}

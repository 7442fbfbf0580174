use lgo_core::enums::Language;
use lgo_core::records::SpeciesDetail;
use lgo_indices::Dataset;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SpeciesArgs;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RankedSpecies {
    rank: usize,
    species_id: i64,
    name: String,
    sightings: u32,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SpeciesResponse {
    Detail(Box<SpeciesDetail>),
    Unknown { species_id: i64, message: String },
}

/// Handle `lgo species`.
pub fn handle(args: &SpeciesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = ctx.dataset()?;
    let lang = flags.language(&ctx.config);

    if let Some(species_id) = args.id {
        return output(&detail(&dataset, species_id), flags.format);
    }

    if args.all {
        return output(&dataset.species_options(lang), flags.format);
    }

    let mut rows = ranking(&dataset, lang);
    truncate(
        &mut rows,
        effective_limit(flags.limit, ctx.config.general.default_limit),
    );
    output(&rows, flags.format)
}

fn ranking(dataset: &Dataset, lang: Language) -> Vec<RankedSpecies> {
    dataset
        .species_ranking()
        .iter()
        .enumerate()
        .map(|(index, count)| RankedSpecies {
            rank: index + 1,
            species_id: count.species_id,
            name: dataset
                .species(count.species_id)
                .map_or_else(|| count.name.clone(), |s| s.display_name(lang).to_string()),
            sightings: count.count,
        })
        .collect()
}

fn detail(dataset: &Dataset, species_id: i64) -> SpeciesResponse {
    dataset.species_detail(species_id).map_or_else(
        || SpeciesResponse::Unknown {
            species_id,
            message: format!("no species with id {species_id}"),
        },
        |detail| SpeciesResponse::Detail(Box::new(detail)),
    )
}

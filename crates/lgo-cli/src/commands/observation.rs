use lgo_core::enums::Language;
use lgo_core::records::ObservationDetail;
use lgo_indices::Dataset;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ObservationArgs;
use crate::context::AppContext;
use crate::output::output;

/// Either the drill-down of the selected observation or the text shown
/// while nothing is selected.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ObservationResponse {
    Selected(Box<ObservationDetail>),
    Placeholder { message: &'static str },
}

const fn placeholder_message(lang: Language) -> &'static str {
    match lang {
        Language::Fr => "Sélectionnez un site sur la carte pour comprendre ce qu'il s'y passe.",
        Language::En => "Select a site on the map to understand what is happening there.",
    }
}

/// Handle `lgo observation`.
pub fn handle(args: &ObservationArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = ctx.dataset()?;
    let response = select(
        &dataset,
        args,
        ctx.config.indices.click_tolerance,
        flags.language(&ctx.config),
    );
    output(&response, flags.format)
}

fn select(
    dataset: &Dataset,
    args: &ObservationArgs,
    tolerance: f64,
    lang: Language,
) -> ObservationResponse {
    let observation_id = match (args.id, args.lat, args.lon) {
        (Some(id), _, _) => Some(id),
        (None, Some(lat), Some(lon)) => dataset
            .observation_at(lat, lon, tolerance)
            .map(|summary| summary.observation_id),
        _ => None,
    };

    match observation_id.and_then(|id| dataset.drill_down(id)) {
        Some(detail) => ObservationResponse::Selected(Box::new(detail)),
        None => {
            tracing::debug!(?args, "no observation selected");
            ObservationResponse::Placeholder {
                message: placeholder_message(lang),
            }
        }
    }
}

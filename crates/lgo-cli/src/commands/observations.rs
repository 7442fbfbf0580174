use lgo_indices::ObservationFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ObservationsArgs;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::context::AppContext;
use crate::output::output;

/// Handle `lgo observations`.
pub fn handle(args: &ObservationsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            anyhow::bail!("--from {from} is after --to {to}");
        }
    }

    let dataset = ctx.dataset()?;
    let mut rows = dataset.filter(&ObservationFilter {
        from: args.from,
        to: args.to,
        user_id: args.user,
    });
    truncate(
        &mut rows,
        effective_limit(flags.limit, ctx.config.general.default_limit),
    );

    output(&rows, flags.format)
}

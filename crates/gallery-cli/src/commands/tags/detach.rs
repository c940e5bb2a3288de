//! Detach tag command handler.

use crate::app::AppContext;
use crate::cli::TagPairArgs;
use crate::helpers::{parse_item_id, with_not_found_hint};
use crate::ui::{badge, print, short_id, Badge};

pub fn handle_tag_detach(ctx: &AppContext, args: &TagPairArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let id = parse_item_id(&args.id)?;
    gallery.detach_tag(&id, &args.name).map_err(|e| {
        with_not_found_hint(e, "run `gallery list` and `gallery tag list` to see IDs and names")
    })?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &badge(
                &ui,
                Badge::Ok,
                &format!("Removed '{}' from {}", args.name, short_id(&id)),
            ),
        );
    }
    Ok(())
}

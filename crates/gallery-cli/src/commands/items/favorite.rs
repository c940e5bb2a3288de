//! Favorite toggle command handler.

use crate::app::AppContext;
use crate::cli::FavoriteArgs;
use crate::helpers::{parse_item_id, with_not_found_hint};
use crate::ui::{badge, print, short_id, Badge};

pub fn handle_favorite(ctx: &AppContext, args: &FavoriteArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let id = parse_item_id(&args.id)?;

    gallery
        .set_favorite(&id, !args.unset)
        .map_err(|e| with_not_found_hint(e, "run `gallery list` to see item IDs"))?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        let message = if args.unset {
            format!("Removed favorite from {}", short_id(&id))
        } else {
            format!("Marked {} as favorite", short_id(&id))
        };
        print(&ui, &badge(&ui, Badge::Ok, &message));
    }
    Ok(())
}

//! Attach tag command handler.

use crate::app::AppContext;
use crate::cli::TagPairArgs;
use crate::helpers::{parse_item_id, with_not_found_hint};
use crate::ui::{badge, print, short_id, Badge};

pub fn handle_tag_attach(ctx: &AppContext, args: &TagPairArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let id = parse_item_id(&args.id)?;
    gallery.attach_tag(&id, &args.name).map_err(|e| {
        with_not_found_hint(e, "run `gallery list` and `gallery tag list` to see IDs and names")
    })?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &badge(
                &ui,
                Badge::Ok,
                &format!("Tagged {} with '{}'", short_id(&id), args.name),
            ),
        );
    }
    Ok(())
}

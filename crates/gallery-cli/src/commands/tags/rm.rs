//! Delete tag command handler.

use crate::app::AppContext;
use crate::cli::TagRmArgs;
use crate::helpers::with_not_found_hint;
use crate::ui::{badge, print, Badge};

pub fn handle_tag_rm(ctx: &AppContext, args: &TagRmArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    gallery
        .delete_tag(&args.name)
        .map_err(|e| with_not_found_hint(e, "run `gallery tag list` to see tag names"))?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Deleted tag '{}'", args.name)),
        );
    }
    Ok(())
}

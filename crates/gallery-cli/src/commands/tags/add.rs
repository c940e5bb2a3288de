//! Create tag command handler.

use crate::app::AppContext;
use crate::cli::TagAddArgs;
use crate::helpers::parse_hex_color;
use crate::ui::{print, receipt};

pub fn handle_tag_add(ctx: &AppContext, args: &TagAddArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let color = args.color.as_deref().map(parse_hex_color).transpose()?;
    let tag = gallery.create_tag(&args.name, color.as_deref())?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &receipt(
                &ui,
                "Created tag",
                &[("Name", tag.name.as_str()), ("Color", tag.color.as_str())],
            ),
        );
    }
    Ok(())
}

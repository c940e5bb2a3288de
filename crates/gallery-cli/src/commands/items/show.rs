//! Show item command handler.

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::{parse_item_id, with_not_found_hint};
use crate::output::json::item_json;
use crate::output::text::print_item;

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let id = parse_item_id(&args.id)?;

    if args.content {
        let data_url = gallery
            .content(&id)
            .await
            .map_err(|e| with_not_found_hint(e, "run `gallery list` to see item IDs"))?;
        println!("{}", data_url);
        return Ok(());
    }

    let detail = gallery
        .item(&id)
        .map_err(|e| with_not_found_hint(e, "run `gallery list` to see item IDs"))?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&item_json(&detail))?);
        return Ok(());
    }
    print_item(&ui, &detail, ctx.quiet());
    Ok(())
}

//! List tags command handler.

use crate::app::AppContext;
use crate::cli::TagListArgs;
use crate::output::json::{tag_stats_json, tags_json};
use crate::output::text::{print_tag_stats, print_tags};

pub fn handle_tag_list(ctx: &AppContext, args: &TagListArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let ui = ctx.ui(args.json, None);

    if args.stats {
        let stats = gallery.tag_stats()?;
        if ui.mode.is_json() {
            println!("{}", serde_json::to_string_pretty(&tag_stats_json(&stats))?);
            return Ok(());
        }
        print_tag_stats(&ui, &stats, ctx.quiet());
        return Ok(());
    }

    let tags = gallery.list_tags()?;
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&tags_json(&tags))?);
        return Ok(());
    }
    print_tags(&ui, &tags, ctx.quiet());
    Ok(())
}

//! List items command handler.

use gallery_core::storage::PageRequest;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{parse_item_id, validate_format_flags, with_not_found_hint};
use crate::output::json::page_json;
use crate::output::text::print_page;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    validate_format_flags(args.json, args.format.as_deref())?;
    let gallery = ctx.open_gallery()?;

    let mut request = PageRequest::new().limit(args.limit.unwrap_or_else(|| ctx.page_size()));
    if let Some(cursor) = &args.cursor {
        request = request.cursor(parse_item_id(cursor)?);
    }
    if args.favorites {
        request = request.favorites_only();
    }
    if let Some(tag) = &args.tag {
        request = request.tag(tag);
    }

    let page = gallery
        .page(&request)
        .map_err(|e| with_not_found_hint(e, "run `gallery list` without --cursor to start over"))?;

    let ui = ctx.ui(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&page_json(&page))?);
        return Ok(());
    }
    print_page(&ui, &page, ctx.quiet());
    Ok(())
}

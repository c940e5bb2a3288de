//! Integrity check command handler.
//!
//! The report is always printed (JSON or text) before the exit status
//! is decided, so scripts can read the findings on failure.

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::errors::CliError;
use crate::output::json::check_json;
use crate::output::text::print_check_report;

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let report = gallery
        .check()
        .map_err(|e| CliError::integrity_failed(format!("Integrity check failed: {}", e)))?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&check_json(&report))?);
    } else {
        print_check_report(&ui, &report, ctx.quiet());
    }

    if !report.is_clean() {
        let problems = report.missing_objects.len()
            + report.plaintext_titles.len()
            + report.orphaned_objects.len();
        return Err(CliError::integrity_failed(format!("{} problem(s) found", problems)).into());
    }
    Ok(())
}

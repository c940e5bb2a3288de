//! Seal command handler.
//!
//! Writes only the envelope to stdout so the output can be piped
//! straight into `gallery open` or a file.

use crate::app::AppContext;
use crate::cli::SealArgs;
use crate::helpers::read_text_arg_or_stdin;

pub fn handle_seal(ctx: &AppContext, args: &SealArgs) -> anyhow::Result<()> {
    let text = read_text_arg_or_stdin(args.text.as_deref())?;
    let envelope = ctx.codec()?.encrypt(&text)?;
    println!("{}", envelope);
    Ok(())
}

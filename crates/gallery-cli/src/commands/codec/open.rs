//! Open command handler.
//!
//! Input that is not a well-formed envelope (or fails authentication)
//! passes through unchanged. The warning badge goes to stderr so stdout
//! stays pipeable either way.

use gallery_core::DecryptOutcome;

use crate::app::AppContext;
use crate::cli::OpenArgs;
use crate::helpers::read_text_arg_or_stdin;
use crate::ui::print_warning;

pub fn handle_open(ctx: &AppContext, args: &OpenArgs) -> anyhow::Result<()> {
    let text = read_text_arg_or_stdin(args.text.as_deref())?;
    match ctx.codec()?.decrypt_outcome(&text) {
        DecryptOutcome::Decrypted(plain) => println!("{}", plain),
        DecryptOutcome::Passthrough(original) => {
            if !ctx.quiet() {
                let ui = ctx.ui(false, None);
                print_warning(&ui, "input is not a sealed envelope; passing it through");
            }
            println!("{}", original);
        }
    }
    Ok(())
}

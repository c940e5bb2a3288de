//! Fetch command handler.
//!
//! Downloads a remote envelope and opens it. The spinner only runs on
//! an interactive terminal; piped output carries nothing but the body.

use std::time::Duration;

use gallery_core::fetch::{fetch_and_decrypt_outcome, HttpByteSource};
use gallery_core::DecryptOutcome;

use crate::app::AppContext;
use crate::cli::FetchArgs;
use crate::ui::{print_warning, Spinner};

pub async fn handle_fetch(ctx: &AppContext<'_>, args: &FetchArgs) -> anyhow::Result<()> {
    let codec = ctx.codec()?;
    let source = match args.timeout {
        Some(secs) => {
            let timeout = Duration::from_secs(secs);
            HttpByteSource::with_timeouts(timeout, timeout)?
        }
        None => HttpByteSource::new()?,
    };

    let ui = ctx.ui(false, None);
    let animate = !ctx.quiet() && ui.allows_animation();
    let spinner = Spinner::new(&ui, "Fetching");
    if animate {
        spinner.start();
    }

    let result = fetch_and_decrypt_outcome(&source, &codec, &args.url).await;
    if animate {
        spinner.clear();
    }

    match result? {
        DecryptOutcome::Decrypted(plain) => println!("{}", plain),
        DecryptOutcome::Passthrough(original) => {
            if !ctx.quiet() {
                print_warning(&ui, "response is not a sealed envelope; passing it through");
            }
            println!("{}", original);
        }
    }
    Ok(())
}

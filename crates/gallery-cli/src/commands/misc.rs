//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut command = Cli::command();
    generate(args.shell, &mut command, "gallery", &mut io::stdout());
    Ok(())
}

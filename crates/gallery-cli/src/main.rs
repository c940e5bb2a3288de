//! Gallery CLI entry point.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;

use gallery_core::{GalleryError, VERSION};

use crate::app::AppContext;
use crate::cli::{Cli, Commands, TagCommands};
use crate::constants::exit_codes;
use crate::errors::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli).await {
        exit_with(&err);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);
    match &cli.command {
        Some(Commands::Init(args)) => commands::init::handle_init(&ctx, args),
        Some(Commands::Add(args)) => commands::items::handle_add(&ctx, args),
        Some(Commands::List(args)) => commands::items::handle_list(&ctx, args),
        Some(Commands::Show(args)) => commands::items::handle_show(&ctx, args).await,
        Some(Commands::Favorite(args)) => commands::items::handle_favorite(&ctx, args),
        Some(Commands::Tag { command }) => match command {
            TagCommands::Add(args) => commands::tags::handle_tag_add(&ctx, args),
            TagCommands::List(args) => commands::tags::handle_tag_list(&ctx, args),
            TagCommands::Rm(args) => commands::tags::handle_tag_rm(&ctx, args),
            TagCommands::Attach(args) => commands::tags::handle_tag_attach(&ctx, args),
            TagCommands::Detach(args) => commands::tags::handle_tag_detach(&ctx, args),
        },
        Some(Commands::Seal(args)) => commands::codec::handle_seal(&ctx, args),
        Some(Commands::Open(args)) => commands::codec::handle_open(&ctx, args),
        Some(Commands::Fetch(args)) => commands::codec::handle_fetch(&ctx, args).await,
        Some(Commands::Check(args)) => commands::maintenance::handle_check(&ctx, args),
        Some(Commands::Completions(args)) => commands::misc::handle_completions(args),
        None => {
            println!("Gallery v{}", VERSION);
            println!();
            println!("Run `gallery --help` for usage information.");
            Ok(())
        }
    }
}

/// Map an error chain to a message and exit code.
///
/// Handlers wrap domain errors with context freely; the walk over the
/// chain finds the typed error wherever it sits.
fn exit_with(err: &anyhow::Error) -> ! {
    if let Some(cli_err) = err.chain().find_map(|cause| cause.downcast_ref::<CliError>()) {
        cli_err.exit();
    }
    if let Some(gallery_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<GalleryError>())
    {
        let code = match gallery_err {
            GalleryError::NotFound(_) => exit_codes::NOT_FOUND,
            GalleryError::InvalidInput(_) | GalleryError::AlreadyExists(_) => {
                exit_codes::INVALID_INPUT
            }
            _ => 1,
        };
        eprintln!("Error: {}", err);
        std::process::exit(code);
    }
    eprintln!("Error: {:#}", err);
    std::process::exit(1)
}

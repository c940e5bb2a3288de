use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use gallery_core::VERSION;

/// Gallery - An encrypted, CLI-first image gallery with sealed metadata
#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the gallery library directory
    #[arg(short, long, global = true, env = "GALLERY_LIBRARY")]
    pub library: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Prompt for the passphrase instead of using the environment
    #[arg(long, global = true)]
    pub prompt_passphrase: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Directory where the library will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Subdirectory for stored objects (relative to the library)
    #[arg(long, default_value = "objects")]
    pub objects_dir: String,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Item title (sealed before storage)
    #[arg(long)]
    pub title: String,

    /// Read the payload from a file
    #[arg(long, value_name = "PATH", conflicts_with = "data_url")]
    pub file: Option<String>,

    /// Payload as a data URL ("data:<mime>;base64,...")
    #[arg(long, value_name = "URL")]
    pub data_url: Option<String>,

    /// MIME type override
    #[arg(long, value_name = "TYPE")]
    pub mime: Option<String>,

    /// Attach a link (URL, URL::PASSWORD, or URL::PASSWORD::LABEL)
    #[arg(long, value_name = "SPEC")]
    pub link: Vec<String>,

    /// Attach a tag (created on first use)
    #[arg(short, long, value_name = "NAME")]
    pub tag: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Resume after this item ID (from a previous page)
    #[arg(long, value_name = "ID")]
    pub cursor: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only show favorites
    #[arg(long)]
    pub favorites: bool,

    /// Filter by tag
    #[arg(long, value_name = "NAME")]
    pub tag: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Item ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the decrypted payload (data URL) to stdout
    #[arg(long)]
    pub content: bool,
}

/// Arguments for the `favorite` command
#[derive(Args)]
pub struct FavoriteArgs {
    /// Item ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Clear the favorite flag instead of setting it
    #[arg(long)]
    pub unset: bool,
}

/// Arguments for the `tag add` command
#[derive(Args)]
pub struct TagAddArgs {
    /// Tag name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Display color as a hex string (e.g., "#3b82f6")
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,
}

/// Arguments for the `tag list` command
#[derive(Args)]
pub struct TagListArgs {
    /// Include usage counts
    #[arg(long)]
    pub stats: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `tag rm` command
#[derive(Args)]
pub struct TagRmArgs {
    /// Tag name
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `tag attach` and `tag detach` commands
#[derive(Args)]
pub struct TagPairArgs {
    /// Item ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Tag name
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `seal` command
#[derive(Args)]
pub struct SealArgs {
    /// Text to seal (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// Envelope to open (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for the `fetch` command
#[derive(Args)]
pub struct FetchArgs {
    /// URL of the remote envelope
    #[arg(value_name = "URL")]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Create a tag
    Add(TagAddArgs),

    /// List tags
    List(TagListArgs),

    /// Delete a tag (detaches it from all items)
    Rm(TagRmArgs),

    /// Attach a tag to an item
    Attach(TagPairArgs),

    /// Detach a tag from an item
    Detach(TagPairArgs),
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new gallery library
    Init(InitArgs),

    /// Add a new item to the gallery
    Add(AddArgs),

    /// List items, newest first
    List(ListArgs),

    /// Show a specific item by ID
    Show(ShowArgs),

    /// Mark or unmark an item as a favorite
    Favorite(FavoriteArgs),

    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Seal text into an envelope
    Seal(SealArgs),

    /// Open an envelope (passes unrecognized input through)
    Open(OpenArgs),

    /// Fetch a remote envelope and open it
    Fetch(FetchArgs),

    /// Check library integrity
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

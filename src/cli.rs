use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "declutter",
    about = "Find and remove old files by extension, from the terminal or a browser UI",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service used by the browser UI
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List files that a cleanup would delete (no deletion)
    Scan(Criteria),

    /// Delete matching files (requires --confirm to actually delete)
    Clean {
        #[command(flatten)]
        criteria: Criteria,

        /// Actually delete files. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,
    },
}

impl Command {
    /// Only `clean --confirm` removes files; every other command is read-only.
    pub fn deletes(&self) -> bool {
        matches!(self, Command::Clean { confirm: true, .. })
    }
}

#[derive(Args)]
pub struct Criteria {
    /// Directory to search recursively
    pub directory: String,

    /// File extension to match (e.g. "log" or ".tmp")
    #[arg(long = "ext")]
    pub extension: String,

    /// Only files older than this age (e.g. "30d", "12h", "2w")
    #[arg(long, conflicts_with = "before", required_unless_present = "before")]
    pub older_than: Option<String>,

    /// Only files modified before this Unix timestamp (seconds)
    #[arg(long)]
    pub before: Option<i64>,
}

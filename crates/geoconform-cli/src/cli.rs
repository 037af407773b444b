use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "geoconform",
    about = "Geoconform: structural conformance checks over geodetic and metadata objects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every subject of a JSON subject document
    Check {
        /// Path to the subject document
        document: String,

        /// Path to a container configuration (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective container configuration as TOML
    Config {
        /// Path to a container configuration to normalize (defaults otherwise)
        #[arg(long)]
        config: Option<String>,
    },
}

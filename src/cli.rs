use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffcompose")]
#[command(author, version, about = "Assemble ffmpeg command lines from typed settings")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a path to its container type
    Resolve {
        /// Path to resolve
        #[arg(required = true)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered container types and their capabilities
    Containers,

    /// List built-in setting kinds
    Kinds,

    /// List built-in presets and configured templates
    Presets,

    /// Assemble an ffmpeg argument list without running it
    Build {
        /// Input file
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Output file (generated in the output directory if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container extension for a generated output (defaults to the input's)
        #[arg(short, long, value_name = "EXT", conflicts_with = "output")]
        format: Option<String>,

        /// Generate the output in the temp directory instead
        #[arg(long, conflicts_with = "output")]
        intermediate: bool,

        /// Template applied to the input (repeatable)
        #[arg(long = "input-preset", value_name = "NAME")]
        input_presets: Vec<String>,

        /// Template applied to the output (repeatable)
        #[arg(short, long = "preset", value_name = "NAME")]
        presets: Vec<String>,

        /// Extra output setting as KIND=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "KIND=VALUE")]
        settings: Vec<String>,

        /// Add -y to overwrite the output
        #[arg(short = 'y', long)]
        overwrite: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}

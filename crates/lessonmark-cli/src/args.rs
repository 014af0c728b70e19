//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compile lessonmark lesson sources to HTML
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/lessonmark/config.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Content directory, overriding `content_root` from the config
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Output directory, overriding `output_dir` from the config
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile a single source file and print the result
    #[command(visible_alias = "c")]
    Compile {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Print the compiled tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Compile one lesson from the content directory and print it
    #[command(visible_alias = "l")]
    Lesson {
        subject: String,
        number: u32,

        /// Print the compiled tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Compile every lesson and write HTML pages to the output directory
    #[command(visible_alias = "b")]
    Build,

    /// Compile every lesson and report failures without writing anything
    Check,
}

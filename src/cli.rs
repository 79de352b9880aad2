//! CLI struct definitions for the kiri command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use crate::core::pathset::Location;
use crate::core::search::Category;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "kiri",
    version = env!("CARGO_PKG_VERSION"),
    about = "Locate and query the file index of a kiri project.",
    disable_version_flag = true
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CategoryArg {
    Index,
    Project,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Index => Category::Index,
            CategoryArg::Project => Category::Project,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LocationArg {
    Local,
    Global,
}

impl From<LocationArg> for Location {
    fn from(arg: LocationArg) -> Self {
        match arg {
            LocationArg::Local => Location::Local,
            LocationArg::Global => Location::Global,
        }
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct ScopeArgs {
    /// Search the registered include paths or the fixed index directory.
    #[clap(long, value_enum, default_value_t = CategoryArg::Project)]
    pub category: CategoryArg,
    /// Search paths inside the project (local) or outside it (global).
    #[clap(long, value_enum, default_value_t = LocationArg::Local)]
    pub location: LocationArg,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create `.kiri/` with its index layout, version and configuration.
    Init {
        /// Directory to initialize (defaults to current working directory).
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print the project origin enclosing a directory.
    Locate {
        /// Directory to start from (defaults to current working directory).
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Show origin, marker paths and configured path rules.
    Status {
        /// Output format: 'text' or 'json'.
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List every indexed file with its kind.
    List {
        #[clap(flatten)]
        scope: ScopeArgs,
        /// Output format: 'text' or 'json'.
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the first indexed file with the given file name.
    Find {
        /// File name to look for, e.g. `main.cpp`.
        name: String,
        #[clap(flatten)]
        scope: ScopeArgs,
    },
    /// Show how a single path is classified.
    Classify {
        /// Path to classify.
        path: PathBuf,
    },
    /// Print the binary version.
    Version,
}

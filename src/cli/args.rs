//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Arguments
//!
//! Exactly one positional argument, the val URL. Flags:
//! - `--config <path>`: Config file to use
//! - `--out-dir <dir>`: Where to write the package
//! - `--token-var <name>`: Variable holding the API token
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// valexport - Export a Val Town val as an npm package
#[derive(Parser, Debug)]
#[command(name = "valexport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL of the val, e.g. https://www.val.town/v/alice/scrape
    #[arg(value_name = "VAL_URL")]
    pub url: String,

    /// Config file (default: $VALEXPORT_CONFIG, then ./valexport.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to write the package to (cleared first)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Environment variable holding the Val Town API token
    #[arg(long, value_name = "NAME")]
    pub token_var: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,
}

impl Cli {
    /// Parse an argument list (including the program name).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

//! Command-line pipelines of the globeprint tools.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use globe_config::{CliArgs, Config};

pub use commands::{flatten, globe, stencil};
pub use error::CliError;

/// Printable globes from an equirectangular world map.
#[derive(Parser, Debug)]
#[command(name = "globeprint", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub args: CliArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Embossed globe with raised land. The output extension picks the format:
    /// `.stl`, `.ply` (vertex colors), or `.obj` (writes a directory holding
    /// `object.obj` and `material.mtl`).
    Globe { image: PathBuf, output: PathBuf },

    /// Stencil globe with the bright regions of the map cut out, written as
    /// `top.stl` and `bottom.stl`.
    Stencil { image: PathBuf, out_dir: PathBuf },

    /// Paper strips for a hand-assembled globe, written as
    /// `octant_<north>_<index>.png`.
    Flatten { image: PathBuf, out_dir: PathBuf },
}

/// Runs one subcommand to completion.
pub fn run(command: &Command, config: &Config) -> Result<(), CliError> {
    match command {
        Command::Globe { image, output } => globe(image, output, config),
        Command::Stencil { image, out_dir } => stencil(image, out_dir, config),
        Command::Flatten { image, out_dir } => flatten(image, out_dir, config),
    }
}

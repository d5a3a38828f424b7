//! Command-line overrides shared by every globeprint subcommand.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Per-run overrides of values loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Latitude/longitude stops of the base sphere.
    #[arg(long, global = true)]
    pub stops: Option<usize>,

    /// Refinement passes.
    #[arg(long, global = true)]
    pub subdivisions: Option<usize>,

    /// Radius difference that triggers refinement of an edge.
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Radius of land relative to sea level.
    #[arg(long, global = true)]
    pub land_radius: Option<f64>,

    /// Refine edge by edge instead of in batched passes.
    #[arg(long, global = true)]
    pub sequential: Option<bool>,

    /// Enable or disable coastline smoothing.
    #[arg(long, global = true)]
    pub smooth: Option<bool>,

    /// Inner shell radius of a stencil as a fraction of the outer one.
    #[arg(long, global = true)]
    pub thickness: Option<f64>,

    /// Pixel height of each flattened strip.
    #[arg(long, global = true)]
    pub render_height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// `stops` and `subdivisions` apply to both the embossed and the stencil
    /// globe; only one of them is built per run.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(stops) = args.stops {
            self.globe.stops = stops;
            self.stencil.stops = stops;
        }
        if let Some(n) = args.subdivisions {
            self.globe.subdivisions = n;
            self.stencil.subdivisions = n;
        }
        if let Some(tol) = args.tolerance {
            self.globe.tolerance = tol;
        }
        if let Some(r) = args.land_radius {
            self.globe.land_radius = r;
        }
        if let Some(sequential) = args.sequential {
            self.globe.sequential = sequential;
        }
        if let Some(smooth) = args.smooth {
            self.smoothing.enabled = smooth;
        }
        if let Some(scale) = args.thickness {
            self.stencil.thickness_scale = scale;
        }
        if let Some(h) = args.render_height {
            self.flatten.render_height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

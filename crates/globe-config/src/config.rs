//! Configuration structs with defaults tuned for a desktop-printer globe, and
//! RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the settings file inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Platform config directory for globeprint, e.g. `~/.config/globeprint`.
/// Falls back to `./globeprint` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("globeprint")
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Embossed globe settings.
    pub globe: GlobeConfig,
    /// Coastline smoothing applied to the globe radius field.
    pub smoothing: SmoothingConfig,
    /// Stencil (cut-out) globe settings.
    pub stencil: StencilConfig,
    /// Paper strip rendering settings.
    pub flatten: FlattenConfig,
    /// Diagnostics.
    pub debug: DebugConfig,
}

/// Embossed globe: land raised above a spherical sea.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Latitude/longitude stops of the base sphere.
    pub stops: usize,
    /// Maximum refinement passes along coastlines.
    pub subdivisions: usize,
    /// Edges whose endpoint radii differ by more than this are refined.
    pub tolerance: f64,
    /// Radius of land relative to sea level.
    pub land_radius: f64,
    /// Radius of sea.
    pub sea_radius: f64,
    /// Split edges one at a time, longest triangles first, instead of in
    /// batched passes.
    pub sequential: bool,
}

/// Gaussian smoothing of the land/sea field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmoothingConfig {
    pub enabled: bool,
    /// Sample spacing in radians.
    pub delta: f64,
    /// Kernel width in radians.
    pub stddev: f64,
    /// Samples on each side of the center, per axis.
    pub steps: u32,
}

/// Stencil globe: a thin shell with the land cut out, printed as two halves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StencilConfig {
    pub stops: usize,
    /// Refinement passes along the cut outline.
    pub subdivisions: usize,
    /// Inner shell radius as a fraction of the outer one.
    pub thickness_scale: f64,
    /// Tolerance for assigning triangles on the equator to a half.
    pub hemisphere_epsilon: f64,
}

/// Paper strips for hand-assembled globes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlattenConfig {
    /// Pole-to-equator height of each strip in pixels.
    pub render_height: u32,
    pub lat_step: f64,
    pub lon_step: f64,
    /// Strips per octant image.
    pub strips_per_octant: usize,
}

/// Diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            stops: 100,
            subdivisions: 4,
            tolerance: 1e-3,
            land_radius: 1.03,
            sea_radius: 1.0,
            sequential: false,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delta: 0.002,
            stddev: 0.004,
            steps: 2,
        }
    }
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            stops: 100,
            subdivisions: 4,
            thickness_scale: 0.9,
            hemisphere_epsilon: 1e-4,
        }
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            render_height: 2000,
            lat_step: 0.0003,
            lon_step: 0.0003,
            strips_per_octant: 4,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

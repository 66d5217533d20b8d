//! Configuration and settings management for TrackTools
//!
//! Keeps the last-used via fence choices between runs. Supports JSON and
//! TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into two sections:
//! - Fence settings (via size, clearance, via type, deduplication policy)
//! - UI preferences (measurement system used for length text entry)

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
pub use tracktools_core::units::MeasurementSystem;
use tracktools_core::{from_mm, Coord, ViaType};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "tracktools";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Which copper layers keep a via's annular ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnularRingPolicy {
    /// Ring on every copper layer the via passes through
    #[default]
    AllCopperLayers,
    /// Ring only on the start, end and connected layers
    StartEndAndConnected,
}

impl AnnularRingPolicy {
    pub fn removes_unconnected(&self) -> bool {
        matches!(self, Self::StartEndAndConnected)
    }
}

impl std::fmt::Display for AnnularRingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllCopperLayers => write!(f, "All copper layers"),
            Self::StartEndAndConnected => write!(f, "Start, end, and connected layers"),
        }
    }
}

/// Last-used via fence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceSettings {
    /// Via pad diameter in mm
    pub via_diameter_mm: f64,
    /// Via drill diameter in mm
    pub via_drill_mm: f64,
    /// Track edge to via edge in mm; zero and negative values are allowed
    pub clearance_mm: f64,
    pub via_type: ViaType,
    pub annular_ring: AnnularRingPolicy,
    /// Let vias pick up the net of the copper they land on
    pub update_via_net: bool,
    /// Take the clearance from the selected net's zone
    pub use_zone_clearance: bool,
    /// Vias closer than this are merged, in mm
    pub min_separation_mm: f64,
    /// Also keep clear of vias already on the board
    pub avoid_existing_vias: bool,
}

impl Default for FenceSettings {
    fn default() -> Self {
        Self {
            via_diameter_mm: 0.6,
            via_drill_mm: 0.3,
            clearance_mm: 0.2,
            via_type: ViaType::Through,
            annular_ring: AnnularRingPolicy::AllCopperLayers,
            update_via_net: false,
            use_zone_clearance: false,
            min_separation_mm: 0.1,
            avoid_existing_vias: false,
        }
    }
}

impl FenceSettings {
    /// Minimum via separation in board units
    pub fn min_separation(&self) -> Coord {
        from_mm(self.min_separation_mm)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !self.via_drill_mm.is_finite() || self.via_drill_mm <= 0.0 {
            return Err(SettingsError::invalid(
                "fence.via_drill_mm",
                "must be a positive number",
            ));
        }
        if !self.via_diameter_mm.is_finite() || self.via_diameter_mm <= self.via_drill_mm {
            return Err(SettingsError::invalid(
                "fence.via_diameter_mm",
                "must be larger than the drill diameter",
            ));
        }
        if !self.clearance_mm.is_finite() {
            return Err(SettingsError::invalid(
                "fence.clearance_mm",
                "must be a finite number",
            ));
        }
        if !self.min_separation_mm.is_finite() || self.min_separation_mm < 0.0 {
            return Err(SettingsError::invalid(
                "fence.min_separation_mm",
                "must not be negative",
            ));
        }
        if self.via_type == ViaType::Undefined {
            return Err(SettingsError::invalid(
                "fence.via_type",
                "must be through, microvia or blind_buried",
            ));
        }
        Ok(())
    }
}

/// UI preference settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Measurement system for length text entry
    pub measurement_system: MeasurementSystem,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fence: FenceSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, e.g. `~/.config/tracktools/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = Format::from_path(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.fence.validate()
    }
}

//! Mode configuration and visual preferences
//!
//! Loaded from JSON by the host; every field has a default so partial files work.

use serde::{Deserialize, Serialize};

use crate::consts::BUMPER_MARGIN;
use crate::error::{PinballError, Result};
use crate::sim::Board;

/// Smallest board edge (cells) that still has an interior for bumpers
pub const MIN_BOARD_CELLS: i32 = BUMPER_MARGIN * 2 + 1;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangle fan segments per circle in the mesh backend
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }

    /// Segments per rounded corner
    pub fn corner_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => 4,
            QualityPreset::High => 8,
        }
    }
}

/// Visual preferences for the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mesh tessellation quality
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Spark particles in hit effects
    pub sparks: bool,
    /// Bumper/flipper flash glow
    pub flashes: bool,
    /// Score popups over hit effects
    pub popups: bool,

    // === HUD ===
    /// Mode title and hit counter
    pub hud: bool,

    // === Accessibility ===
    /// Reduced motion (no sparks, no flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            sparks: true,
            flashes: true,
            popups: true,
            hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the particle work
        if preset == QualityPreset::Low {
            self.sparks = false;
        }
    }

    /// Effective sparks (respects reduced_motion)
    pub fn effective_sparks(&self) -> bool {
        self.sparks && !self.reduced_motion
    }

    /// Effective flashes (respects reduced_motion)
    pub fn effective_flashes(&self) -> bool {
        self.flashes && !self.reduced_motion
    }
}

/// Everything a host needs to set up the mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinballConfig {
    pub board: Board,
    /// Seed for bumper placement and spark jitter
    pub seed: u64,
    pub settings: Settings,
}

impl Default for PinballConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            seed: 0x5eed,
            settings: Settings::default(),
        }
    }
}

impl PinballConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded pinball config: {}x{} board, quality {}",
            config.board.width,
            config.board.height,
            config.settings.quality.as_str()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let Board {
            width,
            height,
            cell_size,
        } = self.board;

        if width < MIN_BOARD_CELLS || height < MIN_BOARD_CELLS {
            return Err(PinballError::InvalidBoard {
                width,
                height,
                min: MIN_BOARD_CELLS,
            });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(PinballError::InvalidCellSize(cell_size));
        }
        Ok(())
    }
}

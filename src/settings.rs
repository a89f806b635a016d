//! Game settings and preferences
//!
//! Persisted separately from the best score.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// Whether to draw shadow glows (obstacle strips, player marks)
    pub fn glow_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Whether to draw the decorative lane stripes
    pub fn lane_guides_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => false,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (spawn shards, crash burst)
    pub particles: bool,
    /// Screen flash on start/crash
    pub flash: bool,

    // === Accessibility ===
    /// Reduced motion (no flashes, steady player marks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            particles: true,
            flash: true,
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

        // Low preset drops decorative particles
        if preset == QualityPreset::Low {
            self.particles = false;
        }
    }

    /// Effective flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Effective pulse on the player marks (respects reduced_motion)
    pub fn effective_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon-glide-settings";

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

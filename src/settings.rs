//! Settings and preferences
//!
//! Persisted in LocalStorage on the web, or in a JSON file named by the
//! `STELLAR_SETTINGS` environment variable on native.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PARTICLE_COUNT;
use crate::error::SettingsError;
use crate::sim::ShapeKind;

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

    /// Swarm size for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => 2000,
            QualityPreset::Medium => DEFAULT_PARTICLE_COUNT,
            QualityPreset::High => 12_000,
        }
    }
}

/// Swarm settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle budget preset
    pub quality: QualityPreset,
    /// Explicit particle count, overriding the preset
    pub particle_count: Option<usize>,

    // === Visual Effects ===
    /// White flashes and scale spikes
    pub sparkle: bool,
    /// Oscillating drift around targets
    pub twinkle: bool,

    // === Input ===
    /// Mouse/trackpad repels particles when no hand is visible
    pub pointer_fallback: bool,

    // === Startup ===
    pub initial_shape: ShapeKind,
    /// Seed for the initial scatter and sparkle
    pub seed: u64,

    // === Accessibility ===
    /// Reduced motion (no sparkle, no twinkle)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particle_count: None,

            sparkle: true,
            twinkle: true,

            pointer_fallback: true,

            initial_shape: ShapeKind::Sphere,
            seed: 0x5EED,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Upper bound on an explicit particle count
    pub const MAX_PARTICLES: usize = 200_000;

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count
    pub fn particle_count(&self) -> usize {
        self.particle_count
            .unwrap_or_else(|| self.quality.particle_count())
    }

    /// Effective sparkle (respects reduced_motion)
    pub fn effective_sparkle(&self) -> bool {
        self.sparkle && !self.reduced_motion
    }

    /// Effective twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        self.twinkle && !self.reduced_motion
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.particle_count {
            Some(n) if n > Self::MAX_PARTICLES => Err(SettingsError::Invalid(format!(
                "particle_count {} exceeds {}",
                n,
                Self::MAX_PARTICLES
            ))),
            _ => Ok(()),
        }
    }

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "stellar_particles_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_ENV: &'static str = "STELLAR_SETTINGS";

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from `$STELLAR_SETTINGS`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        let path = std::path::PathBuf::from(path);
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Save to `$STELLAR_SETTINGS` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return;
        };
        let path = std::path::PathBuf::from(path);
        match self.save_to(&path) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_counts() {
        assert_eq!(Settings::default().particle_count(), 6000);
        assert_eq!(Settings::from_preset(QualityPreset::Low).particle_count(), 2000);
        let explicit = Settings {
            particle_count: Some(123),
            ..Settings::default()
        };
        assert_eq!(explicit.particle_count(), 123);
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_sparkle());
        assert!(!settings.effective_twinkle());
        assert!(Settings::default().effective_sparkle());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"quality": "High", "initial_shape": "heart"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.initial_shape, ShapeKind::Heart);
        assert!(settings.pointer_fallback);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 99,
            twinkle: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"particle_count": 99999999}"#),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("stellar-settings-{}.json", std::process::id()));
        let settings = Settings {
            initial_shape: ShapeKind::Saturn,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Io(_))));
    }
}

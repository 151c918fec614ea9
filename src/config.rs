//! Application configuration
//!
//! Stores a default biometric profile and display preferences in a
//! TOML file so the CLI can be used without repeating every flag.
//! Profile enums are stored as strings and parsed leniently on load:
//! an unrecognized activity falls back to the sedentary multiplier and
//! an unrecognized sex to unknown, each with a logged warning.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ActivityLevel, BiometricProfile, Sex};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Stored default profile, if any
    pub profile: Option<ProfileConfig>,

    /// Display preferences
    pub display: DisplaySettings,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Display preferences for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Emit JSON instead of tables by default
    pub default_json: bool,

    /// Use colored terminal output
    pub use_colors: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_json: false,
            use_colors: true,
        }
    }
}

/// Stored default profile, with enums as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Sex at birth (male, female, unknown)
    pub sex: String,

    /// Age in whole years
    pub age: u16,

    /// Height in centimeters
    pub height_cm: u16,

    /// Weight in kilograms
    pub weight_kg: Decimal,

    /// Body-fat percentage, if known
    pub body_fat_percent: Option<Decimal>,

    /// Activity tier (sedentary, light, moderate, high, very_high)
    pub activity: String,
}

impl ProfileConfig {
    /// Convert the stored strings into a typed profile, degrading
    /// unknown strings leniently.
    pub fn to_profile(&self) -> BiometricProfile {
        BiometricProfile {
            sex: Sex::from_str_lenient(&self.sex),
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            body_fat_percent: self.body_fat_percent,
            activity: ActivityLevel::from_str_lenient(&self.activity),
        }
    }

    /// Capture a typed profile for storage
    pub fn from_profile(profile: &BiometricProfile) -> Self {
        Self {
            sex: profile.sex.to_string(),
            age: profile.age,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            body_fat_percent: profile.body_fat_percent,
            activity: profile.activity.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            metadata: ConfigMetadata {
                version: "1".to_string(),
                created_at: now,
                updated_at: now,
            },
            profile: None,
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kcalrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(_) => {
                tracing::debug!(path = %config_path.display(), "No config file, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_profile() -> ProfileConfig {
        ProfileConfig {
            sex: "female".to_string(),
            age: 30,
            height_cm: 165,
            weight_kg: dec!(68),
            body_fat_percent: None,
            activity: "moderate".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.profile = Some(sample_profile());
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        let profile = loaded.profile.unwrap().to_profile();
        assert_eq!(profile.sex, Sex::Female);
        assert_eq!(profile.age, 30);
        assert_eq!(profile.weight_kg, dec!(68));
        assert_eq!(profile.activity, ActivityLevel::Moderate);
    }

    #[test]
    fn test_lenient_profile_strings() {
        let mut stored = sample_profile();
        stored.sex = "xyz".to_string();
        stored.activity = "ultra".to_string();

        let profile = stored.to_profile();
        assert_eq!(profile.sex, Sex::Unknown);
        assert_eq!(profile.activity, ActivityLevel::Sedentary);
    }

    #[test]
    fn test_profile_config_round_trips_typed_profile() {
        let typed = sample_profile().to_profile();
        let stored = ProfileConfig::from_profile(&typed);
        assert_eq!(stored.sex, "female");
        assert_eq!(stored.activity, "moderate");
        assert_eq!(stored.to_profile(), typed);
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert!(AppConfig::load_from_file("/nonexistent/kcalrs.toml").is_err());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }
}

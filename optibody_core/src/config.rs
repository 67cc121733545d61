//! Configuration file support for OptiBody.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/optibody/config.toml`.

use crate::activity::ActivityMultiplierTable;
use crate::engine::HealthMetricsEngine;
use crate::formula::{BmrFormula, DEFAULT_FORMULAS};
use crate::{ActivityLevel, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub activity: ActivityConfig,

    #[serde(default)]
    pub nutrition: NutritionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// BMR formula priority, by configuration key
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_formulas")]
    pub formulas: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            formulas: default_formulas(),
        }
    }
}

/// Activity multipliers for TDEE
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_sedentary")]
    pub sedentary: f64,
    #[serde(default = "default_lightly_active")]
    pub lightly_active: f64,
    #[serde(default = "default_moderately_active")]
    pub moderately_active: f64,
    #[serde(default = "default_very_active")]
    pub very_active: f64,
    #[serde(default = "default_extra_active")]
    pub extra_active: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            sedentary: default_sedentary(),
            lightly_active: default_lightly_active(),
            moderately_active: default_moderately_active(),
            very_active: default_very_active(),
            extra_active: default_extra_active(),
        }
    }
}

/// Macro split and calorie floor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default = "default_protein_g_per_kg")]
    pub protein_g_per_kg: f64,

    #[serde(default = "default_fat_fraction")]
    pub fat_fraction: f64,

    #[serde(default = "default_minimum_calories")]
    pub minimum_calories: i32,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            protein_g_per_kg: default_protein_g_per_kg(),
            fat_fraction: default_fat_fraction(),
            minimum_calories: default_minimum_calories(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir().join(".local/share"));
    base.join("optibody")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_formulas() -> Vec<String> {
    DEFAULT_FORMULAS.iter().map(|f| f.key().to_string()).collect()
}

fn default_sedentary() -> f64 {
    1.2
}

fn default_lightly_active() -> f64 {
    1.375
}

fn default_moderately_active() -> f64 {
    1.55
}

fn default_very_active() -> f64 {
    1.725
}

fn default_extra_active() -> f64 {
    1.9
}

fn default_protein_g_per_kg() -> f64 {
    2.0
}

fn default_fat_fraction() -> f64 {
    0.25
}

fn default_minimum_calories() -> i32 {
    1200
}

impl EngineConfig {
    /// Parse the configured formula keys, preserving order
    pub fn formula_list(&self) -> Result<Vec<BmrFormula>> {
        self.formulas.iter().map(|key| key.parse()).collect()
    }
}

impl ActivityConfig {
    /// Build a validated multiplier table
    pub fn table(&self) -> Result<ActivityMultiplierTable> {
        let entries = [
            (ActivityLevel::Sedentary, self.sedentary),
            (ActivityLevel::LightlyActive, self.lightly_active),
            (ActivityLevel::ModeratelyActive, self.moderately_active),
            (ActivityLevel::VeryActive, self.very_active),
            (ActivityLevel::ExtraActive, self.extra_active),
        ];
        ActivityMultiplierTable::new(entries)
    }
}

impl NutritionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.protein_g_per_kg.is_finite() || self.protein_g_per_kg <= 0.0 {
            return Err(Error::Config(format!(
                "protein_g_per_kg must be positive, got {}",
                self.protein_g_per_kg
            )));
        }
        if !(0.0..1.0).contains(&self.fat_fraction) {
            return Err(Error::Config(format!(
                "fat_fraction must be in [0, 1), got {}",
                self.fat_fraction
            )));
        }
        if self.minimum_calories < 0 {
            return Err(Error::Config(format!(
                "minimum_calories must not be negative, got {}",
                self.minimum_calories
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.nutrition.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"));
        base.join("optibody").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Build the calculation engine described by this configuration
    pub fn engine(&self) -> Result<HealthMetricsEngine> {
        let formulas = self.engine.formula_list()?;
        if formulas.is_empty() {
            tracing::warn!("No BMR formulas configured; every calculation will fail");
        }
        let multipliers = self.activity.table()?;
        Ok(HealthMetricsEngine::new(formulas, multipliers))
    }
}

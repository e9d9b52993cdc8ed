use finz_domain::{ForecastSettings, GoalLimits, GoalSettings};
use serde::{Deserialize, Serialize};

/// User preferences plus the tunable constants of the savings engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub ui_color_enabled: bool,
    pub forecast: ForecastSettings,
    pub analysis: GoalSettings,
    pub limits: GoalLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            ui_color_enabled: true,
            forecast: ForecastSettings::default(),
            analysis: GoalSettings::default(),
            limits: GoalLimits::default(),
        }
    }
}

impl Config {
    /// Parses a configuration document; absent keys keep their defaults.
    pub fn from_json(data: &str) -> Result<Self, crate::ConfigError> {
        serde_json::from_str(data).map_err(|err| crate::ConfigError::Serde(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String, crate::ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| crate::ConfigError::Serde(err.to_string()))
    }
}

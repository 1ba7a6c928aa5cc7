//! Application configuration.
//!
//! `AppConfig` gathers the tunable constants of the teaching tool: the
//! default canvas, the size domain, the circle insets, the quiz end-of-tier
//! policy, and the explanation service settings. It round-trips through
//! JSON so a deployment can ship its own file; `Default` reproduces the
//! stock classroom setup.
//!
//! # Example
//!
//! ```
//! use pixelbits::AppConfig;
//!
//! let config = AppConfig::default();
//! let json = config.to_json().unwrap();
//! let restored = AppConfig::from_json(&json).unwrap();
//! assert_eq!(restored, config);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::patterns::{PRESET_RADIUS_BIAS, SLIDER_RADIUS_BIAS};
use crate::quiz::EndOfTierPolicy;
use crate::size::SizeDomain;
use crate::{PixelError, Result};

/// Default generateContent endpoint; `{model}` is substituted.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent";

/// Default text model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Explanation service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Disabled means every call returns a fallback without any request
    pub enabled: bool,
    /// Endpoint template, `{model}` is replaced with `model`
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Environment variable to read the API key from
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ExplainConfig {
    /// Endpoint with the model substituted.
    pub fn url(&self) -> String {
        self.endpoint.replace("{model}", &self.model)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Side of the canvas on start-up
    pub default_side: usize,
    /// Accepted canvas sizes
    pub sizes: SizeDomain,
    /// Circle inset for the resolution slider preview
    pub slider_radius_bias: f64,
    /// Circle inset for the pattern library
    pub preset_radius_bias: f64,
    /// What happens after the last question of a tier
    pub end_of_tier: EndOfTierPolicy,
    /// Explanation service
    pub explain: ExplainConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_side: 8,
            sizes: SizeDomain::default(),
            slider_radius_bias: SLIDER_RADIUS_BIAS,
            preset_radius_bias: PRESET_RADIUS_BIAS,
            end_of_tier: EndOfTierPolicy::default(),
            explain: ExplainConfig::default(),
        }
    }
}

impl AppConfig {
    /// Check the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        self.sizes.validate()?;
        if !self.sizes.contains(self.default_side) {
            return Err(PixelError::InvalidSize {
                side: self.default_side,
            });
        }
        for bias in [self.slider_radius_bias, self.preset_radius_bias] {
            if !bias.is_finite() {
                return Err(PixelError::Other(format!("radius bias {bias} is not finite")));
            }
        }
        Ok(())
    }

    /// Export configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import and validate configuration from a JSON string.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Export configuration to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Import configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.default_side, 8);
        assert_eq!(config.end_of_tier, EndOfTierPolicy::LoopWithinTier);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{"default_side": 16}"#).unwrap();
        assert_eq!(config.default_side, 16);
        assert_eq!(config.sizes, SizeDomain::default());
        assert_eq!(config.explain.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_rejects_unsupported_default_side() {
        assert!(matches!(
            AppConfig::from_json(r#"{"default_side": 5}"#),
            Err(PixelError::InvalidSize { side: 5 })
        ));
    }

    #[test]
    fn test_policy_json() {
        let config =
            AppConfig::from_json(r#"{"end_of_tier": "advance_to_next_tier"}"#).unwrap();
        assert_eq!(config.end_of_tier, EndOfTierPolicy::AdvanceToNextTier);
    }

    #[test]
    fn test_explain_url() {
        let explain = ExplainConfig::default();
        assert_eq!(
            explain.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join("pixelbits_config_test.json");
        let config = AppConfig {
            default_side: 32,
            ..AppConfig::default()
        };
        config.to_json_file(&path).unwrap();
        let restored = AppConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(restored, config);
    }
}

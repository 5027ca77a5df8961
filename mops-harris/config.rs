use crate::detector::HarrisDetector;
use crate::error::HarrisResult;
use mops_core::MopsConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete detector configuration with all settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Core configuration
    pub core: MopsConfig,
    /// Image dimensions
    pub width: usize,
    pub height: usize,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl DetectorConfig {
    /// Create new configuration with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            core: MopsConfig::default(),
            width,
            height,
            name: None,
            description: None,
        }
    }

    /// Sensitive preset: lower cutoff, more candidate corners
    pub fn sensitive_preset(width: usize, height: usize) -> Self {
        Self {
            core: MopsConfig {
                threshold: 0.05,
                n_threads: num_cpus::get(),
            },
            width,
            height,
            name: Some("Sensitive".to_string()),
            description: Some("Low cutoff for weakly textured images".to_string()),
        }
    }

    /// Strict preset: higher cutoff, only strong corners survive
    pub fn strict_preset(width: usize, height: usize) -> Self {
        Self {
            core: MopsConfig {
                threshold: 0.5,
                n_threads: num_cpus::get(),
            },
            width,
            height,
            name: Some("Strict".to_string()),
            description: Some("High cutoff for strongly textured images".to_string()),
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: {}x{}, threshold={}, threads={}",
            self.width, self.height, self.core.threshold, self.core.n_threads
        )
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Fluent API builder for detector configuration
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: MopsConfig,
    width: usize,
    height: usize,
}

impl DetectorBuilder {
    /// Create new builder with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            config: MopsConfig::default(),
            width,
            height,
        }
    }

    /// Set the Harris response cutoff
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Apply the sensitive preset
    pub fn preset_sensitive(mut self) -> Self {
        let preset = DetectorConfig::sensitive_preset(self.width, self.height);
        self.config = preset.core;
        self
    }

    /// Apply the strict preset
    pub fn preset_strict(mut self) -> Self {
        let preset = DetectorConfig::strict_preset(self.width, self.height);
        self.config = preset.core;
        self
    }

    /// Build the detector
    pub fn build(self) -> HarrisResult<HarrisDetector> {
        HarrisDetector::new(self.config, self.width, self.height)
    }

    /// Create builder from an existing configuration
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.core,
            width: config.width,
            height: config.height,
        }
    }

    /// Convert the builder into a configuration
    pub fn to_config(self) -> DetectorConfig {
        DetectorConfig {
            core: self.config,
            width: self.width,
            height: self.height,
            name: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_threshold() {
        let detector = DetectorBuilder::new(32, 32)
            .threshold(0.4)
            .threads(1)
            .build()
            .unwrap();
        assert_eq!(detector.config().threshold, 0.4);
        assert_eq!(detector.dimensions(), (32, 32));
    }

    #[test]
    fn builder_rejects_bad_threshold() {
        assert!(DetectorBuilder::new(32, 32).threshold(-1.0).build().is_err());
    }

    #[test]
    fn presets_order_thresholds() {
        let sensitive = DetectorConfig::sensitive_preset(64, 64);
        let strict = DetectorConfig::strict_preset(64, 64);
        assert!(sensitive.core.threshold < strict.core.threshold);
    }

    #[test]
    fn config_builder_round_trip() {
        let config = DetectorConfig::new(48, 36).with_metadata("demo", "round trip");
        let rebuilt = DetectorBuilder::from_config(config.clone()).to_config();
        assert_eq!(rebuilt.width, 48);
        assert_eq!(rebuilt.height, 36);
        assert_eq!(rebuilt.core.threshold, config.core.threshold);
    }
}

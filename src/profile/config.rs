//! Configuration for schema profiling

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ProfileError;

/// Default number of values listed per field in reports
pub const DEFAULT_TOP_K: usize = 10;

/// Configuration for schema profiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Maximum number of records to profile (0 = all)
    pub sample_size: usize,

    /// Number of most frequent values reported per field
    pub top_k: usize,

    /// Maximum distinct values tracked per field (0 = exact, unbounded)
    ///
    /// A non-zero value switches histograms to approximate top-K tracking,
    /// keeping memory bounded on high-cardinality fields.
    pub max_tracked_values: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            sample_size: 0, // All records
            top_k: DEFAULT_TOP_K,
            max_tracked_values: 0, // Exact histograms
        }
    }
}

impl ProfileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let config: ProfileConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Histogram capacity, if histograms are bounded
    pub fn histogram_capacity(&self) -> Option<usize> {
        (self.max_tracked_values > 0).then_some(self.max_tracked_values)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.top_k == 0 {
            return Err(ProfileError::InvalidConfig(
                "topK must be at least 1".to_string(),
            ));
        }
        if let Some(capacity) = self.histogram_capacity() {
            if capacity < self.top_k {
                return Err(ProfileError::InvalidConfig(format!(
                    "maxTrackedValues ({}) must not be smaller than topK ({})",
                    capacity, self.top_k
                )));
            }
        }
        Ok(())
    }
}

/// Builder for ProfileConfig
#[derive(Debug, Default)]
pub struct ProfileConfigBuilder {
    config: ProfileConfig,
}

impl ProfileConfigBuilder {
    /// Set the sample size (0 = all records)
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Set the number of values reported per field (minimum 1)
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k.max(1);
        self
    }

    /// Bound histograms to `max` distinct values per field (0 = unbounded)
    pub fn max_tracked_values(mut self, max: usize) -> Self {
        self.config.max_tracked_values = max;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProfileConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProfileConfig::default();
        assert_eq!(config.sample_size, 0);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.histogram_capacity(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ProfileConfig::builder()
            .sample_size(1000)
            .top_k(5)
            .max_tracked_values(100)
            .build();

        assert_eq!(config.sample_size, 1000);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.histogram_capacity(), Some(100));
    }

    #[test]
    fn test_top_k_clamping() {
        let config = ProfileConfig::builder().top_k(0).build();
        assert_eq!(config.top_k, 1);
    }

    #[test]
    fn test_capacity_below_top_k_rejected() {
        let config = ProfileConfig::builder().max_tracked_values(3).build();
        assert!(matches!(
            config.validate(),
            Err(ProfileError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = ProfileConfig::from_toml_str(
            r#"
            sampleSize = 500
            maxTrackedValues = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_size, 500);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.max_tracked_values, 1000);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = ProfileConfig::from_toml_str("topN = 3").unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_toml_validates() {
        let err = ProfileConfig::from_toml_str("topK = 0").unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfig(_)));
    }
}

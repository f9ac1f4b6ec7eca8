//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ScanError;

/// What to do when an entry below the root cannot be read.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record a warning, skip the entry and keep going.
    #[default]
    Skip,
    /// Stop the scan at the first failure.
    Abort,
}

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan. Entry paths are this path joined with child names.
    pub root: PathBuf,

    /// Failure handling for entries below the root.
    #[builder(default)]
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Glob patterns matched against file names; matches are skipped with
    /// their whole subtree.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Maximum depth to traverse (None = unlimited). The root is depth 0.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            Some(_) => {}
        }
        if let Some(ref patterns) = self.ignore_patterns {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| format!("Invalid ignore pattern: {e}"))?;
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            error_policy: ErrorPolicy::Skip,
            ignore_patterns: Vec::new(),
            include_hidden: true,
            max_depth: None,
        }
    }

    /// Compile the ignore patterns into a matcher.
    pub fn ignore_set(&self) -> Result<GlobSet, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
                message: format!("Invalid ignore pattern: {e}"),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ScanError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Check if hidden files should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }

    /// Check if children at `depth` are beyond the depth limit.
    pub fn exceeds_depth(&self, depth: u32) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .error_policy(ErrorPolicy::Abort)
            .max_depth(3u32)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.max_depth, Some(3));
        assert!(config.include_hidden);
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
        assert!(config.ignore_patterns.is_empty());
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let result = ScanConfig::builder()
            .root("/test")
            .ignore_patterns(vec!["[unclosed".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_ignore_set() {
        let config = ScanConfig::builder()
            .root("/test")
            .ignore_patterns(vec!["node_modules".to_string(), "*.log".to_string()])
            .build()
            .unwrap();

        let set = config.ignore_set().unwrap();
        assert!(set.is_match("node_modules"));
        assert!(set.is_match("test.log"));
        assert!(!set.is_match("src"));
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = ScanConfig::new("/test");
        assert!(!config.should_skip_hidden(".git"));

        config.include_hidden = false;
        assert!(config.should_skip_hidden(".git"));
        assert!(!config.should_skip_hidden("src"));
    }

    #[test]
    fn test_exceeds_depth() {
        let mut config = ScanConfig::new("/test");
        assert!(!config.exceeds_depth(100));

        config.max_depth = Some(1);
        assert!(!config.exceeds_depth(1));
        assert!(config.exceeds_depth(2));
    }

    #[test]
    fn test_error_policy_parse() {
        assert_eq!("abort".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Abort);
        assert_eq!(ErrorPolicy::Skip.to_string(), "skip");
    }
}

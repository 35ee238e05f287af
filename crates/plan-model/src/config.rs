//! Shared display configuration
//!
//! One [`DisplayConfig`] instance is shared across every selector in an
//! application so joined display strings render consistently.

use serde::{Deserialize, Serialize};

/// Default separator between joined display names
pub const DEFAULT_SEPARATOR: &str = ",";

/// Display configuration shared across selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Separator placed between display names in joined strings
    pub separator: String,
}

impl DisplayConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the display-name separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_separator() {
        assert_eq!(DisplayConfig::new().separator, ",");
    }

    #[test]
    fn with_separator_overrides() {
        let config = DisplayConfig::new().with_separator("; ");
        assert_eq!(config.separator, "; ");
    }

    #[test]
    fn config_deserializes() {
        let config: DisplayConfig = serde_json::from_str(r#"{"separator":"|"}"#).unwrap();
        assert_eq!(config.separator, "|");
    }
}

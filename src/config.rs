//! Menu engine configuration
//!
//! Plain serde structs with defaults for every field, so a config file only
//! needs to name what it changes:
//!
//! ```toml
//! [dispatcher]
//! cooldown_ms = 200
//! busy_policy = "drop"
//!
//! [pagination]
//! overflow = "truncate"
//! boundary = "inert"
//! ```

use crate::dispatch::BusyPolicy;
use crate::error::MenuResult;
use crate::pagination::{NavBoundary, OverflowStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub dispatcher: DispatcherConfig,
    pub pagination: PaginationConfig,
}

impl MenuConfig {
    /// Parse a TOML document; missing sections and fields take their defaults
    pub fn from_toml_str(raw: &str) -> MenuResult<Self> {
        let config: MenuConfig = toml::from_str(raw)?;
        log::debug!("Loaded menu config: {:?}", config);
        Ok(config)
    }
}

/// Click dispatch settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Minimum time between handled clicks on one menu; 0 disables
    pub cooldown_ms: u64,
    pub busy_policy: BusyPolicy,
}

impl DispatcherConfig {
    pub fn cooldown(&self) -> Option<Duration> {
        match self.cooldown_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn with_cooldown_ms(mut self, ms: u64) -> Self {
        self.cooldown_ms = ms;
        self
    }

    pub fn with_busy_policy(mut self, policy: BusyPolicy) -> Self {
        self.busy_policy = policy;
        self
    }
}

/// Defaults applied to pagination builders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub overflow: OverflowStrategy,
    pub boundary: NavBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.dispatcher.cooldown(), None);
        assert_eq!(config.dispatcher.busy_policy, BusyPolicy::Queue);
        assert_eq!(config.pagination.overflow, OverflowStrategy::ExtraPage);
        assert_eq!(config.pagination.boundary, NavBoundary::Hide);
    }

    #[test]
    fn test_partial_toml() {
        let config = MenuConfig::from_toml_str(
            r#"
            [dispatcher]
            cooldown_ms = 200

            [pagination]
            boundary = "inert"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatcher.cooldown(), Some(Duration::from_millis(200)));
        assert_eq!(config.dispatcher.busy_policy, BusyPolicy::Queue);
        assert_eq!(config.pagination.boundary, NavBoundary::Inert);
        assert_eq!(config.pagination.overflow, OverflowStrategy::ExtraPage);
    }

    #[test]
    fn test_empty_and_invalid_toml() {
        assert_eq!(MenuConfig::from_toml_str("").unwrap(), MenuConfig::default());

        let err = MenuConfig::from_toml_str("[dispatcher]\nbusy_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, crate::MenuError::Config(_)));
    }
}

//! Store configuration and environment overrides.
//!
//! # Responsibility
//! - Hold page size, debounce interval, stale-response policy and the
//!   user-facing messages injected by the UI layer.
//! - Parse `KINSHIP_*` environment overrides.
//!
//! # Invariants
//! - `items_per_page` is always within `1..=ITEMS_PER_PAGE_MAX`.
//! - Invalid override values are errors, never silently ignored.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;
pub const ITEMS_PER_PAGE_MAX: u32 = 100;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

const ENV_ITEMS_PER_PAGE: &str = "KINSHIP_ITEMS_PER_PAGE";
const ENV_DEBOUNCE_MS: &str = "KINSHIP_DEBOUNCE_MS";
const ENV_STALE_POLICY: &str = "KINSHIP_STALE_POLICY";

/// How a store treats a response whose request was superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleResponsePolicy {
    /// A response is dropped once a newer request has written results.
    #[default]
    DiscardSuperseded,
    /// Every response is applied; whichever settles last wins.
    LastSettledWins,
}

impl StaleResponsePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discard_superseded" | "discard" => Some(Self::DiscardSuperseded),
            "last_settled_wins" | "last_wins" => Some(Self::LastSettledWins),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiscardSuperseded => "discard_superseded",
            Self::LastSettledWins => "last_settled_wins",
        }
    }
}

/// Localized user-facing messages owned by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMessages {
    /// Shown when a scoped list is queried without its scope.
    pub scope_missing: String,
    /// Shown when a service failure carries no usable message.
    pub unknown_error: String,
}

impl Default for StoreMessages {
    fn default() -> Self {
        Self {
            scope_missing: "Please select a family first.".to_string(),
            unknown_error: "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Configuration shared by stores and adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub items_per_page: u32,
    /// Call-site debounce applied by adapters' `*_debounced` methods.
    pub debounce: Duration,
    pub stale_policy: StaleResponsePolicy,
    /// Promote load-more to refresh when the filter changed.
    pub guard_filter_changes: bool,
    pub messages: StoreMessages,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            stale_policy: StaleResponsePolicy::default(),
            guard_filter_changes: true,
            messages: StoreMessages::default(),
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults plus process environment overrides.
    ///
    /// # Errors
    /// - Returns [`ConfigError::InvalidValue`] for unparsable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus overrides returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(ENV_ITEMS_PER_PAGE)) {
            let value = raw
                .parse::<u32>()
                .map_err(|_| ConfigError::invalid(ENV_ITEMS_PER_PAGE, &raw, "positive integer"))?;
            config.items_per_page = normalize_items_per_page(Some(value));
        }

        if let Some(raw) = non_blank(lookup(ENV_DEBOUNCE_MS)) {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid(ENV_DEBOUNCE_MS, &raw, "milliseconds"))?;
            config.debounce = Duration::from_millis(millis);
        }

        if let Some(raw) = non_blank(lookup(ENV_STALE_POLICY)) {
            config.stale_policy = StaleResponsePolicy::parse(&raw).ok_or_else(|| {
                ConfigError::invalid(
                    ENV_STALE_POLICY,
                    &raw,
                    "discard_superseded|last_settled_wins",
                )
            })?;
        }

        Ok(config)
    }

    pub fn with_messages(mut self, messages: StoreMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Clamps a requested page size into the supported range.
pub fn normalize_items_per_page(value: Option<u32>) -> u32 {
    match value {
        Some(0) | None => DEFAULT_ITEMS_PER_PAGE,
        Some(value) if value > ITEMS_PER_PAGE_MAX => ITEMS_PER_PAGE_MAX,
        Some(value) => value,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} `{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{
        normalize_items_per_page, ConfigError, StaleResponsePolicy, StoreConfig,
        DEFAULT_ITEMS_PER_PAGE, ITEMS_PER_PAGE_MAX,
    };
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_list_screen_conventions() {
        let config = StoreConfig::default();
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.debounce, Duration::from_millis(400));
        assert_eq!(config.stale_policy, StaleResponsePolicy::DiscardSuperseded);
        assert!(config.guard_filter_changes);
    }

    #[test]
    fn normalize_items_per_page_clamps() {
        assert_eq!(normalize_items_per_page(Some(0)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_items_per_page(None), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_items_per_page(Some(500)), ITEMS_PER_PAGE_MAX);
        assert_eq!(normalize_items_per_page(Some(7)), 7);
    }

    #[test]
    fn overrides_are_applied() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("KINSHIP_ITEMS_PER_PAGE", " 30 "),
            ("KINSHIP_DEBOUNCE_MS", "250"),
            ("KINSHIP_STALE_POLICY", "LAST_SETTLED_WINS"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.items_per_page, 30);
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.stale_policy, StaleResponsePolicy::LastSettledWins);
    }

    #[test]
    fn blank_overrides_keep_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[("KINSHIP_DEBOUNCE_MS", "  ")]))
            .expect("blank values are ignored");
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("KINSHIP_DEBOUNCE_MS", "soon")]))
            .expect_err("non-numeric debounce must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "KINSHIP_DEBOUNCE_MS",
                ..
            }
        ));

        let err = StoreConfig::from_lookup(lookup(&[("KINSHIP_STALE_POLICY", "random")]))
            .expect_err("unknown policy must fail");
        assert!(err.to_string().contains("last_settled_wins"));
    }
}

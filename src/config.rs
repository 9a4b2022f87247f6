use crate::domain::DEFAULT_FALLBACK_CURRENCY;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Defaults suit the demo binary. Each field can be overridden from the
// environment:
//   ORDERS_LOG                 tracing filter (RUST_LOG still wins if set)
//   ORDERS_FALLBACK_CURRENCY   currency for the total of an item-less order
//   ORDERS_METRICS             "false" / "0" disables metric recording
//
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub log_filter: String,
    pub fallback_currency: String,
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,order_lifecycle=debug".to_string(),
            fallback_currency: DEFAULT_FALLBACK_CURRENCY.to_string(),
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup("ORDERS_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(currency) = lookup("ORDERS_FALLBACK_CURRENCY").filter(|v| !v.trim().is_empty()) {
            config.fallback_currency = currency.trim().to_uppercase();
        }

        if let Some(flag) = lookup("ORDERS_METRICS") {
            config.metrics_enabled = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }

        config
    }
}

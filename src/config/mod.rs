use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the domain layer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub pagination: PaginationConfig,
    pub dashboard: DashboardConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let pagination = PaginationConfig {
            default_limit: positive_limit("APP_PAGE_LIMIT", PaginationConfig::DEFAULT_LIMIT)?,
            max_limit: positive_limit("APP_PAGE_LIMIT_MAX", PaginationConfig::DEFAULT_MAX_LIMIT)?,
        };

        let dashboard = DashboardConfig {
            recent_fetch: positive_limit("APP_DASHBOARD_RECENT", DashboardConfig::DEFAULT_RECENT)?
                as usize,
            feed_limit: positive_limit("APP_DASHBOARD_FEED", DashboardConfig::DEFAULT_FEED)?
                as usize,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            pagination,
            dashboard,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn positive_limit(key: &'static str, fallback: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(fallback),
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidLimit { key, value: raw }),
        },
    }
}

/// Defaults applied when a caller omits pagination options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl PaginationConfig {
    const DEFAULT_LIMIT: u32 = 10;
    const DEFAULT_MAX_LIMIT: u32 = 100;
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::DEFAULT_LIMIT,
            max_limit: Self::DEFAULT_MAX_LIMIT,
        }
    }
}

/// Bounds for the dashboard's recent-activity synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Most-recent records fetched per category before merging.
    pub recent_fetch: usize,
    /// Length cap of the merged activity feed.
    pub feed_limit: usize,
}

impl DashboardConfig {
    const DEFAULT_RECENT: u32 = 10;
    const DEFAULT_FEED: u32 = 20;
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_fetch: Self::DEFAULT_RECENT as usize,
            feed_limit: Self::DEFAULT_FEED as usize,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit { key, value } => {
                write!(f, "{key} must be a positive integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_PAGE_LIMIT");
        env::remove_var("APP_PAGE_LIMIT_MAX");
        env::remove_var("APP_DASHBOARD_RECENT");
        env::remove_var("APP_DASHBOARD_FEED");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.max_limit, 100);
        assert_eq!(config.dashboard.recent_fetch, 10);
        assert_eq!(config.dashboard.feed_limit, 20);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn load_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_PAGE_LIMIT", "25");
        env::set_var("APP_DASHBOARD_FEED", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.pagination.default_limit, 25);
        assert_eq!(config.dashboard.feed_limit, 5);
        reset_env();
    }

    #[test]
    fn load_rejects_zero_and_garbage_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PAGE_LIMIT", "0");
        assert!(AppConfig::load().is_err());
        env::set_var("APP_PAGE_LIMIT", "ten");
        assert!(AppConfig::load().is_err());
        reset_env();
    }
}

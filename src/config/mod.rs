use std::env;
use std::fmt;

use crate::assessment::domain::{ModuleCode, Region};
use crate::assessment::validity::ValidityThresholds;

const DEFAULT_RETENTION_DAYS: i64 = 90;
const DEFAULT_MATCH_LIMIT: usize = 10;

/// Engine-wide policy knobs. Scoring rules themselves are fixed and
/// versioned with the reference data; this only covers retention, limits,
/// validity cut-offs, and logging.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Region tried before the Global fallback when an attempt carries no
    /// region of its own.
    pub default_region: Region,
    /// Days a generated report stays valid.
    pub retention_days: i64,
    /// Career matches kept per report unless the caller overrides.
    pub match_limit: usize,
    pub validity: ValidityThresholds,
    /// Modules a comprehensive report requires.
    pub comprehensive_modules: Vec<ModuleCode>,
    pub telemetry: TelemetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_region: Region::global(),
            retention_days: DEFAULT_RETENTION_DAYS,
            match_limit: DEFAULT_MATCH_LIMIT,
            validity: ValidityThresholds::default(),
            comprehensive_modules: ModuleCode::ordered().to_vec(),
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl EngineConfig {
    /// Loads overrides from the environment, falling back to defaults for
    /// anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(region) = env::var("ENGINE_DEFAULT_REGION") {
            if region.trim().is_empty() {
                return Err(ConfigError::EmptyRegion);
            }
            config.default_region = Region::new(region);
        }
        if let Ok(days) = env::var("ENGINE_RETENTION_DAYS") {
            config.retention_days = days
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or(ConfigError::InvalidRetention)?;
        }
        if let Ok(limit) = env::var("ENGINE_MATCH_LIMIT") {
            config.match_limit = limit
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidMatchLimit)?;
        }
        if let Ok(value) = env::var("ENGINE_MIN_CONSISTENCY") {
            config.validity.min_consistency = parse_unit_interval("ENGINE_MIN_CONSISTENCY", &value)?;
        }
        if let Ok(value) = env::var("ENGINE_MIN_DIFFERENTIATION") {
            config.validity.min_differentiation = value
                .parse::<f64>()
                .ok()
                .filter(|spread| spread.is_finite() && *spread >= 0.0)
                .ok_or_else(|| ConfigError::InvalidThreshold {
                    name: "ENGINE_MIN_DIFFERENTIATION",
                })?;
        }
        if let Ok(level) = env::var("ENGINE_LOG_LEVEL") {
            config.telemetry.log_level = level;
        }

        Ok(config)
    }
}

fn parse_unit_interval(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| (0.0..=1.0).contains(parsed))
        .ok_or(ConfigError::InvalidThreshold { name })
}

/// Log verbosity for the optional subscriber set up in [`crate::telemetry`].
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRegion,
    InvalidRetention,
    InvalidMatchLimit,
    InvalidThreshold { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRegion => write!(f, "ENGINE_DEFAULT_REGION must not be empty"),
            ConfigError::InvalidRetention => {
                write!(f, "ENGINE_RETENTION_DAYS must be a positive integer")
            }
            ConfigError::InvalidMatchLimit => {
                write!(f, "ENGINE_MATCH_LIMIT must be a positive integer")
            }
            ConfigError::InvalidThreshold { name } => {
                write!(f, "{name} must be a number in its valid range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

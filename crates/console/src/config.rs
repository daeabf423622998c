//! Console configuration from environment variables.

use thiserror::Error;

use stockkeep_observability::{LogFormat, ParseLogFormatError};

use crate::report::{MoneyFormat, ReportFormat};

pub const LOG_VAR: &str = "STOCKKEEP_LOG";
pub const LOG_FORMAT_VAR: &str = "STOCKKEEP_LOG_FORMAT";
pub const CURRENCY_SYMBOL_VAR: &str = "STOCKKEEP_CURRENCY_SYMBOL";
pub const CURRENCY_DECIMALS_VAR: &str = "STOCKKEEP_CURRENCY_DECIMALS";
pub const REPORT_FORMAT_VAR: &str = "STOCKKEEP_REPORT_FORMAT";
pub const MAX_TOP_N_VAR: &str = "STOCKKEEP_MAX_TOP_N";

const MAX_CURRENCY_DECIMALS: u32 = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_directive: String,
    pub log_format: LogFormat,
    pub money: MoneyFormat,
    pub report_format: ReportFormat,
    /// Upper bound accepted for N at the summary prompt.
    pub max_top_n: i64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_directive: "warn".to_owned(),
            log_format: LogFormat::Text,
            money: MoneyFormat::default(),
            report_format: ReportFormat::Text,
            max_top_n: 20,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset or blank variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(directive) = get(LOG_VAR) {
            config.log_directive = directive;
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .map_err(|e: ParseLogFormatError| ConfigError::invalid(LOG_FORMAT_VAR, e.to_string()))?;
        }
        if let Some(symbol) = get(CURRENCY_SYMBOL_VAR) {
            config.money.symbol = symbol;
        }
        if let Some(raw) = get(CURRENCY_DECIMALS_VAR) {
            let digits: u32 = raw
                .parse()
                .map_err(|_| ConfigError::invalid(CURRENCY_DECIMALS_VAR, format!("not a number: {raw:?}")))?;
            if digits > MAX_CURRENCY_DECIMALS {
                return Err(ConfigError::invalid(
                    CURRENCY_DECIMALS_VAR,
                    format!("must be at most {MAX_CURRENCY_DECIMALS}"),
                ));
            }
            config.money.fraction_digits = digits;
        }
        if let Some(raw) = get(REPORT_FORMAT_VAR) {
            config.report_format = raw
                .parse::<ReportFormat>()
                .map_err(|e| ConfigError::invalid(REPORT_FORMAT_VAR, e.to_string()))?;
        }
        if let Some(raw) = get(MAX_TOP_N_VAR) {
            let max: i64 = raw
                .parse()
                .map_err(|_| ConfigError::invalid(MAX_TOP_N_VAR, format!("not a number: {raw:?}")))?;
            if max < 1 {
                return Err(ConfigError::invalid(MAX_TOP_N_VAR, "must be at least 1"));
            }
            config.max_top_n = max;
        }

        Ok(config)
    }
}

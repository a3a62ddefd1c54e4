use crate::handlers::reaper::{FailurePolicy, ReapOptions};

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const REGION_ENV: &str = "REAPER_REGION";
pub const FAILURE_POLICY_ENV: &str = "REAPER_FAILURE_POLICY";

/// Per-invocation settings, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaperConfig {
    pub region: String,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ReaperConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let region = non_blank(lookup(REGION_ENV)).unwrap_or_else(|| DEFAULT_REGION.to_string());
        let failure_policy = match non_blank(lookup(FAILURE_POLICY_ENV)) {
            None => FailurePolicy::default(),
            Some(value) => parse_failure_policy(&value)?,
        };

        Ok(Self {
            region,
            failure_policy,
        })
    }

    pub fn reap_options(&self) -> ReapOptions {
        ReapOptions {
            failure_policy: self.failure_policy,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_failure_policy(value: &str) -> Result<FailurePolicy, ConfigError> {
    let normalized = value.to_ascii_lowercase();
    serde_json::from_value(serde_json::Value::String(normalized.clone())).map_err(|_| {
        ConfigError::new(format!(
            "{FAILURE_POLICY_ENV} must be `fail_fast` or `continue`, got `{normalized}`"
        ))
    })
}

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::countdown::ResendCountdown;

pub const RELAYER_ADDRESS: &str = "relayer@sendeth.org";
pub const DEFAULT_ONBOARD_ENDPOINT: &str = "https://localhost:3000/api/onboard";
pub const COUNTDOWN_SECONDS: u32 = 60;
pub const TICK_INTERVAL_MS: u64 = 1_000;
pub const COUNTDOWN_CEILING_MS: u64 = 60_000;
pub const SMALL_SCREEN_MAX_WIDTH: u32 = 768;
pub const TEST_AMOUNT_CAP: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "DAI")]
    Dai,
    #[default]
    #[serde(rename = "TEST")]
    Test,
}

impl Currency {
    pub const ALL: [Self; 3] = [Self::Usdc, Self::Dai, Self::Test];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usdc => "USDC",
            Self::Dai => "DAI",
            Self::Test => "TEST",
        }
    }

    /// Only the test token carries an amount cap.
    #[must_use]
    pub const fn is_capped(self) -> bool {
        matches!(self, Self::Test)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Runtime settings for the transfer form. The shell may ship its own copy
/// as JSON; anything omitted keeps the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub relayer_address: String,
    pub onboard_endpoint: String,
    pub countdown_seconds: u32,
    pub tick_interval_ms: u64,
    pub ceiling_ms: u64,
    pub small_screen_max_width: u32,
    pub test_amount_cap: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            relayer_address: RELAYER_ADDRESS.to_string(),
            onboard_endpoint: DEFAULT_ONBOARD_ENDPOINT.to_string(),
            countdown_seconds: COUNTDOWN_SECONDS,
            tick_interval_ms: TICK_INTERVAL_MS,
            ceiling_ms: COUNTDOWN_CEILING_MS,
            small_screen_max_width: SMALL_SCREEN_MAX_WIDTH,
            test_amount_cap: TEST_AMOUNT_CAP,
        }
    }
}

impl FormConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !crate::compose::is_valid_email(&self.relayer_address) {
            return Err(ConfigError::Invalid {
                field: "relayer_address",
                reason: format!("'{}' is not an email address", self.relayer_address),
            });
        }
        crate::capabilities::onboarding_url(&self.onboard_endpoint, "").map_err(|e| {
            ConfigError::Invalid {
                field: "onboard_endpoint",
                reason: e.to_string(),
            }
        })?;
        if self.countdown_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "countdown_seconds",
                reason: "must be at least 1".into(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be at least 1".into(),
            });
        }
        if self.ceiling_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "ceiling_ms",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Component-local form state. Rebuilt from events only; nothing here is
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub from_email: String,
    pub to_email: String,
    pub amount_text: String,
    pub amount: Option<u64>,
    pub currency: Currency,
    pub dropdown_open: bool,
    /// Last reported viewport width; `None` until the shell reports one.
    pub viewport_width: Option<u32>,
    pub countdown: ResendCountdown,
    pub email_sent: bool,
    pub recipient_copied: bool,
    pub subject_copied: bool,
    pub config: FormConfig,
}

impl Model {
    #[must_use]
    pub fn is_small_screen(&self) -> bool {
        self.viewport_width
            .is_some_and(|width| width <= self.config.small_screen_max_width)
    }

    #[must_use]
    pub fn send_enabled(&self) -> bool {
        self.amount.is_some_and(|amount| amount > 0)
            && crate::compose::is_valid_email(&self.to_email)
    }

    #[must_use]
    pub fn subject(&self) -> String {
        crate::compose::transfer_subject(self.amount, self.currency, &self.to_email)
    }
}

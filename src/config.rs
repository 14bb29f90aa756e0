use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::types::SimpleInterestBase;

/// Kathmandu is five hours forty-five minutes ahead of UTC
pub const NEPAL_OFFSET_MINUTES: i32 = 5 * 60 + 45;

/// fixed offsets must stay strictly within one day of UTC
pub const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub accrual: AccrualConfig,
    pub clock: ClockConfig,
}

/// how partial-period interest is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualConfig {
    /// base for the monthly and daily simple tiers
    pub simple_interest_base: SimpleInterestBase,
    /// days per month for the daily tier
    pub day_basis: u32,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            simple_interest_base: SimpleInterestBase::CompoundedAmount,
            day_basis: 30,
        }
    }
}

impl AccrualConfig {
    /// monthly and daily tiers on the original principal
    pub fn on_original_principal() -> Self {
        Self {
            simple_interest_base: SimpleInterestBase::OriginalPrincipal,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.day_basis == 0 {
            return Err(LedgerError::invalid_input("day_basis", "must be greater than zero"));
        }
        Ok(())
    }
}

/// zone used to decide which calendar day "today" is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockConfig {
    /// the device's local time zone
    #[default]
    Local,
    /// a fixed offset from UTC
    FixedOffset { offset_minutes: i32 },
}

impl ClockConfig {
    /// Asia/Kathmandu, UTC+05:45
    pub fn nepal() -> Self {
        ClockConfig::FixedOffset {
            offset_minutes: NEPAL_OFFSET_MINUTES,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let ClockConfig::FixedOffset { offset_minutes } = *self {
            if offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES as u32 {
                return Err(LedgerError::invalid_input(
                    "offset_minutes",
                    format!("{} is not within a day of UTC", offset_minutes),
                ));
            }
        }
        Ok(())
    }
}

impl EngineConfig {
    /// standard setup for a device in Nepal
    pub fn nepal() -> Self {
        Self {
            accrual: AccrualConfig::default(),
            clock: ClockConfig::nepal(),
        }
    }

    /// parse from json and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| LedgerError::invalid_input("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        self.accrual.validate()?;
        self.clock.validate()
    }
}

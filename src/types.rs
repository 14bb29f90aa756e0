use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

/// which side of the loan the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanDirection {
    /// the user lent money out
    Given,
    /// the user borrowed money
    Received,
}

impl LoanDirection {
    /// +1 for given, -1 for received
    pub fn sign(&self) -> i64 {
        match self {
            LoanDirection::Given => 1,
            LoanDirection::Received => -1,
        }
    }
}

impl fmt::Display for LoanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanDirection::Given => write!(f, "given"),
            LoanDirection::Received => write!(f, "received"),
        }
    }
}

impl FromStr for LoanDirection {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "given" => Ok(LoanDirection::Given),
            "received" => Ok(LoanDirection::Received),
            other => Err(LedgerError::invalid_input(
                "direction",
                format!("expected given or received, got {:?}", other),
            )),
        }
    }
}

/// what a net balance means for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// counterparty still owes the user
    ToReceive,
    /// user still owes the counterparty
    ToPay,
    /// counterparty repaid more than was due on a given loan
    OverpaidByCounterparty,
    /// user repaid more than was due on a received loan
    OverpaidByUser,
    Settled,
}

impl BalanceStatus {
    /// true when the counterparty ends up owing the user
    pub fn favours_user(&self) -> bool {
        matches!(self, BalanceStatus::ToReceive | BalanceStatus::OverpaidByUser)
    }
}

/// base amount the monthly and daily simple-interest tiers apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SimpleInterestBase {
    /// principal after whole-year compounding
    #[default]
    CompoundedAmount,
    /// the original principal, ignoring compounding
    OriginalPrincipal,
}

/// whole years, months and days between two BS dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Elapsed {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Elapsed {
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self { years, months, days }
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m {}d", self.years, self.months, self.days)
    }
}

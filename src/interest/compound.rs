use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// Grow `principal` by one year of interest at twelve times the monthly
/// rate, `years` times over. Each year compounds on the previous year's
/// grown amount.
pub fn compound_yearly(principal: Money, rate: Rate, years: u32) -> Result<Money> {
    yearly_factor(rate, years)
        .and_then(|factor| principal.checked_mul(factor))
        .ok_or_else(|| {
            LedgerError::invalid_input(
                "principal",
                format!("{} at {} overflows after {} years", principal, rate, years),
            )
        })
}

/// growth factor for whole years, (1 + 12r/100)^years; None on overflow
pub fn yearly_factor(rate: Rate, years: u32) -> Option<Decimal> {
    let base = rate.annual_factor()?;
    let mut factor = Decimal::ONE;
    for _ in 0..years {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}

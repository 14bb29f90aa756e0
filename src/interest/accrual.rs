use log::debug;
use rust_decimal::Decimal;

use crate::calendar::{decompose_elapsed, BsDate};
use crate::config::AccrualConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::compound::compound_yearly;
use crate::interest::{InterestCalculationResult, InterestCalculator};
use crate::types::SimpleInterestBase;

/// Interest over a BS span in three tiers.
///
/// Whole elapsed years compound once a year at twelve times the monthly
/// rate. The leftover months and days then earn simple interest on a base
/// that does not grow: by default the compounded amount, or the original
/// principal when configured so. The daily rate is the monthly rate divided
/// by the configured days per month (30 unless set otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccrualEngine {
    pub config: AccrualConfig,
}

impl AccrualEngine {
    pub fn new(config: AccrualConfig) -> Self {
        Self { config }
    }

    /// reject inputs the tiers cannot be applied to
    pub fn validate_inputs(&self, principal: Money, rate: Rate) -> Result<()> {
        self.config.validate()?;
        if !principal.is_positive() {
            return Err(LedgerError::invalid_input(
                "principal",
                format!("must be greater than zero, got {}", principal),
            ));
        }
        if rate.is_negative() {
            return Err(LedgerError::invalid_input(
                "rate",
                format!("must not be negative, got {}", rate.as_percent()),
            ));
        }
        Ok(())
    }

    /// simple interest for whole months on a fixed base
    pub fn months_interest(&self, base: Money, rate: Rate, months: u32) -> Result<Money> {
        simple_interest(base, rate.monthly_fraction(), months)
    }

    /// simple interest for days on a fixed base
    pub fn days_interest(&self, base: Money, rate: Rate, days: u32) -> Result<Money> {
        let daily = rate
            .daily_fraction(self.config.day_basis)
            .ok_or_else(|| LedgerError::invalid_input("day_basis", "must be greater than zero"))?;
        simple_interest(base, daily, days)
    }

    fn simple_base(&self, principal: Money, compounded: Money) -> Money {
        match self.config.simple_interest_base {
            SimpleInterestBase::CompoundedAmount => compounded,
            SimpleInterestBase::OriginalPrincipal => principal,
        }
    }
}

/// base * fraction * periods, or an error when it does not fit
fn simple_interest(base: Money, fraction: Decimal, periods: u32) -> Result<Money> {
    fraction
        .checked_mul(Decimal::from(periods))
        .and_then(|per_unit| base.checked_mul(per_unit))
        .ok_or_else(|| overflow(base))
}

fn overflow(amount: Money) -> LedgerError {
    LedgerError::invalid_input("principal", format!("interest on {} overflows", amount))
}

impl InterestCalculator for AccrualEngine {
    fn calculate(
        &self,
        principal: Money,
        rate: Rate,
        start: &BsDate,
        end: &BsDate,
    ) -> Result<InterestCalculationResult> {
        self.validate_inputs(principal, rate)?;
        let elapsed = decompose_elapsed(start, end)?;

        let compounded = compound_yearly(principal, rate, elapsed.years)?;
        let base = self.simple_base(principal, compounded);
        let months_interest = self.months_interest(base, rate, elapsed.months)?;
        let days_interest = self.days_interest(base, rate, elapsed.days)?;

        let final_amount = compounded
            .checked_add(months_interest)
            .and_then(|amount| amount.checked_add(days_interest))
            .ok_or_else(|| overflow(principal))?;
        let total_interest = final_amount - principal;

        debug!(
            "interest on {} at {} from {} to {} ({}): total {}",
            principal, rate, start, end, elapsed, total_interest
        );

        Ok(InterestCalculationResult {
            principal,
            monthly_rate: rate,
            start_date: *start,
            end_date: *end,
            elapsed_years: elapsed.years,
            elapsed_months: elapsed.months,
            elapsed_days: elapsed.days,
            compounded_amount: compounded,
            months_interest,
            days_interest,
            total_interest,
            final_amount,
        })
    }
}

/// calculate with the default configuration
pub fn calculate(
    principal: Money,
    rate: Rate,
    start: &BsDate,
    end: &BsDate,
) -> Result<InterestCalculationResult> {
    AccrualEngine::default().calculate(principal, rate, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bs(y: i32, m: u32, d: u32) -> BsDate {
        BsDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_elapsed() {
        let engine = AccrualEngine::default();
        let principal = Money::from_str_exact("25000.50").unwrap();
        let date = bs(2080, 6, 12);

        let result = engine
            .calculate(principal, Rate::from_percentage(3), &date, &date)
            .unwrap();

        assert_eq!(result.total_interest, Money::ZERO);
        assert_eq!(result.final_amount, principal);
        assert!(result.elapsed().is_zero());
    }

    #[test]
    fn test_whole_years_only() {
        let engine = AccrualEngine::default();
        let result = engine
            .calculate(
                Money::from_major(100_000),
                Rate::from_percentage(2),
                &bs(2079, 1, 1),
                &bs(2081, 1, 1),
            )
            .unwrap();

        assert_eq!((result.elapsed_years, result.elapsed_months, result.elapsed_days), (2, 0, 0));
        assert_eq!(result.compounded_amount, Money::from_major(153_760));
        assert_eq!(result.months_interest, Money::ZERO);
        assert_eq!(result.days_interest, Money::ZERO);
        assert_eq!(result.total_interest, Money::from_major(53_760));
        assert_eq!(result.final_amount, Money::from_major(153_760));
    }

    #[test]
    fn test_days_only() {
        let engine = AccrualEngine::default();
        let result = engine
            .calculate(
                Money::from_major(50_000),
                Rate::from_monthly_percent(dec!(1.5)),
                &bs(2080, 3, 10),
                &bs(2080, 3, 25),
            )
            .unwrap();

        assert_eq!(result.elapsed(), crate::types::Elapsed::new(0, 0, 15));
        assert_eq!(result.compound_interest(), Money::ZERO);
        assert_eq!(result.months_interest, Money::ZERO);
        assert_eq!(result.days_interest, Money::from_major(375));
        assert_eq!(result.final_amount, Money::from_major(50_375));
    }

    #[test]
    fn test_all_tiers_on_compounded_amount() {
        let engine = AccrualEngine::default();
        let result = engine
            .calculate(
                Money::from_major(100_000),
                Rate::from_percentage(2),
                &bs(2079, 1, 15),
                &bs(2081, 5, 20),
            )
            .unwrap();

        assert_eq!((result.elapsed_years, result.elapsed_months, result.elapsed_days), (2, 4, 5));
        assert_eq!(result.months_interest.as_decimal(), dec!(12300.8));
        assert_eq!(result.days_interest.as_decimal(), dec!(512.53333333));
        assert_eq!(result.total_interest.as_decimal(), dec!(66573.33333333));
        assert_eq!(result.final_amount.as_decimal(), dec!(166573.33333333));

        let display = result.rounded_for_display();
        assert_eq!(display.final_amount.as_decimal(), dec!(166573.33));
    }

    #[test]
    fn test_all_tiers_on_original_principal() {
        let engine = AccrualEngine::new(AccrualConfig::on_original_principal());
        let result = engine
            .calculate(
                Money::from_major(100_000),
                Rate::from_percentage(2),
                &bs(2079, 1, 15),
                &bs(2081, 5, 20),
            )
            .unwrap();

        assert_eq!(result.compounded_amount, Money::from_major(153_760));
        assert_eq!(result.months_interest, Money::from_major(8_000));
        assert_eq!(result.days_interest.as_decimal(), dec!(333.33333333));
        assert_eq!(result.total_interest.as_decimal(), dec!(62093.33333333));
    }

    #[test]
    fn test_months_do_not_compound() {
        let engine = AccrualEngine::default();
        let result = engine
            .calculate(
                Money::from_major(10_000),
                Rate::from_percentage(1),
                &bs(2080, 1, 1),
                &bs(2080, 12, 1),
            )
            .unwrap();

        assert_eq!(result.elapsed(), crate::types::Elapsed::new(0, 11, 0));
        assert_eq!(result.months_interest, Money::from_major(1_100));
        assert_eq!(result.final_amount, Money::from_major(11_100));
    }

    #[test]
    fn test_custom_day_basis() {
        let engine = AccrualEngine::new(AccrualConfig {
            day_basis: 32,
            ..AccrualConfig::default()
        });
        let interest = engine
            .days_interest(Money::from_major(3_200), Rate::from_percentage(1), 16)
            .unwrap();
        assert_eq!(interest, Money::from_major(16));
    }

    #[test]
    fn test_long_span_overflow_is_an_error() {
        // 90 whole years at 10% monthly does not fit in a decimal
        let err = AccrualEngine::default()
            .calculate(
                Money::from_major(1_000_000),
                Rate::from_percentage(10),
                &bs(2000, 1, 1),
                &bs(2090, 12, 30),
            )
            .unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_simple_tiers_overflow_is_an_error() {
        let engine = AccrualEngine::default();
        let huge = Money::from_decimal(Decimal::MAX);
        let err = engine.months_interest(huge, Rate::from_percentage(50), 11).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
        assert!(engine.days_interest(huge, Rate::from_percentage(200), 29).is_err());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let engine = AccrualEngine::default();
        let start = bs(2080, 1, 1);
        let end = bs(2080, 2, 1);

        let err = engine
            .calculate(Money::ZERO, Rate::from_percentage(2), &start, &end)
            .unwrap_err();
        assert_eq!(err.field(), Some("principal"));

        let err = engine
            .calculate(Money::from_major(100), Rate::from_monthly_percent(dec!(-0.5)), &start, &end)
            .unwrap_err();
        assert_eq!(err.field(), Some("rate"));

        let err = engine
            .calculate(Money::from_major(100), Rate::from_percentage(2), &end, &start)
            .unwrap_err();
        assert_eq!(err.field(), Some("end"));
    }

    #[test]
    fn test_free_function_uses_defaults() {
        let start = bs(2080, 3, 10);
        let end = bs(2080, 3, 25);
        let a = calculate(Money::from_major(50_000), Rate::from_monthly_percent(dec!(1.5)), &start, &end).unwrap();
        let b = AccrualEngine::default()
            .calculate(Money::from_major(50_000), Rate::from_monthly_percent(dec!(1.5)), &start, &end)
            .unwrap();
        assert_eq!(a, b);
    }
}

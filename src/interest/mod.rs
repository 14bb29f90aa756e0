pub mod accrual;
pub mod compound;

use serde::{Deserialize, Serialize};

use crate::calendar::BsDate;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::Elapsed;

pub use accrual::AccrualEngine;
pub use compound::{compound_yearly, yearly_factor};

/// tiered interest breakdown for one principal over one BS span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCalculationResult {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub start_date: BsDate,
    pub end_date: BsDate,
    pub elapsed_years: u32,
    pub elapsed_months: u32,
    pub elapsed_days: u32,
    /// principal after whole-year compounding
    pub compounded_amount: Money,
    pub months_interest: Money,
    pub days_interest: Money,
    pub total_interest: Money,
    pub final_amount: Money,
}

impl InterestCalculationResult {
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::new(self.elapsed_years, self.elapsed_months, self.elapsed_days)
    }

    /// interest earned by the yearly compounding tier alone
    pub fn compound_interest(&self) -> Money {
        self.compounded_amount - self.principal
    }

    /// copy with every amount rounded to whole paisa, for display
    pub fn rounded_for_display(&self) -> Self {
        Self {
            principal: self.principal.round_paisa(),
            compounded_amount: self.compounded_amount.round_paisa(),
            months_interest: self.months_interest.round_paisa(),
            days_interest: self.days_interest.round_paisa(),
            total_interest: self.total_interest.round_paisa(),
            final_amount: self.final_amount.round_paisa(),
            ..self.clone()
        }
    }
}

/// trait for interest calculations over BS dates
pub trait InterestCalculator {
    fn calculate(
        &self,
        principal: Money,
        rate: Rate,
        start: &BsDate,
        end: &BsDate,
    ) -> Result<InterestCalculationResult>;
}

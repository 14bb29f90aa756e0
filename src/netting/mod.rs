pub mod validation;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::{BsDate, TodayResolver};
use crate::config::AccrualConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{AccrualEngine, InterestCalculationResult, InterestCalculator};
use crate::types::{BalanceStatus, LoanDirection};

pub use validation::{validate_ledger, validate_ledger_all};

/// one partial repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentRecord {
    pub amount: Money,
    pub date: BsDate,
}

/// a loan and the repayments made against it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanLedger {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub loan_date: BsDate,
    pub direction: LoanDirection,
    pub repayments: Vec<RepaymentRecord>,
}

impl LoanLedger {
    pub fn new(principal: Money, monthly_rate: Rate, loan_date: BsDate, direction: LoanDirection) -> Self {
        Self {
            principal,
            monthly_rate,
            loan_date,
            direction,
            repayments: Vec::new(),
        }
    }

    /// builder-style repayment
    pub fn with_repayment(mut self, amount: Money, date: BsDate) -> Self {
        self.add_repayment(amount, date);
        self
    }

    pub fn add_repayment(&mut self, amount: Money, date: BsDate) {
        self.repayments.push(RepaymentRecord { amount, date });
    }

    /// face value of all repayments, without interest
    pub fn total_repaid(&self) -> Money {
        self.repayments.iter().map(|r| r.amount).sum()
    }
}

/// outstanding balance of a ledger as of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalanceResult {
    pub as_of: BsDate,
    pub direction: LoanDirection,
    /// loan principal grown with interest up to `as_of`
    pub total_amount_due: Money,
    /// repayments each grown with their own interest up to `as_of`
    pub repayments_value_today: Money,
    /// `total_amount_due - repayments_value_today`
    pub net_balance: Money,
    pub status: BalanceStatus,
    pub loan_interest: InterestCalculationResult,
    pub repayment_interest: Vec<InterestCalculationResult>,
}

impl NetBalanceResult {
    /// positive when the counterparty owes the user, negative when the user owes them
    pub fn signed_balance(&self) -> Money {
        match self.direction {
            LoanDirection::Given => self.net_balance,
            LoanDirection::Received => -self.net_balance,
        }
    }

    /// amount shown next to the status, always non-negative
    pub fn display_amount(&self) -> Money {
        self.net_balance.abs().round_paisa()
    }
}

/// meaning of a net balance for the given loan direction
pub fn balance_status(direction: LoanDirection, net_balance: Money) -> BalanceStatus {
    if net_balance.is_zero() {
        return BalanceStatus::Settled;
    }
    match (direction, net_balance.is_positive()) {
        (LoanDirection::Given, true) => BalanceStatus::ToReceive,
        (LoanDirection::Given, false) => BalanceStatus::OverpaidByCounterparty,
        (LoanDirection::Received, true) => BalanceStatus::ToPay,
        (LoanDirection::Received, false) => BalanceStatus::OverpaidByUser,
    }
}

/// Nets a loan against its repayments.
///
/// The loan and each repayment are run through the accrual engine
/// separately up to the same evaluation date, so money returned earlier
/// offsets more of the debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NettingEngine {
    accrual: AccrualEngine,
}

impl NettingEngine {
    pub fn new(config: AccrualConfig) -> Self {
        Self {
            accrual: AccrualEngine::new(config),
        }
    }

    pub fn accrual(&self) -> &AccrualEngine {
        &self.accrual
    }

    /// validate the ledger, then net it as of `as_of`
    pub fn net_balance(&self, ledger: &LoanLedger, as_of: &BsDate) -> Result<NetBalanceResult> {
        validate_ledger(ledger, as_of)?;
        self.net(ledger, as_of)
    }

    /// net as of today's BS date from `resolver`
    pub fn net_balance_today(
        &self,
        ledger: &LoanLedger,
        resolver: &TodayResolver,
    ) -> Result<NetBalanceResult> {
        let today = resolver.today();
        self.net_balance(ledger, &today)
    }

    /// netting only; callers are expected to have validated the ledger
    pub fn net(&self, ledger: &LoanLedger, as_of: &BsDate) -> Result<NetBalanceResult> {
        let loan_interest = self.accrual.calculate(
            ledger.principal,
            ledger.monthly_rate,
            &ledger.loan_date,
            as_of,
        )?;

        let repayment_interest = ledger
            .repayments
            .iter()
            .map(|r| self.accrual.calculate(r.amount, ledger.monthly_rate, &r.date, as_of))
            .collect::<Result<Vec<_>>>()?;

        let total_amount_due = loan_interest.final_amount;
        let repayments_value_today: Money = repayment_interest.iter().map(|r| r.final_amount).sum();
        let net_balance = total_amount_due - repayments_value_today;
        let status = balance_status(ledger.direction, net_balance);

        debug!(
            "{} loan of {} as of {}: due {}, repaid value {}, net {} ({:?})",
            ledger.direction,
            ledger.principal,
            as_of,
            total_amount_due,
            repayments_value_today,
            net_balance,
            status
        );

        Ok(NetBalanceResult {
            as_of: *as_of,
            direction: ledger.direction,
            total_amount_due,
            repayments_value_today,
            net_balance,
            status,
            loan_interest,
            repayment_interest,
        })
    }
}

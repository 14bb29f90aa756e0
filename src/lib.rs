pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod ledger;
pub mod netting;
pub mod types;

// re-export key types
pub use calendar::{
    ad_to_bs, bs_to_ad, decompose_elapsed, difference_in_days, get_current_bs_date, BsDate,
    BsMonth, ResolvedDate, TodayResolver,
};
pub use config::{AccrualConfig, ClockConfig, EngineConfig};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result, ValidationErrors};
pub use interest::{AccrualEngine, InterestCalculationResult, InterestCalculator};
pub use ledger::{
    dashboard_totals, running_balances, summarize_customers, CustomerSummary, DashboardTotals,
    TransactionEntry,
};
pub use netting::{LoanLedger, NetBalanceResult, NettingEngine, RepaymentRecord};
pub use types::{BalanceStatus, Elapsed, LoanDirection, SimpleInterestBase};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;

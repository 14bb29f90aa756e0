pub mod dashboard;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::BsDate;
use crate::decimal::Money;
use crate::types::LoanDirection;

pub use dashboard::{dashboard_totals, summarize_customers, CustomerStatus, CustomerSummary, DashboardTotals};

/// unique identifier for a ledger entry
pub type EntryId = Uuid;

/// one "you gave" / "you got" entry against a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub id: EntryId,
    pub customer: String,
    pub amount: Money,
    pub direction: LoanDirection,
    pub date: BsDate,
    pub description: Option<String>,
}

impl TransactionEntry {
    pub fn new(customer: impl Into<String>, amount: Money, direction: LoanDirection, date: BsDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer: customer.into(),
            amount,
            direction,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// +amount when given, -amount when received
    pub fn impact(&self) -> Money {
        match self.direction {
            LoanDirection::Given => self.amount,
            LoanDirection::Received => -self.amount,
        }
    }

    /// customer names match ignoring case and surrounding space
    pub fn is_for(&self, customer: &str) -> bool {
        customer_key(&self.customer) == customer_key(customer)
    }
}

pub(crate) fn customer_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// "ram  BAHADUR " -> "Ram  Bahadur": first letter of each word upper, rest lower
pub fn display_name(name: &str) -> String {
    name.trim()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// an entry paired with the customer's balance right after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub entry: TransactionEntry,
    pub balance_after: Money,
}

/// Running balance over entries in the order given (oldest first).
///
/// Entries are not re-sorted; callers pass them in recording order.
pub fn running_balances(entries: &[TransactionEntry]) -> Vec<BalanceLine> {
    let mut balance = Money::ZERO;
    entries
        .iter()
        .map(|entry| {
            balance += entry.impact();
            BalanceLine {
                entry: entry.clone(),
                balance_after: balance,
            }
        })
        .collect()
}

/// running balance for one customer only
pub fn customer_history(entries: &[TransactionEntry], customer: &str) -> Vec<BalanceLine> {
    let own: Vec<TransactionEntry> = entries.iter().filter(|e| e.is_for(customer)).cloned().collect();
    running_balances(&own)
}

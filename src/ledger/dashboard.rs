use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::ledger::{customer_key, display_name, TransactionEntry};
use crate::netting::NetBalanceResult;
use crate::types::BalanceStatus;

/// whether a customer still has an open balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Settled,
}

impl CustomerStatus {
    fn from_balance(balance: Money) -> Self {
        if balance.is_zero() {
            CustomerStatus::Settled
        } else {
            CustomerStatus::Active
        }
    }
}

/// per-customer totals for the dashboard list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// first recorded name, capitalized word by word
    pub customer: String,
    /// sum of absolute entry amounts
    pub total_amount: Money,
    /// positive when the customer owes the user
    pub net_balance: Money,
    pub transaction_count: usize,
    pub status: CustomerStatus,
}

/// Group entries by customer, case-insensitively.
///
/// Summaries are returned with open balances first, largest first, then by
/// name.
pub fn summarize_customers(entries: &[TransactionEntry]) -> Vec<CustomerSummary> {
    let mut by_key: BTreeMap<String, CustomerSummary> = BTreeMap::new();

    for entry in entries {
        let summary = by_key
            .entry(customer_key(&entry.customer))
            .or_insert_with(|| CustomerSummary {
                customer: display_name(&entry.customer),
                total_amount: Money::ZERO,
                net_balance: Money::ZERO,
                transaction_count: 0,
                status: CustomerStatus::Settled,
            });
        summary.total_amount += entry.amount.abs();
        summary.net_balance += entry.impact();
        summary.transaction_count += 1;
        summary.status = CustomerStatus::from_balance(summary.net_balance);
    }

    let mut summaries: Vec<CustomerSummary> = by_key.into_values().collect();
    summaries.sort_by(|a, b| {
        let a_open = a.status == CustomerStatus::Active;
        let b_open = b.status == CustomerStatus::Active;
        b_open
            .cmp(&a_open)
            .then(b.net_balance.cmp(&a.net_balance))
            .then(a.customer.cmp(&b.customer))
    });
    summaries
}

/// totals across every customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardTotals {
    /// sum of balances customers owe the user
    pub to_receive: Money,
    /// sum of balances the user owes customers, as a positive amount
    pub to_give: Money,
    /// balances counted, settled ones included
    pub total_customers: usize,
}

impl DashboardTotals {
    pub fn add_balance(&mut self, balance: Money) {
        self.total_customers += 1;
        if balance.is_positive() {
            self.to_receive += balance;
        } else if balance.is_negative() {
            self.to_give += balance.abs();
        }
    }

    /// to_receive - to_give
    pub fn net(&self) -> Money {
        self.to_receive - self.to_give
    }

    pub fn is_settled(&self) -> bool {
        self.net().is_zero()
    }

    /// overall position of the user across every customer
    pub fn status(&self) -> BalanceStatus {
        let net = self.net();
        if net.is_positive() {
            BalanceStatus::ToReceive
        } else if net.is_negative() {
            BalanceStatus::ToPay
        } else {
            BalanceStatus::Settled
        }
    }

    /// totals from interest-netted loans, using each loan's signed balance
    pub fn from_net_balances<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a NetBalanceResult>,
    {
        dashboard_totals(results.into_iter().map(|r| r.signed_balance()))
    }

    pub fn from_summaries(summaries: &[CustomerSummary]) -> Self {
        dashboard_totals(summaries.iter().map(|s| s.net_balance))
    }
}

/// sum positive balances into to_receive and negative ones into to_give
pub fn dashboard_totals<I>(balances: I) -> DashboardTotals
where
    I: IntoIterator<Item = Money>,
{
    let mut totals = DashboardTotals::default();
    for balance in balances {
        totals.add_balance(balance);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::BsDate;
    use crate::decimal::Rate;
    use crate::netting::{LoanLedger, NettingEngine};
    use crate::types::LoanDirection;

    fn bs(y: i32, m: u32, d: u32) -> BsDate {
        BsDate::new(y, m, d).unwrap()
    }

    fn entry(customer: &str, amount: i64, direction: LoanDirection) -> TransactionEntry {
        TransactionEntry::new(customer, Money::from_major(amount), direction, bs(2081, 5, 10))
    }

    #[test]
    fn test_summaries_group_and_order() {
        let entries = vec![
            entry("Ram", 500, LoanDirection::Given),
            entry("Sita", 300, LoanDirection::Received),
            entry("ram", 200, LoanDirection::Received),
            entry("Hari", 100, LoanDirection::Given),
            entry("Hari", 100, LoanDirection::Received),
            entry("Gita", 900, LoanDirection::Given),
        ];

        let summaries = summarize_customers(&entries);
        let names: Vec<&str> = summaries.iter().map(|s| s.customer.as_str()).collect();
        assert_eq!(names, vec!["Gita", "Ram", "Sita", "Hari"]);

        let ram = &summaries[1];
        assert_eq!(ram.net_balance, Money::from_major(300));
        assert_eq!(ram.total_amount, Money::from_major(700));
        assert_eq!(ram.transaction_count, 2);
        assert_eq!(ram.status, CustomerStatus::Active);

        assert_eq!(summaries[3].status, CustomerStatus::Settled);
    }

    #[test]
    fn test_summary_names_are_capitalized() {
        let entries = vec![
            entry("ram bahadur", 500, LoanDirection::Given),
            entry("RAM BAHADUR", 100, LoanDirection::Received),
        ];
        let summaries = summarize_customers(&entries);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].customer, "Ram Bahadur");
        assert_eq!(summaries[0].net_balance, Money::from_major(400));
    }

    #[test]
    fn test_totals_from_summaries() {
        let entries = vec![
            entry("Ram", 500, LoanDirection::Given),
            entry("Sita", 300, LoanDirection::Received),
            entry("Gita", 900, LoanDirection::Given),
        ];
        let totals = DashboardTotals::from_summaries(&summarize_customers(&entries));

        assert_eq!(totals.to_receive, Money::from_major(1_400));
        assert_eq!(totals.to_give, Money::from_major(300));
        assert_eq!(totals.net(), Money::from_major(1_100));
        assert_eq!(totals.total_customers, 3);
        assert_eq!(totals.status(), BalanceStatus::ToReceive);
        assert!(!totals.is_settled());
    }

    #[test]
    fn test_settled_customers_are_counted() {
        let entries = vec![
            entry("Hari", 100, LoanDirection::Given),
            entry("Hari", 100, LoanDirection::Received),
            entry("Sita", 300, LoanDirection::Received),
        ];
        let totals = DashboardTotals::from_summaries(&summarize_customers(&entries));

        assert_eq!(totals.total_customers, 2);
        assert_eq!(totals.to_receive, Money::ZERO);
        assert_eq!(totals.to_give, Money::from_major(300));
        assert_eq!(totals.status(), BalanceStatus::ToPay);
    }

    #[test]
    fn test_totals_from_netted_loans() {
        let engine = NettingEngine::default();
        let as_of = bs(2081, 1, 1);

        let lent = LoanLedger::new(
            Money::from_major(100_000),
            Rate::from_percentage(2),
            bs(2079, 1, 1),
            LoanDirection::Given,
        )
        .with_repayment(Money::from_major(40_000), bs(2080, 1, 1));
        let borrowed = LoanLedger::new(
            Money::from_major(10_000),
            Rate::from_percentage(1),
            bs(2080, 1, 1),
            LoanDirection::Received,
        );

        let results = vec![
            engine.net_balance(&lent, &as_of).unwrap(),
            engine.net_balance(&borrowed, &as_of).unwrap(),
        ];
        let totals = DashboardTotals::from_net_balances(&results);

        assert_eq!(totals.to_receive, Money::from_major(104_160));
        assert_eq!(totals.to_give, Money::from_major(11_200));
        assert_eq!(totals.net(), Money::from_major(92_960));
        assert_eq!(totals.total_customers, 2);
    }

    #[test]
    fn test_empty_dashboard_is_settled() {
        let totals = dashboard_totals(Vec::<Money>::new());
        assert!(totals.is_settled());
        assert_eq!(totals.status(), BalanceStatus::Settled);
        assert_eq!(totals.total_customers, 0);
        assert_eq!(totals, DashboardTotals::default());
    }
}

/// dashboard - running balances and totals across customers
use sambat_ledger::ledger::customer_history;
use sambat_ledger::{
    summarize_customers, BsDate, DashboardTotals, LoanDirection, Money, TransactionEntry,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== dashboard example ===\n");

    let entries = vec![
        TransactionEntry::new("Ram", Money::from_major(5_000), LoanDirection::Given, BsDate::new(2081, 1, 5)?),
        TransactionEntry::new("Sita", Money::from_major(2_500), LoanDirection::Received, BsDate::new(2081, 1, 9)?),
        TransactionEntry::new("Ram", Money::from_major(1_200), LoanDirection::Received, BsDate::new(2081, 2, 1)?)
            .with_description("partial cash"),
        TransactionEntry::new("Hari", Money::from_major(800), LoanDirection::Given, BsDate::new(2081, 2, 3)?),
        TransactionEntry::new("hari", Money::from_major(800), LoanDirection::Received, BsDate::new(2081, 2, 20)?),
    ];

    println!("ram's history:");
    for line in customer_history(&entries, "ram") {
        println!(
            "  {}  {:>8} {:<8}  balance {}",
            line.entry.date.long_format(),
            line.entry.amount,
            line.entry.direction,
            line.balance_after
        );
    }

    let summaries = summarize_customers(&entries);
    println!("\ncustomers:");
    for summary in &summaries {
        println!("  {:<6} {:>8}  {:?}", summary.customer, summary.net_balance, summary.status);
    }

    let totals = DashboardTotals::from_summaries(&summaries);
    println!("\nto receive: rs {}", totals.to_receive);
    println!("to give: rs {}", totals.to_give);
    println!("net: rs {}", totals.net());
    println!("{} customers, overall {:?}", totals.total_customers, totals.status());

    Ok(())
}

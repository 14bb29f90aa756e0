/// netting - a loan with partial repayments, each earning interest
use sambat_ledger::{BsDate, LoanDirection, LoanLedger, Money, NettingEngine, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== netting example ===\n");

    let ledger = LoanLedger::new(
        Money::from_major(100_000),
        Rate::from_percentage(2),
        BsDate::new(2079, 1, 1)?,
        LoanDirection::Given,
    )
    .with_repayment(Money::from_major(40_000), BsDate::new(2080, 1, 1)?)
    .with_repayment(Money::from_major(15_000), BsDate::new(2080, 8, 12)?);

    let engine = NettingEngine::default();
    let as_of = BsDate::new(2081, 1, 1)?;
    let result = engine.net_balance(&ledger, &as_of)?;

    println!("as of {}", result.as_of);
    println!("loan grown to: rs {}", result.total_amount_due.round_paisa());
    for (repayment, grown) in ledger.repayments.iter().zip(&result.repayment_interest) {
        println!(
            "repaid rs {} on {} -> worth rs {} ({})",
            repayment.amount,
            repayment.date,
            grown.final_amount.round_paisa(),
            grown.elapsed()
        );
    }
    println!("repayments worth: rs {}", result.repayments_value_today.round_paisa());
    println!("\n{:?}: rs {}", result.status, result.display_amount());

    // repayment after the evaluation date is rejected before any interest math
    let late = ledger.clone().with_repayment(Money::from_major(1_000), BsDate::new(2081, 2, 1)?);
    if let Err(e) = engine.net_balance(&late, &as_of) {
        println!("\nrejected: {}", e);
    }

    Ok(())
}

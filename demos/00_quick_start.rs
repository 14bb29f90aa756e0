/// quick start - interest on a loan between two BS dates
use rust_decimal_macros::dec;
use sambat_ledger::{AccrualEngine, BsDate, InterestCalculator, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = AccrualEngine::default();
    let start: BsDate = "2079-01-15".parse()?;
    let end: BsDate = "2081-05-20".parse()?;

    let result = engine.calculate(
        Money::from_major(100_000),
        Rate::from_monthly_percent(dec!(2)),
        &start,
        &end,
    )?;

    println!("=== quick start ===\n");
    println!("period: {} -> {} ({})", start, end, result.elapsed());
    println!("after yearly compounding: rs {}", result.compounded_amount.round_paisa());
    println!("months interest: rs {}", result.months_interest.round_paisa());
    println!("days interest: rs {}", result.days_interest.round_paisa());
    println!("total interest: rs {}", result.total_interest.round_paisa());
    println!("final amount: rs {}", result.final_amount.round_paisa());

    Ok(())
}

/// calendar - AD/BS conversion and today's date
use sambat_ledger::calendar::{almanac, converter};
use sambat_ledger::chrono::NaiveDate;
use sambat_ledger::{ad_to_bs, bs_to_ad, BsDate, ClockConfig, TodayResolver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== calendar example ===\n");

    let resolver = TodayResolver::with_clock(ClockConfig::nepal());
    let today = resolver.resolve();
    println!("today in Kathmandu: {} ({})", today.date, today.date.long_format());
    if today.degraded {
        println!("clock is outside the supported table, showing boundary date");
    }

    let ad = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad AD date")?;
    let bs = ad_to_bs(ad)?;
    println!("\nAD {} is BS {}", ad, bs);
    println!("and back again: AD {}", bs_to_ad(&bs)?);

    let new_year = BsDate::new(2081, 1, 1)?;
    println!("\nBS {} falls on AD {}", new_year, bs_to_ad(&new_year)?);

    let from = BsDate::new(2080, 3, 10)?;
    let to = BsDate::new(2081, 5, 2)?;
    println!(
        "\n{} -> {}: {} days, {}",
        from,
        to,
        converter::difference_in_days(&from, &to),
        converter::decompose_elapsed(&from, &to)?
    );

    println!("\nsupported span: {} to {}", almanac::min_date(), almanac::max_date());
    match BsDate::new(2081, 4, 33) {
        Ok(date) => println!("unexpected: {}", date),
        Err(e) => println!("rejected 2081/04/33: {}", e),
    }
    match BsDate::new(2095, 1, 1) {
        Ok(date) => println!("unexpected: {}", date),
        Err(e) => println!("rejected 2095/01/01: {}", e.user_message()),
    }

    Ok(())
}

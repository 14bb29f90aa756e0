//! AD <-> BS conversion.
//!
//! Every conversion goes through the number of days since the epoch anchor
//! (BS 2000/01/01 = AD 1943-04-14). The almanac is walked year by year and
//! month by month; nothing is extrapolated past the published table.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use log::debug;

use crate::calendar::almanac;
use crate::calendar::date::BsDate;
use crate::errors::{LedgerError, Result};
use crate::types::Elapsed;

/// days between the epoch anchor and `date`
pub fn day_offset(date: &BsDate) -> i64 {
    let year_start = almanac::year_start_offset(date.year()).unwrap_or(0) as i64;
    let months = almanac::lookup(date.year()).unwrap_or([0; 12]);
    let month_days: i64 = months[..(date.month() - 1) as usize]
        .iter()
        .map(|&d| d as i64)
        .sum();
    year_start + month_days + (date.day() as i64 - 1)
}

/// BS date lying `offset` days after the anchor
pub fn from_day_offset(offset: i64) -> Result<BsDate> {
    if offset < 0 || offset >= almanac::total_days() as i64 {
        return Err(LedgerError::out_of_range(format!(
            "day offset {} outside the BS table",
            offset
        )));
    }

    let mut remaining = offset as u32;
    let mut year = almanac::MIN_YEAR;
    loop {
        let days = almanac::days_in_year(year)?;
        if remaining < days {
            break;
        }
        remaining -= days;
        year += 1;
    }

    let months = almanac::lookup(year)?;
    let mut month = 1u32;
    for &len in months.iter() {
        let len = len as u32;
        if remaining < len {
            break;
        }
        remaining -= len;
        month += 1;
    }

    Ok(BsDate::from_parts_unchecked(year, month, remaining + 1))
}

/// convert an AD calendar date to BS
pub fn ad_to_bs(ad: NaiveDate) -> Result<BsDate> {
    let offset = (ad - almanac::epoch_anchor()).num_days();
    from_day_offset(offset).map_err(|_| {
        LedgerError::out_of_range(format!(
            "AD {} outside {}..={}",
            ad,
            almanac::epoch_anchor(),
            bs_to_ad(&almanac::max_date()).unwrap_or(ad)
        ))
    })
}

/// convert an AD timestamp to BS using the calendar day in its own zone
pub fn ad_datetime_to_bs<Tz: TimeZone>(at: &DateTime<Tz>) -> Result<BsDate> {
    ad_to_bs(at.date_naive())
}

/// convert a BS date to AD
pub fn bs_to_ad(bs: &BsDate) -> Result<NaiveDate> {
    let offset = day_offset(bs);
    let ad = almanac::epoch_anchor()
        .checked_add_days(Days::new(offset as u64))
        .ok_or_else(|| LedgerError::out_of_range(format!("BS {} has no AD equivalent", bs)))?;
    debug!("bs {} -> ad {} (offset {})", bs, ad, offset);
    Ok(ad)
}

/// validate raw parts and convert them to AD
pub fn bs_parts_to_ad(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    let bs = BsDate::new(year, month, day)?;
    bs_to_ad(&bs)
}

/// signed day count from `from` to `to`; positive when `to` is later
pub fn difference_in_days(from: &BsDate, to: &BsDate) -> i64 {
    day_offset(to) - day_offset(from)
}

/// move by whole months, keeping `day` where the target month allows it
fn shift_months(date: &BsDate, months: u32, day: u32) -> Result<BsDate> {
    let index = date.year() as i64 * 12 + (date.month() as i64 - 1) + months as i64;
    let year = (index / 12) as i32;
    let month = (index % 12) as u32 + 1;
    let length = almanac::month_length(year, month)?;
    Ok(BsDate::from_parts_unchecked(year, month, day.min(length)))
}

/// Split the span between two dates into whole years, then whole months,
/// then days.
///
/// Years are counted first by stepping the start date forward a year at a
/// time while the step stays on or before `end`; months are counted the same
/// way from there and the leftover is a plain day difference. When the start
/// day does not exist in a target month it is clamped to that month's last
/// day. The order is significant and must stay years, months, days.
pub fn decompose_elapsed(start: &BsDate, end: &BsDate) -> Result<Elapsed> {
    if end < start {
        return Err(LedgerError::invalid_input(
            "end",
            format!("end date {} is before start date {}", end, start),
        ));
    }

    let anchor_day = start.day();

    let mut years = 0u32;
    let mut cursor = *start;
    loop {
        match shift_months(start, (years + 1) * 12, anchor_day) {
            Ok(next) if next <= *end => {
                years += 1;
                cursor = next;
            }
            _ => break,
        }
    }

    let year_mark = cursor;
    let mut months = 0u32;
    loop {
        match shift_months(&year_mark, months + 1, anchor_day) {
            Ok(next) if next <= *end => {
                months += 1;
                cursor = next;
            }
            _ => break,
        }
    }

    let days = difference_in_days(&cursor, end) as u32;
    let elapsed = Elapsed::new(years, months, days);
    debug!("elapsed {} -> {} = {}", start, end, elapsed);
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(y: i32, m: u32, d: u32) -> BsDate {
        BsDate::new(y, m, d).unwrap()
    }

    fn ad(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_new_years() {
        assert_eq!(ad_to_bs(ad(1943, 4, 14)).unwrap(), bs(2000, 1, 1));
        assert_eq!(ad_to_bs(ad(2023, 4, 14)).unwrap(), bs(2080, 1, 1));
        assert_eq!(ad_to_bs(ad(2024, 4, 13)).unwrap(), bs(2081, 1, 1));
        assert_eq!(bs_to_ad(&bs(2081, 1, 1)).unwrap(), ad(2024, 4, 13));
    }

    #[test]
    fn test_known_mid_year_dates() {
        assert_eq!(ad_to_bs(ad(2000, 1, 1)).unwrap(), bs(2056, 9, 17));
        assert_eq!(ad_to_bs(ad(2024, 1, 1)).unwrap(), bs(2080, 9, 16));
        assert_eq!(ad_to_bs(ad(1990, 6, 15)).unwrap(), bs(2047, 3, 1));
        assert_eq!(bs_to_ad(&bs(2081, 4, 32)).unwrap(), ad(2024, 8, 16));
    }

    #[test]
    fn test_out_of_range() {
        assert!(ad_to_bs(ad(1943, 4, 13)).unwrap_err().is_out_of_range());
        assert_eq!(ad_to_bs(ad(2034, 4, 13)).unwrap(), bs(2090, 12, 30));
        assert!(ad_to_bs(ad(2034, 4, 14)).unwrap_err().is_out_of_range());
        assert!(from_day_offset(-1).is_err());
    }

    #[test]
    fn test_bs_parts_validation() {
        assert!(bs_parts_to_ad(2081, 4, 32).is_ok());
        assert!(matches!(
            bs_parts_to_ad(2081, 4, 33),
            Err(LedgerError::InvalidDate { .. })
        ));
        assert!(bs_parts_to_ad(1999, 12, 30).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_round_trip_every_ad_date() {
        let first = almanac::epoch_anchor();
        let last = bs_to_ad(&almanac::max_date()).unwrap();
        let mut day = first;
        while day <= last {
            let converted = ad_to_bs(day).unwrap();
            assert_eq!(bs_to_ad(&converted).unwrap(), day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_round_trip_every_bs_date() {
        for year in almanac::MIN_YEAR..=almanac::MAX_YEAR {
            for month in 1..=12 {
                for day in 1..=almanac::month_length(year, month).unwrap() {
                    let date = bs(year, month, day);
                    assert_eq!(ad_to_bs(bs_to_ad(&date).unwrap()).unwrap(), date);
                }
            }
        }
    }

    #[test]
    fn test_difference_is_strictly_monotonic() {
        let start = bs(2079, 11, 20);
        let mut current = start;
        let mut previous = difference_in_days(&start, &current);
        assert_eq!(previous, 0);
        for _ in 0..800 {
            current = current.succ().unwrap();
            let diff = difference_in_days(&start, &current);
            assert_eq!(diff, previous + 1);
            assert_eq!(difference_in_days(&current, &start), -diff);
            previous = diff;
        }
    }

    #[test]
    fn test_datetime_uses_zone_day() {
        use chrono::{FixedOffset, Utc};

        // 2024-04-12 20:00 UTC is already 2024-04-13 in Kathmandu
        let utc = Utc.with_ymd_and_hms(2024, 4, 12, 20, 0, 0).unwrap();
        let nepal = utc.with_timezone(&FixedOffset::east_opt(345 * 60).unwrap());
        assert_eq!(ad_datetime_to_bs(&utc).unwrap(), bs(2080, 12, 30));
        assert_eq!(ad_datetime_to_bs(&nepal).unwrap(), bs(2081, 1, 1));
    }

    #[test]
    fn test_decompose_exact_years() {
        assert_eq!(decompose_elapsed(&bs(2078, 1, 1), &bs(2080, 1, 1)).unwrap(), Elapsed::new(2, 0, 0));
        assert_eq!(decompose_elapsed(&bs(2079, 1, 1), &bs(2081, 1, 1)).unwrap(), Elapsed::new(2, 0, 0));
    }

    #[test]
    fn test_decompose_days_only() {
        assert_eq!(decompose_elapsed(&bs(2080, 3, 10), &bs(2080, 3, 25)).unwrap(), Elapsed::new(0, 0, 15));
        assert!(decompose_elapsed(&bs(2080, 3, 10), &bs(2080, 3, 10)).unwrap().is_zero());
    }

    #[test]
    fn test_decompose_mixed() {
        assert_eq!(decompose_elapsed(&bs(2079, 1, 15), &bs(2081, 5, 20)).unwrap(), Elapsed::new(2, 4, 5));
        assert_eq!(decompose_elapsed(&bs(2079, 1, 15), &bs(2081, 5, 10)).unwrap(), Elapsed::new(2, 3, 27));
    }

    #[test]
    fn test_decompose_clamps_missing_day() {
        // Jestha has 32 days in 2080 but 31 in 2081
        assert_eq!(decompose_elapsed(&bs(2080, 2, 32), &bs(2081, 3, 5)).unwrap(), Elapsed::new(1, 0, 5));
    }

    #[test]
    fn test_decompose_rejects_reversed_span() {
        let err = decompose_elapsed(&bs(2080, 1, 2), &bs(2080, 1, 1)).unwrap_err();
        assert_eq!(err.field(), Some("end"));
    }
}

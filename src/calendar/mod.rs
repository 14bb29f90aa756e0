pub mod almanac;
pub mod converter;
pub mod date;
pub mod today;

pub use converter::{
    ad_datetime_to_bs, ad_to_bs, bs_parts_to_ad, bs_to_ad, decompose_elapsed, difference_in_days,
};
pub use date::{BsDate, BsMonth};
pub use today::{get_current_bs_date, ResolvedDate, TodayResolver};

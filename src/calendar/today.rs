use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::warn;

use crate::calendar::almanac;
use crate::calendar::converter;
use crate::calendar::date::BsDate;
use crate::config::ClockConfig;

/// today's BS date and whether it had to be clamped to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: BsDate,
    /// true when the clock fell outside the almanac and a boundary was used
    pub degraded: bool,
}

/// Resolves "today" in BS terms from a clock.
///
/// Unlike the converter this never fails: a clock outside the supported
/// span is clamped to the nearest boundary and flagged as degraded.
pub struct TodayResolver {
    time: SafeTimeProvider,
    clock: ClockConfig,
}

impl TodayResolver {
    pub fn new(time: SafeTimeProvider, clock: ClockConfig) -> Self {
        Self { time, clock }
    }

    /// system clock in the device's local zone
    pub fn system() -> Self {
        Self::new(SafeTimeProvider::new(TimeSource::System), ClockConfig::Local)
    }

    /// system clock with an explicit zone setting
    pub fn with_clock(clock: ClockConfig) -> Self {
        Self::new(SafeTimeProvider::new(TimeSource::System), clock)
    }

    pub fn time_provider(&self) -> &SafeTimeProvider {
        &self.time
    }

    pub fn clock(&self) -> ClockConfig {
        self.clock
    }

    /// current AD calendar day in the configured zone
    pub fn current_ad_date(&self) -> NaiveDate {
        local_day(self.time.now(), self.clock)
    }

    pub fn resolve(&self) -> ResolvedDate {
        resolve_ad_date(self.current_ad_date())
    }

    /// today's BS date, clamped if necessary
    pub fn today(&self) -> BsDate {
        self.resolve().date
    }
}

impl Default for TodayResolver {
    fn default() -> Self {
        Self::system()
    }
}

/// today's BS date from the system clock in the local zone
pub fn get_current_bs_date() -> BsDate {
    TodayResolver::system().today()
}

/// convert a clock reading to BS, clamping to the table instead of failing
pub fn resolve_ad_date(ad: NaiveDate) -> ResolvedDate {
    match converter::ad_to_bs(ad) {
        Ok(date) => ResolvedDate { date, degraded: false },
        Err(err) => {
            let date = if ad < almanac::epoch_anchor() {
                almanac::min_date()
            } else {
                almanac::max_date()
            };
            warn!("today ({}) not convertible: {}; using {}", ad, err, date);
            ResolvedDate { date, degraded: true }
        }
    }
}

fn local_day(now: DateTime<Utc>, clock: ClockConfig) -> NaiveDate {
    match clock {
        ClockConfig::Local => now.with_timezone(&Local).date_naive(),
        ClockConfig::FixedOffset { offset_minutes } => {
            let zone = offset_minutes.checked_mul(60).and_then(FixedOffset::east_opt);
            match zone {
                Some(zone) => now.with_timezone(&zone).date_naive(),
                None => {
                    warn!("invalid clock offset {} minutes, using UTC", offset_minutes);
                    now.date_naive()
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::almanac;
use crate::calendar::converter;
use crate::errors::{LedgerError, Result};

/// Bikram Sambat month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BsMonth {
    Baishakh = 1,
    Jestha = 2,
    Ashadh = 3,
    Shrawan = 4,
    Bhadra = 5,
    Ashwin = 6,
    Kartik = 7,
    Mangsir = 8,
    Poush = 9,
    Magh = 10,
    Falgun = 11,
    Chaitra = 12,
}

impl BsMonth {
    pub const ALL: [BsMonth; 12] = [
        BsMonth::Baishakh,
        BsMonth::Jestha,
        BsMonth::Ashadh,
        BsMonth::Shrawan,
        BsMonth::Bhadra,
        BsMonth::Ashwin,
        BsMonth::Kartik,
        BsMonth::Mangsir,
        BsMonth::Poush,
        BsMonth::Magh,
        BsMonth::Falgun,
        BsMonth::Chaitra,
    ];

    /// month from its 1-based number
    pub fn from_number(month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::invalid_date(format!(
                "month {} is not between 1 and 12",
                month
            )));
        }
        Ok(Self::ALL[(month - 1) as usize])
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            BsMonth::Baishakh => "Baishakh",
            BsMonth::Jestha => "Jestha",
            BsMonth::Ashadh => "Ashadh",
            BsMonth::Shrawan => "Shrawan",
            BsMonth::Bhadra => "Bhadra",
            BsMonth::Ashwin => "Ashwin",
            BsMonth::Kartik => "Kartik",
            BsMonth::Mangsir => "Mangsir",
            BsMonth::Poush => "Poush",
            BsMonth::Magh => "Magh",
            BsMonth::Falgun => "Falgun",
            BsMonth::Chaitra => "Chaitra",
        }
    }
}

impl fmt::Display for BsMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A validated Bikram Sambat calendar date.
///
/// The day never exceeds the published length of its month, so every
/// `BsDate` in hand can be converted to AD without further checks.
/// Serialized as `YYYY-MM-DD`, the key format used by stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BsDate {
    year: i32,
    month: u32,
    day: u32,
}

impl BsDate {
    /// create a date, checking it against the almanac
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let length = almanac::month_length(year, month)?;
        if day == 0 || day > length {
            return Err(LedgerError::invalid_date(format!(
                "day {} outside 1..={} for {}/{:02}",
                day, length, year, month
            )));
        }
        Ok(Self { year, month, day })
    }

    /// caller guarantees the parts come from the almanac
    pub(crate) fn from_parts_unchecked(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn bs_month(&self) -> BsMonth {
        BsMonth::ALL[(self.month - 1) as usize]
    }

    /// number of days in this date's month
    pub fn month_length(&self) -> u32 {
        almanac::month_length(self.year, self.month).unwrap_or(self.day)
    }

    /// next calendar day
    pub fn succ(&self) -> Result<Self> {
        if self.day < self.month_length() {
            return Ok(Self::from_parts_unchecked(self.year, self.month, self.day + 1));
        }
        if self.month < 12 {
            return Ok(Self::from_parts_unchecked(self.year, self.month + 1, 1));
        }
        almanac::lookup(self.year + 1)?;
        Ok(Self::from_parts_unchecked(self.year + 1, 1, 1))
    }

    /// previous calendar day
    pub fn pred(&self) -> Result<Self> {
        if self.day > 1 {
            return Ok(Self::from_parts_unchecked(self.year, self.month, self.day - 1));
        }
        let (year, month) = if self.month > 1 {
            (self.year, self.month - 1)
        } else {
            (self.year - 1, 12)
        };
        let day = almanac::month_length(year, month)?;
        Ok(Self::from_parts_unchecked(year, month, day))
    }

    /// shift by a signed number of days
    pub fn add_days(&self, days: i64) -> Result<Self> {
        let offset = converter::day_offset(self) + days;
        converter::from_day_offset(offset)
    }

    /// `DD MonthName YYYY`, as shown on day headers
    pub fn long_format(&self) -> String {
        format!("{:02} {} {}", self.day, self.bs_month(), self.year)
    }
}

impl fmt::Display for BsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for BsDate {
    type Err = LedgerError;

    /// accepts `YYYY-MM-DD` or `YYYY/MM/DD`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(|c| c == '-' || c == '/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(LedgerError::invalid_date(format!("malformed BS date {:?}", s)));
        }

        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| LedgerError::invalid_date(format!("bad year in {:?}", s)))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| LedgerError::invalid_date(format!("bad month in {:?}", s)))?;
        let day = parts[2]
            .parse::<u32>()
            .map_err(|_| LedgerError::invalid_date(format!("bad day in {:?}", s)))?;

        BsDate::new(year, month, day)
    }
}

impl TryFrom<String> for BsDate {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BsDate> for String {
    fn from(date: BsDate) -> String {
        format!("{}-{:02}-{:02}", date.year, date.month, date.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_length_invariant() {
        // Shrawan 2081 has 32 days
        assert!(BsDate::new(2081, 4, 32).is_ok());
        let err = BsDate::new(2081, 4, 33).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate { .. }));

        assert!(BsDate::new(2081, 1, 0).is_err());
        assert!(BsDate::new(2081, 13, 1).is_err());
        assert!(BsDate::new(2100, 1, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_every_published_length_accepted() {
        for year in almanac::MIN_YEAR..=almanac::MAX_YEAR {
            for month in 1..=12 {
                let len = almanac::month_length(year, month).unwrap();
                assert!(BsDate::new(year, month, len).is_ok());
                assert!(matches!(
                    BsDate::new(year, month, len + 1),
                    Err(LedgerError::InvalidDate { .. })
                ));
            }
        }
    }

    #[test]
    fn test_parse_and_format() {
        let date: BsDate = "2081-04-09".parse().unwrap();
        assert_eq!(date.year(), 2081);
        assert_eq!(date.month(), 4);
        assert_eq!(date.day(), 9);
        assert_eq!(date.to_string(), "2081/04/09");
        assert_eq!(date.long_format(), "09 Shrawan 2081");

        let slashed: BsDate = "2081/4/9".parse().unwrap();
        assert_eq!(slashed, date);

        assert!("2081-04".parse::<BsDate>().is_err());
        assert!("2081-xx-01".parse::<BsDate>().is_err());
        assert!("2081--01".parse::<BsDate>().is_err());
    }

    #[test]
    fn test_serde_as_storage_key() {
        let date = BsDate::new(2080, 3, 10).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2080-03-10\"");

        let back: BsDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);

        assert!(serde_json::from_str::<BsDate>("\"2080-03-33\"").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = BsDate::new(2079, 12, 30).unwrap();
        let b = BsDate::new(2080, 1, 1).unwrap();
        let c = BsDate::new(2080, 1, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_succ_and_pred_cross_year() {
        let last = BsDate::new(2079, 12, 30).unwrap();
        let first = last.succ().unwrap();
        assert_eq!(first, BsDate::new(2080, 1, 1).unwrap());
        assert_eq!(first.pred().unwrap(), last);

        assert!(almanac::max_date().succ().unwrap_err().is_out_of_range());
        assert!(almanac::min_date().pred().unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_add_days() {
        let date = BsDate::new(2080, 3, 10).unwrap();
        assert_eq!(date.add_days(15).unwrap(), BsDate::new(2080, 3, 25).unwrap());
        assert_eq!(date.add_days(-10).unwrap(), BsDate::new(2080, 2, 32).unwrap());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(BsMonth::from_number(1).unwrap().name(), "Baishakh");
        assert_eq!(BsMonth::from_number(12).unwrap(), BsMonth::Chaitra);
        assert_eq!(BsMonth::Poush.number(), 9);
        assert!(BsMonth::from_number(0).is_err());
    }
}

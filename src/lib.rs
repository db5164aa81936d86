//! Gregorian to Vietnamese lunar calendar (âm lịch) conversion.
//!
//! New moons and solar longitude are approximated with truncated astronomical
//! series, so results are trustworthy for Gregorian years between
//! [`MIN_SUPPORTED_YEAR`] and [`MAX_SUPPORTED_YEAR`].
//!
//! ```
//! use amlich::{GregorianDate, LunarConverter};
//!
//! let converter = LunarConverter::default();
//! let date: GregorianDate = "2024-02-10".parse().unwrap();
//! let lunar = converter.convert(&date).unwrap();
//!
//! assert_eq!((1, 1, 2024, false), lunar.to_tuple());
//! assert_eq!("1/1 ÂL", converter.short_label(&date).unwrap());
//! assert_eq!("Giáp Thìn", converter.can_chi_year(&date).unwrap().to_string());
//! ```
//!
//! The raw numeric routines live in [`astro`] and [`solar_to_lunar`]; they
//! never fail and never validate.

pub mod astro;
mod can_chi;
mod consts;
mod converter;
mod lunar;
mod prelude;
mod range;
mod types;

pub use can_chi::{Can, CanChi, Chi};
pub use consts::*;
pub use converter::{ConvertError, ConverterConfig, LunarConverter, Validation};
pub use lunar::{LunarDate, solar_to_lunar};
pub use range::{LunarMonthSpan, SpanError};
pub use types::{Day, Month, Year, is_leap_year};
use types::days_in_month;

use crate::prelude::*;
use std::str::FromStr;

/// A validated date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct GregorianDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl GregorianDate {
    /// Builds a date from its components, checking each of them.
    ///
    /// # Errors
    /// Returns the `DateError` of the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Builds a date from a Julian day number.
    ///
    /// Returns `None` outside years `1..=MAX_YEAR`.
    pub fn from_jdn(jdn: i64) -> Option<Self> {
        let (y, m, d) = astro::jdn_to_gregorian(jdn);
        Self::new(
            u16::try_from(y).ok()?,
            u8::try_from(m).ok()?,
            u8::try_from(d).ok()?,
        )
        .ok()
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Julian day number of this date.
    pub fn jdn(&self) -> i64 {
        astro::jdn(
            i32::from(self.day()),
            i32::from(self.month()),
            i32::from(self.year()),
        )
    }

    /// The following calendar day, or `None` after 9999-12-31.
    pub fn succ(&self) -> Option<Self> {
        let (y, m, d) = (self.year(), self.month(), self.day());
        if d < days_in_month(self.year, self.month) {
            Self::new(y, m, d + 1).ok()
        } else if m < DECEMBER {
            Self::new(y, m + 1, MIN_DAY).ok()
        } else {
            Self::new(y.checked_add(1)?, JANUARY, MIN_DAY).ok()
        }
    }
}

impl FromStr for GregorianDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        let parts: Vec<&str> = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(DateError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
                )));
            }
            (true, false) => trimmed.split(DATE_SEPARATOR).map(str::trim).collect(),
            (false, true) => trimmed.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect(),
            (false, false) => return Err(DateError::InvalidFormat(trimmed.to_owned())),
        };

        let [a, b, c] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "Expected 3 date components, found {}",
                parts.len()
            )));
        };

        // ISO is YYYY-MM-DD, month-first is MM/DD/YYYY
        let (year, month, day) = if has_hyphen { (a, b, c) } else { (c, a, b) };
        Self::new(parse_component(year)?, parse_component(month)?, parse_component(day)?)
    }
}

fn parse_component<T: FromStr>(s: &str) -> Result<T, DateError> {
    s.parse::<T>()
        .map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for GregorianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for GregorianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lunar::{lunar_month_start, month_length};
use crate::{DateError, GregorianDate, SPAN_SEPARATOR, prelude::*};

/// The Gregorian days covered by one lunar month (inclusive).
/// The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct LunarMonthSpan {
    start: GregorianDate,
    end:   GregorianDate,
}

/// Error type for lunar month span operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// Start date is after end date.
    #[error("Invalid span: start ({start}) is after end ({end})")]
    InvalidSpan {
        start: GregorianDate,
        end:   GregorianDate,
    },

    /// Error parsing a date component.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid span format.
    #[error("Invalid span format: {0}")]
    InvalidFormat(String),

    /// The month starts or ends outside the representable years.
    #[error("Lunar month around {0} leaves the supported calendar range")]
    OutOfRange(GregorianDate),
}

impl LunarMonthSpan {
    /// Creates a span between two dates.
    ///
    /// # Errors
    /// Returns `SpanError::InvalidSpan` if start > end.
    pub fn new(start: GregorianDate, end: GregorianDate) -> Result<Self, SpanError> {
        if start > end {
            return Err(SpanError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// The lunar month, observed at `utc_offset_hours`, that `date` falls in.
    ///
    /// # Errors
    /// Returns `SpanError::OutOfRange` if either end of the month is outside
    /// years `1..=9999`.
    pub fn containing(date: &GregorianDate, utc_offset_hours: f64) -> Result<Self, SpanError> {
        let first = lunar_month_start(date.jdn(), utc_offset_hours);
        let last = first + month_length(first, utc_offset_hours) - 1;
        let out_of_range = || SpanError::OutOfRange(*date);
        let start = GregorianDate::from_jdn(first).ok_or_else(out_of_range)?;
        let end = GregorianDate::from_jdn(last).ok_or_else(out_of_range)?;
        Self::new(start, end)
    }

    /// First day of the month
    pub const fn start(&self) -> GregorianDate {
        self.start
    }

    /// Last day of the month
    pub const fn end(&self) -> GregorianDate {
        self.end
    }

    /// Number of days covered, 29 or 30 for a real lunar month.
    pub fn len(&self) -> i64 {
        self.end.jdn() - self.start.jdn() + 1
    }

    /// Never true: a span holds at least its start day.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Checks if the span contains a given date
    pub fn contains(&self, date: &GregorianDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

impl FromStr for LunarMonthSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // start/end, each side an ISO date
        match trimmed.split_once(SPAN_SEPARATOR) {
            Some((start, end)) if !end.contains(SPAN_SEPARATOR) => {
                Self::new(start.trim().parse()?, end.trim().parse()?)
            }
            Some(_) => Err(SpanError::InvalidFormat(format!(
                "Too many '{SPAN_SEPARATOR}' separators: {s}"
            ))),
            None => Err(SpanError::InvalidFormat(format!(
                "No span separator found (expected '{SPAN_SEPARATOR}'): {s}"
            ))),
        }
    }
}

impl Serialize for LunarMonthSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LunarMonthSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

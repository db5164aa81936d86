use std::fmt;

use serde::{Deserialize, Serialize};

use crate::astro::{self, jdn, leap_month_offset, lunar_month_11_start, new_moon_jdn};
use crate::consts::{LEAP_MARKER, LUNAR_SUFFIX, SYNODIC_EPOCH_JD, SYNODIC_MONTH};
use crate::{CanChi, GregorianDate};

/// Vietnamese month names, Giêng (first) through Chạp (twelfth).
const MONTH_NAMES: [&str; 12] = [
    "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "M.Một", "Chạp",
];

/// A date in the Vietnamese lunar calendar.
///
/// `Display` renders the short label, e.g. `1/1 ÂL`, or `1/2* ÂL` for the
/// first day of a leap second month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub day: u8,
    pub month: u8,
    pub year: i32,
    pub is_leap_month: bool,
}

impl LunarDate {
    /// `(day, month, year, is_leap_month)`
    pub const fn to_tuple(self) -> (u8, u8, i32, bool) {
        (self.day, self.month, self.year, self.is_leap_month)
    }

    /// Vietnamese name of the month, prefixed with "Nhuận" for a leap month.
    pub fn month_name(&self) -> String {
        let name = MONTH_NAMES[usize::from(self.month.clamp(1, 12) - 1)];
        if self.is_leap_month {
            format!("Nhuận {name}")
        } else {
            name.to_owned()
        }
    }

    /// Long label, e.g. `Ngày 1 tháng Nhuận Hai`.
    pub fn full_label(&self) -> String {
        format!("Ngày {} tháng {}", self.day, self.month_name())
    }

    /// Stem-branch name of the lunar year.
    pub const fn can_chi_year(&self) -> CanChi {
        CanChi::from_year(self.year)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.month)?;
        if self.is_leap_month {
            write!(f, "{LEAP_MARKER}")?;
        }
        write!(f, " {LUNAR_SUFFIX}")
    }
}

impl From<LunarDate> for (u8, u8, i32, bool) {
    fn from(date: LunarDate) -> Self {
        date.to_tuple()
    }
}

/// Lunation index of the mean new moon at or before `day_number`.
fn lunation_before(day_number: i64) -> i64 {
    ((day_number as f64 - SYNODIC_EPOCH_JD) / SYNODIC_MONTH).floor() as i64
}

/// Day number of the new moon starting the lunar month that contains `day_number`.
///
/// Tries the three lunations around the mean estimate, latest first.
pub(crate) fn lunar_month_start(day_number: i64, utc_offset_hours: f64) -> i64 {
    let k = lunation_before(day_number);
    (k - 1..=k + 1)
        .rev()
        .map(|k| new_moon_jdn(k, utc_offset_hours))
        .find(|&start| start <= day_number)
        .unwrap_or_else(|| new_moon_jdn(k - 1, utc_offset_hours))
}

/// Converts a calendar date to the lunar calendar observed at `utc_offset_hours`.
///
/// No validation happens: out of range input gives a meaningless but
/// well-defined result. Use [`LunarConverter`](crate::LunarConverter) for
/// checked conversion.
///
/// # Example
///
/// ```
/// use amlich::{solar_to_lunar, VIETNAM_UTC_OFFSET};
///
/// let date = solar_to_lunar(22, 3, 2023, VIETNAM_UTC_OFFSET);
/// assert_eq!((1, 2, 2023, true), date.to_tuple());
/// ```
pub fn solar_to_lunar(day: i32, month: i32, year: i32, utc_offset_hours: f64) -> LunarDate {
    let day_number = jdn(day, month, year);
    let month_start = lunar_month_start(day_number, utc_offset_hours);

    let mut a11 = lunar_month_11_start(year, utc_offset_hours);
    let mut b11 = a11;
    let mut lunar_year;
    if a11 >= month_start {
        lunar_year = year;
        a11 = lunar_month_11_start(year.saturating_sub(1), utc_offset_hours);
    } else {
        lunar_year = year.saturating_add(1);
        b11 = lunar_month_11_start(lunar_year, utc_offset_hours);
    }

    let lunar_day = day_number - month_start + 1;
    let diff = (month_start - a11).div_euclid(29);
    let mut lunar_month = diff + 11;
    let mut is_leap_month = false;

    if b11 - a11 > 365 {
        if let Some(leap_diff) = leap_month_offset(a11, utc_offset_hours) {
            if diff >= leap_diff {
                lunar_month = diff + 10;
                is_leap_month = diff == leap_diff;
            }
        }
    }
    if lunar_month > 12 {
        lunar_month -= 12;
    }
    // Months 11 and 12 before the new year still belong to the previous lunar year
    if lunar_month >= 11 && diff < 4 {
        lunar_year = lunar_year.saturating_sub(1);
    }

    LunarDate {
        day: lunar_day as u8,
        month: lunar_month as u8,
        year: lunar_year,
        is_leap_month,
    }
}

impl GregorianDate {
    /// Shorthand for [`solar_to_lunar`] on a validated date.
    pub fn to_lunar(&self, utc_offset_hours: f64) -> LunarDate {
        solar_to_lunar(
            i32::from(self.day()),
            i32::from(self.month()),
            i32::from(self.year()),
            utc_offset_hours,
        )
    }
}

/// Number of days in the lunar month starting on day number `start`.
pub(crate) fn month_length(start: i64, utc_offset_hours: f64) -> i64 {
    let k = astro::lunation_at(start);
    new_moon_jdn(k + 1, utc_offset_hours) - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VIETNAM_UTC_OFFSET;
    use std::collections::HashMap;

    fn lunar(d: i32, m: i32, y: i32) -> (u8, u8, i32, bool) {
        solar_to_lunar(d, m, y, VIETNAM_UTC_OFFSET).to_tuple()
    }

    #[test]
    fn test_tet_2024() {
        assert_eq!(lunar(10, 2, 2024), (1, 1, 2024, false));
        assert_eq!(lunar(9, 2, 2024), (30, 12, 2023, false));
    }

    #[test]
    fn test_leap_month_2023() {
        assert_eq!(lunar(22, 3, 2023), (1, 2, 2023, true));
        assert_eq!(lunar(21, 3, 2023), (30, 2, 2023, false));
        assert_eq!(lunar(19, 4, 2023), (29, 2, 2023, true));
        assert_eq!(lunar(20, 4, 2023), (1, 3, 2023, false));
    }

    #[test]
    fn test_month_11_and_12_keep_previous_year() {
        assert_eq!(lunar(13, 12, 2023), (1, 11, 2023, false));
        assert_eq!(lunar(11, 1, 2024), (1, 12, 2023, false));
        assert_eq!(lunar(1, 1, 2000), (25, 11, 1999, false));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            solar_to_lunar(1, 6, 1990, VIETNAM_UTC_OFFSET),
            solar_to_lunar(1, 6, 1990, VIETNAM_UTC_OFFSET)
        );
    }

    #[test]
    fn test_short_label() {
        assert_eq!(solar_to_lunar(10, 2, 2024, VIETNAM_UTC_OFFSET).to_string(), "1/1 ÂL");
        assert_eq!(solar_to_lunar(22, 3, 2023, VIETNAM_UTC_OFFSET).to_string(), "1/2* ÂL");
    }

    #[test]
    fn test_full_label() {
        let date = solar_to_lunar(10, 2, 2024, VIETNAM_UTC_OFFSET);
        assert_eq!(date.full_label(), "Ngày 1 tháng Giêng");
        let date = solar_to_lunar(22, 3, 2023, VIETNAM_UTC_OFFSET);
        assert_eq!(date.full_label(), "Ngày 1 tháng Nhuận Hai");
        let date = solar_to_lunar(13, 12, 2023, VIETNAM_UTC_OFFSET);
        assert_eq!(date.month_name(), "M.Một");
    }

    #[test]
    fn test_serde() {
        let date = solar_to_lunar(22, 3, 2023, VIETNAM_UTC_OFFSET);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"day":1,"month":2,"year":2023,"is_leap_month":true}"#);
        let parsed: LunarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_garbage_in_garbage_out() {
        // Never panics, whatever comes in
        let _ = solar_to_lunar(99, 0, 0, VIETNAM_UTC_OFFSET);
        let _ = solar_to_lunar(-1, 13, 1500, VIETNAM_UTC_OFFSET);
        let _ = solar_to_lunar(1, 1, i32::MAX, VIETNAM_UTC_OFFSET);
        let _ = solar_to_lunar(1, 1, i32::MIN, VIETNAM_UTC_OFFSET);
        let _ = solar_to_lunar(i32::MIN, i32::MAX, i32::MAX, -VIETNAM_UTC_OFFSET);
    }

    /// Walks every day from January 1st of `first` to December 31st of `last`.
    fn sweep(first: u16, last: u16) -> impl Iterator<Item = (GregorianDate, LunarDate)> {
        let start = GregorianDate::new(first, 1, 1).ok();
        std::iter::successors(start, GregorianDate::succ)
            .take_while(move |d| d.year() <= last)
            .map(|d| (d, d.to_lunar(VIETNAM_UTC_OFFSET)))
    }

    /// Checks day continuity and 29/30-day months, returning the month count.
    fn check_continuity(first: u16, last: u16) -> usize {
        let mut previous: Option<LunarDate> = None;
        let mut run = 0;
        for (date, current) in sweep(first, last) {
            assert!((1..=30).contains(&current.day), "lunar day {} at {date}", current.day);
            if let Some(prev) = previous {
                if current.day == 1 {
                    if run > 0 {
                        assert!(
                            prev.day == 29 || prev.day == 30,
                            "month ending before {date} had {} days",
                            prev.day
                        );
                    }
                    run += 1;
                } else {
                    assert_eq!(current.day, prev.day + 1, "day skipped or repeated at {date}");
                    assert_eq!(
                        (current.month, current.year, current.is_leap_month),
                        (prev.month, prev.year, prev.is_leap_month),
                        "month changed mid-month at {date}"
                    );
                }
            }
            previous = Some(current);
        }
        run
    }

    #[test]
    fn test_consecutive_days_and_month_lengths() {
        assert!(check_continuity(1900, 2100) > 2400);
    }

    #[test]
    fn test_consecutive_days_nineteenth_century() {
        assert!(check_continuity(1800, 1899) > 1200);
    }

    #[test]
    fn test_late_new_moon_starts_month() {
        // Both months open on a day the mean lunation estimate puts too early
        for (d, m, y) in [(13, 4, 1877), (16, 3, 1885)] {
            let day_number = jdn(d, m, y);
            let start = lunar_month_start(day_number, VIETNAM_UTC_OFFSET);
            assert!(start <= day_number, "{y:04}-{m:02}-{d:02}");
            assert!(solar_to_lunar(d, m, y, VIETNAM_UTC_OFFSET).day >= 1);
        }
    }

    #[test]
    fn test_at_most_one_leap_month_per_year() {
        let mut leap_months: HashMap<i32, u8> = HashMap::new();
        for (date, lunar) in sweep(1900, 2100) {
            if lunar.is_leap_month {
                let month = *leap_months.entry(lunar.year).or_insert(lunar.month);
                assert_eq!(month, lunar.month, "second leap month in {} at {date}", lunar.year);
            }
        }
        // 1900-2100 has roughly 74 leap years
        assert!((70..=80).contains(&leap_months.len()), "{}", leap_months.len());
    }

    #[test]
    fn test_month_length_helper() {
        let start = jdn(22, 3, 2023);
        assert_eq!(month_length(start, VIETNAM_UTC_OFFSET), 29);
        let start = jdn(11, 1, 2024);
        assert_eq!(month_length(start, VIETNAM_UTC_OFFSET), 30);
    }
}

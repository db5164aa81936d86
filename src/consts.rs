/// Mean length of a synodic month, in days
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Julian date of the lunation epoch (new moon of early January 1900)
pub const SYNODIC_EPOCH_JD: f64 = 2_415_021.076_998_695;

/// Integer day number used when anchoring month 11 to December 31
pub const SYNODIC_EPOCH_JDN: i64 = 2_415_021;

/// First JDN of the Gregorian calendar (1582-10-15); earlier dates use the Julian formula
pub const GREGORIAN_SWITCH_JDN: i64 = 2_299_161;

/// Julian date of the J2000.0 epoch
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;

/// Lunations per Julian century, used to scale `k` into centuries
pub const LUNATIONS_PER_CENTURY: f64 = 1_236.85;

/// Sextant at which the sun has passed the winter solstice (270°)
pub(crate) const WINTER_SOLSTICE_SEXTANT: u8 = 9;

/// Upper bound on lunations walked while looking for a leap month
pub(crate) const LEAP_SEARCH_CAP: i64 = 14;

/// Utc offset of Indochina Time (UTC+7), the offset the Vietnamese calendar is computed in
pub const VIETNAM_UTC_OFFSET: f64 = 7.0;

/// Earliest Gregorian year the astronomical formulas are trusted for
pub const MIN_SUPPORTED_YEAR: i32 = 1800;
/// Latest Gregorian year the astronomical formulas are trusted for
pub const MAX_SUPPORTED_YEAR: i32 = 2100;

/// Allowed range for a fixed UTC offset, in hours
pub const MIN_UTC_OFFSET: f64 = -12.0;
/// Allowed range for a fixed UTC offset, in hours
pub const MAX_UTC_OFFSET: f64 = 14.0;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Span separator (ISO 8601 interval format)
pub const SPAN_SEPARATOR: char = '/';
/// Month-first format separator
pub const MONTH_FIRST_SEPARATOR: char = '/';

/// Suffix of the short lunar label ("âm lịch")
pub const LUNAR_SUFFIX: &str = "ÂL";
/// Marker appended to the month number of a leap month in the short label
pub const LEAP_MARKER: char = '*';

//! Astronomical routines behind the lunar calendar.
//!
//! Every function here is total: any integer input produces a number, and
//! nothing is validated. Results are only meaningful for Gregorian years
//! roughly between [`MIN_SUPPORTED_YEAR`](crate::MIN_SUPPORTED_YEAR) and
//! [`MAX_SUPPORTED_YEAR`](crate::MAX_SUPPORTED_YEAR).
//!
//! Day numbers are local: `utc_offset_hours` shifts the instant of a new moon
//! (or the midnight a sextant is sampled at) from UT to civil time.

use std::f64::consts::PI;

use tracing::trace;

use crate::consts::{
    GREGORIAN_SWITCH_JDN, J2000_JD, JULIAN_CENTURY, LEAP_SEARCH_CAP, LUNATIONS_PER_CENTURY,
    SYNODIC_EPOCH_JD, SYNODIC_EPOCH_JDN, SYNODIC_MONTH, WINTER_SOLSTICE_SEXTANT,
};

const DR: f64 = PI / 180.0;

/// Julian day number of a calendar date.
///
/// Dates before 1582-10-15 are read as Julian calendar dates, later ones as
/// Gregorian.
///
/// # Example
///
/// ```
/// assert_eq!(2451545, amlich::astro::jdn(1, 1, 2000));
/// ```
pub fn jdn(day: i32, month: i32, year: i32) -> i64 {
    let (day, month, year) = (i64::from(day), i64::from(month), i64::from(year));
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let jd = day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    if jd < GREGORIAN_SWITCH_JDN {
        day + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
    } else {
        jd
    }
}

/// Proleptic Gregorian `(year, month, day)` of a Julian day number.
///
/// # Example
///
/// ```
/// assert_eq!((2000, 1, 1), amlich::astro::jdn_to_gregorian(2451545));
/// ```
pub fn jdn_to_gregorian(jdn: i64) -> (i64, i64, i64) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year, month, day)
}

/// Local day number of the `k`-th new moon after the January 1900 epoch.
pub fn new_moon_jdn(k: i64, utc_offset_hours: f64) -> i64 {
    let k = k as f64;
    let t = k / LUNATIONS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd1 = 2_415_020.759_33 + 29.530_588_68 * k + 0.000_117_8 * t2 - 0.000_000_155 * t3;
    jd1 += 0.000_33 * ((166.56 + 132.87 * t - 0.009_173 * t2) * DR).sin();

    // Sun's mean anomaly, Moon's mean anomaly, Moon's argument of latitude
    let m = 359.224_2 + 29.105_356_08 * k - 0.000_033_3 * t2 - 0.000_003_47 * t3;
    let mpr = 306.025_3 + 385.816_918_06 * k + 0.010_730_6 * t2 + 0.000_012_36 * t3;
    let f = 21.296_4 + 390.670_506_46 * k - 0.001_652_8 * t2 - 0.000_002_39 * t3;

    let mut c1 = (0.173_4 - 0.000_393 * t) * (m * DR).sin() + 0.002_1 * (2.0 * DR * m).sin();
    c1 = c1 - 0.406_8 * (mpr * DR).sin() + 0.016_1 * (DR * 2.0 * mpr).sin();
    c1 -= 0.000_4 * (DR * 3.0 * mpr).sin();
    c1 = c1 + 0.010_4 * (DR * 2.0 * f).sin() - 0.005_1 * (DR * (m + mpr)).sin();
    c1 = c1 - 0.007_4 * (DR * (m - mpr)).sin() + 0.000_4 * (DR * (2.0 * f + m)).sin();
    c1 = c1 - 0.000_4 * (DR * (2.0 * f - m)).sin() - 0.000_6 * (DR * (2.0 * f + mpr)).sin();
    c1 = c1 + 0.001_0 * (DR * (2.0 * f - mpr)).sin() + 0.000_5 * (DR * (2.0 * mpr + m)).sin();

    let delta_t = if t < -11.0 {
        0.001 + 0.000_839 * t + 0.000_226_1 * t2 - 0.000_008_45 * t3 - 0.000_000_081 * t * t3
    } else {
        -0.000_278 + 0.000_265 * t + 0.000_262 * t2
    };

    let jd_new = jd1 + c1 - delta_t;
    (jd_new + 0.5 + utc_offset_hours / 24.0).floor() as i64
}

/// Which 30° band of ecliptic longitude the sun is in at local midnight
/// starting day `jdn`. `0` is the band starting at the March equinox.
pub fn sun_longitude_sextant(jdn: i64, utc_offset_hours: f64) -> u8 {
    let t = (jdn as f64 - 0.5 - utc_offset_hours / 24.0 - J2000_JD) / JULIAN_CENTURY;
    let t2 = t * t;

    let m = 357.529_10 + 35_999.050_30 * t - 0.000_155_9 * t2 - 0.000_000_48 * t * t2;
    let l0 = 280.466_45 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let mut dl = (1.914_600 - 0.004_817 * t - 0.000_014 * t2) * (DR * m).sin();
    dl = dl + (0.019_993 - 0.000_101 * t) * (DR * 2.0 * m).sin() + 0.000_290 * (DR * 3.0 * m).sin();

    let l = ((l0 + dl) * DR).rem_euclid(2.0 * PI);
    // rem_euclid may round up to exactly 2π
    ((l / PI * 6.0).floor() as i64).rem_euclid(12) as u8
}

/// Local day number of the new moon starting lunar month 11 (the month
/// holding the winter solstice) near the end of Gregorian `year`.
pub fn lunar_month_11_start(year: i32, utc_offset_hours: f64) -> i64 {
    let off = jdn(31, 12, year) - SYNODIC_EPOCH_JDN;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i64;
    let nm = new_moon_jdn(k, utc_offset_hours);
    let sextant = sun_longitude_sextant(nm, utc_offset_hours);
    trace!(year, k, nm, sextant, "month 11 candidate");

    if sextant >= WINTER_SOLSTICE_SEXTANT {
        new_moon_jdn(k - 1, utc_offset_hours)
    } else {
        nm
    }
}

/// Lunation index whose new moon falls closest to `jdn`.
pub(crate) fn lunation_at(jdn: i64) -> i64 {
    ((jdn as f64 - SYNODIC_EPOCH_JD) / SYNODIC_MONTH + 0.5).floor() as i64
}

/// Offset, counted in months after the month 11 that starts on `a11`, of the
/// leap month of that lunar year.
///
/// Walks forward new moon by new moon until the sun stays in the same sextant
/// across a whole month. Gives up after 14 lunations and
/// returns `None`.
pub fn leap_month_offset(a11: i64, utc_offset_hours: f64) -> Option<i64> {
    let k = lunation_at(a11);
    let sextant_at = |i: i64| {
        sun_longitude_sextant(new_moon_jdn(k + i, utc_offset_hours), utc_offset_hours)
    };

    let mut i = 1;
    let mut arc = sextant_at(i);
    loop {
        let last = arc;
        i += 1;
        arc = sextant_at(i);
        trace!(i, last, arc, "leap month search");
        if arc == last {
            return Some(i - 1);
        }
        if i >= LEAP_SEARCH_CAP {
            return None;
        }
    }
}

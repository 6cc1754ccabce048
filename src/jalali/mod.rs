//! Jalali (Persian solar) calendar and its imperial (Shahi) numbering.
//!
//! Conversion goes through the calendar-independant [`Date`]: a Gregorian
//! triple becomes a day number, and the day number is decomposed into Jalali
//! 33-year cycles, 4-year blocks and single years. A second, table-driven
//! Gregorian to Jalali routine is kept as [`gregorian_to_jalali_tabular`];
//! both agree over the supported range.
//!
//! Converters do not validate their input. Out-of-range months carry into
//! the year and out-of-range days roll into adjacent months, so results are
//! deterministic but not necessarily meaningful. Use [`check_date`] when the
//! input comes from outside.

use crate::date::{Date, YearType};
use crate::error::Error;

pub mod fmt;

/// Years between the Jalali (Solar Hijri) and the imperial (Shahi) era.
pub const IMPERIAL_OFFSET: i32 = 1180;

/// Converts a Gregorian date into a Jalali one, returned as `(year, month,
/// day)`.
///
/// Panics if the date is out of the range [`Date`] supports, about 5.8
/// million years either side of 1600.
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert_eq!((1403, 10, 19), jalali::gregorian_to_jalali(2025, 1, 8));
/// ```
pub fn gregorian_to_jalali(gy: i32, gm: i32, gd: i32) -> (i32, i32, i32) {
    Date::from_gregorian(gy, gm, gd).jalali()
}

/// Converts a Jalali date into a Gregorian one, returned as `(year, month,
/// day)`.
///
/// Panics if the date is out of the range [`Date`] supports; use
/// [`Date::checked_from_jalali`] when the input may be out of range.
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert_eq!((2025, 1, 8), jalali::jalali_to_gregorian(1403, 10, 19));
/// ```
pub fn jalali_to_gregorian(jy: i32, jm: i32, jd: i32) -> (i32, i32, i32) {
    Date::from_jalali(jy, jm, jd).gregorian()
}

/// Converts a Gregorian date into a Jalali one with fixed bases (1600 AD /
/// 979 AP, or 621 AD / year 0 for earlier dates) and a cumulative month
/// table.
///
/// Only Gregorian years after 1600 give the same result as
/// [`gregorian_to_jalali`]. The 621 base is not aligned with the 400-year
/// Gregorian cycle, so earlier dates may come out a day off (1600-12-31
/// gives 979-10-10 here, 979-10-11 there).
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert_eq!((1357, 11, 22), jalali::gregorian_to_jalali_tabular(1979, 2, 11));
/// ```
pub fn gregorian_to_jalali_tabular(gy: i32, gm: i32, gd: i32) -> (i32, i32, i32) {
    const G_D_M: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let (gm, gd) = (i64::from(gm), i64::from(gd));
    let gy = i64::from(gy) + (gm - 1).div_euclid(12);
    let gm = (gm - 1).rem_euclid(12) + 1;
    let (mut jy, gy) = if gy > 1600 { (979, gy - 1600) } else { (0, gy - 621) };
    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400 - 80
        + gd
        + G_D_M[(gm - 1) as usize];

    jy += 33 * (days / 12053);
    days %= 12053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jy, days) = (jy as i32, days as i32);
    if days < 186 {
        (jy, 1 + days / 31, 1 + days % 31)
    } else {
        (jy, 7 + (days - 186) / 30, 1 + (days - 186) % 30)
    }
}

/// Determines if a Jalali `year` is a leap year, using the 2820-year cycle.
///
/// This is the predicate every month-length computation in this crate
/// relies on.
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert!(jalali::is_leap_year(1408));
/// assert!(!jalali::is_leap_year(1356));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    YearType::from_jalali(year).is_leap()
}

/// Returns the number of days in a Jalali month.
///
/// Months `1..=6` have 31 days, `7..=11` have 30 days, and month 12 has 30
/// days in leap years, 29 otherwise.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    if month <= 6 {
        31
    } else if month <= 11 {
        30
    } else if is_leap_year(year) {
        30
    } else {
        29
    }
}

/// Returns the 1-based day of year for a Jalali month and day.
pub fn day_of_year(month: i32, day: i32) -> i32 {
    crate::date::jalali_month_start(month - 1) + day
}

/// Checks that `(year, month, day)` names an existing Jalali day.
///
/// # Example
///
/// ```
/// use shahi::{jalali, Error};
///
/// assert_eq!(Ok(()), jalali::check_date(1408, 12, 30));
/// assert_eq!(Err(Error::InvalidMonth { month: 13 }), jalali::check_date(1357, 13, 1));
/// ```
pub fn check_date(year: i32, month: i32, day: i32) -> Result<(), Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth { month });
    }
    let max_day = days_in_month(year, month);
    if !(1..=max_day).contains(&day) {
        return Err(Error::InvalidDay {
            year,
            month,
            day,
            max_day,
        });
    }
    Ok(())
}

/// Converts an imperial (Shahi) year into a Jalali year.
///
/// Plain `i32` subtraction: years within [`IMPERIAL_OFFSET`] of `i32::MIN`
/// overflow. Use `year.checked_sub(IMPERIAL_OFFSET)` for unchecked input.
pub fn shahi_to_jalali_year(year: i32) -> i32 {
    year - IMPERIAL_OFFSET
}

/// Converts a Jalali year into an imperial (Shahi) year.
pub fn jalali_to_shahi_year(year: i32) -> i32 {
    year + IMPERIAL_OFFSET
}

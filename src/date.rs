//! Calendar-independant date.

use std::ops::{Add, Sub};

/// Cumulative days before each Gregorian month in a common year.
const GREGORIAN_MONTH_STARTS: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Days from the Gregorian day-number base (1600-01-01) to Jalali 979-01-01
/// (1600-03-20).
pub const JALALI_EPOCH_OFFSET: i32 = 79;

/// A calendar-independant date.
///
/// Dates are counted from January 1, 1600 of the proleptic Gregorian calendar
/// (day `0`, a Saturday). Days before that are negative.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    day_number: i32,
}

impl Date {
    /// Creates a `Date` with a day number.
    pub fn from_day_number(day_number: i32) -> Self {
        Self { day_number }
    }
    /// Returns the day number of the date, counted from 1600-01-01.
    pub fn day_number(&self) -> i32 {
        self.day_number
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. A month outside `1..=12` carries into the year; the
    /// day is added as an offset so out-of-range days roll over.
    ///
    /// # Panics
    ///
    /// Panics if the date is out of supported range (about 5.8 million years
    /// either side of 1600). See [`Date::checked_from_gregorian`].
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!(146097, date.day_number());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Self {
        Self::checked_from_gregorian(year, month, day).expect("date out of supported range")
    }
    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// assert!(Date::checked_from_gregorian(2000, 1, 1).is_some());
    /// assert!(Date::checked_from_gregorian(i32::MAX, 1, 1).is_none());
    /// ```
    pub fn checked_from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (month, day) = (i64::from(month), i64::from(day));
        let y = i64::from(year) - 1600 + (month - 1).div_euclid(12);
        let m = (month - 1).rem_euclid(12);
        let mut n = 365 * y + (y + 3).div_euclid(4) - (y + 99).div_euclid(100)
            + (y + 399).div_euclid(400);
        n += i64::from(GREGORIAN_MONTH_STARTS[m as usize]);
        if m > 1 && gregorian_leap(y + 1600) {
            n += 1;
        }
        i32::try_from(n + day - 1).ok().map(Self::from_day_number)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_day_number(146097);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let mut n = i64::from(self.day_number);
        let mut year = 1600 + 400 * n.div_euclid(146097);
        n = n.rem_euclid(146097);

        let mut leap = true;
        if n >= 36525 {
            n -= 1;
            year += 100 * (n / 36524);
            n %= 36524;
            if n >= 365 {
                n += 1;
            } else {
                leap = false;
            }
        }

        year += 4 * (n / 1461);
        n %= 1461;
        if n >= 366 {
            leap = false;
            n -= 1;
            year += n / 365;
            n %= 365;
        }

        let mut n = n as i32;
        let mut month = 0;
        while month < 11 && n >= gregorian_month_length(month, leap) {
            n -= gregorian_month_length(month, leap);
            month += 1;
        }
        (year as i32, month + 1, n + 1)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_gregorian(2025, 1, 8);
    /// assert_eq!("2025-01-08", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Creates a `Date` with a Jalali calendar date.
    ///
    /// Leap years follow the 33-year arithmetic cycle anchored at 979 AP. A
    /// month outside `1..=12` carries into the year.
    ///
    /// # Panics
    ///
    /// Panics if the date is out of supported range. See
    /// [`Date::checked_from_jalali`].
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_jalali(1403, 10, 19);
    /// assert_eq!((2025, 1, 8), date.gregorian());
    /// ```
    pub fn from_jalali(year: i32, month: i32, day: i32) -> Self {
        Self::checked_from_jalali(year, month, day).expect("date out of supported range")
    }
    /// Creates a `Date` with a Jalali calendar date.
    ///
    /// Returns `None` if the result date is out of supported range.
    pub fn checked_from_jalali(year: i32, month: i32, day: i32) -> Option<Self> {
        let (month, day) = (i64::from(month), i64::from(day));
        let y = i64::from(year) - 979 + (month - 1).div_euclid(12);
        let m = (month - 1).rem_euclid(12) as i32;
        let n = 365 * y + 8 * y.div_euclid(33) + (y.rem_euclid(33) + 3) / 4
            + i64::from(jalali_month_start(m))
            + day
            - 1;
        i32::try_from(n + i64::from(JALALI_EPOCH_OFFSET))
            .ok()
            .map(Self::from_day_number)
    }
    /// Represents the date in Jalali calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_gregorian(2025, 3, 21);
    /// assert_eq!((1404, 1, 1), date.jalali());
    /// ```
    pub fn jalali(&self) -> (i32, i32, i32) {
        let mut n = i64::from(self.day_number) - i64::from(JALALI_EPOCH_OFFSET);
        let mut year = 979 + 33 * n.div_euclid(12053);
        n = n.rem_euclid(12053);

        year += 4 * (n / 1461);
        n %= 1461;
        if n >= 366 {
            year += (n - 1) / 365;
            n = (n - 1) % 365;
        }

        let (year, n) = (year as i32, n as i32);
        if n < 186 {
            (year, 1 + n / 31, 1 + n % 31)
        } else {
            (year, 7 + (n - 186) / 30, 1 + (n - 186) % 30)
        }
    }

    /// Returns the day of week of the date, numbered from `0` (Saturday) to
    /// `6` (Friday).
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::Date;
    ///
    /// let date = Date::from_gregorian(2025, 1, 8);
    /// assert_eq!(4, date.day_of_week()); // Wednesday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        self.day_number.rem_euclid(7)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_day_number(self.day_number + rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.day_number - rhs.day_number
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if gregorian_leap(year.into()) {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Determines if `year` is a leap year in Jalali calendar, using the
    /// 2820-year cycle.
    pub fn from_jalali(year: i32) -> Self {
        if ((i64::from(year) - 474).rem_euclid(2820) + 474 + 38) * 682 % 2816 < 682 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn gregorian_leap(year: i64) -> bool {
    year % 4 == 0 && year % 100 != 0 || year % 400 == 0
}

fn gregorian_month_length(month0: i32, leap: bool) -> i32 {
    match month0 {
        1 if leap => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Days before the 0-based Jalali month `month0`.
pub(crate) fn jalali_month_start(month0: i32) -> i32 {
    if month0 < 6 {
        31 * month0
    } else {
        186 + 30 * (month0 - 6)
    }
}

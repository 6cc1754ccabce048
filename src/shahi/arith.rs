//! Arithmetic and comparison on [`ShahiDateTime`].

use jiff::Timestamp;

use super::ShahiDateTime;
use crate::error::Error;
use crate::jalali::{self, IMPERIAL_OFFSET};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Unit of [`ShahiDateTime::format_difference`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Unit {
    #[default]
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    fn seconds(self) -> i64 {
        match self {
            Unit::Days => SECONDS_PER_DAY,
            Unit::Hours => SECONDS_PER_HOUR,
            Unit::Minutes => SECONDS_PER_MINUTE,
            Unit::Seconds => 1,
        }
    }
}

/// Unknown names fall back to [`Unit::Days`].
impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        match s {
            "hours" => Unit::Hours,
            "minutes" => Unit::Minutes,
            "seconds" => Unit::Seconds,
            _ => Unit::Days,
        }
    }
}

/// Arithmetic.
///
/// Seconds through weeks move the instant by a fixed number of seconds and
/// then recompute the calendar fields, so they cross month and year ends
/// naturally. Months and years work on the calendar fields instead.
impl ShahiDateTime {
    fn shift(&mut self, count: i64, unit: i64) -> Result<&mut Self, Error> {
        let seconds = count
            .checked_mul(unit)
            .and_then(|delta| self.timestamp().checked_add(delta))
            .ok_or_else(|| Error::conversion("instant out of range"))?;
        self.set_timestamp(seconds)
    }

    /// Moves forward by `seconds`. Like the other fixed-length moves, fails
    /// if the instant leaves the range of [`Timestamp`].
    pub fn add_seconds(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.shift(seconds, 1)
    }
    /// Moves back by `seconds`.
    pub fn sub_seconds(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.shift(seconds, -1)
    }
    /// Moves forward by `minutes`.
    pub fn add_minutes(&mut self, minutes: i64) -> Result<&mut Self, Error> {
        self.shift(minutes, SECONDS_PER_MINUTE)
    }
    /// Moves back by `minutes`.
    pub fn sub_minutes(&mut self, minutes: i64) -> Result<&mut Self, Error> {
        self.shift(minutes, -SECONDS_PER_MINUTE)
    }
    /// Moves forward by `hours`.
    pub fn add_hours(&mut self, hours: i64) -> Result<&mut Self, Error> {
        self.shift(hours, SECONDS_PER_HOUR)
    }
    /// Moves back by `hours`.
    pub fn sub_hours(&mut self, hours: i64) -> Result<&mut Self, Error> {
        self.shift(hours, -SECONDS_PER_HOUR)
    }
    /// Moves by whole days of 86400 seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let mut date = ShahiDateTime::from_ymd(2536, 12, 25, &Zone::utc()).unwrap();
    /// date.add_days(10).unwrap();
    /// assert_eq!("2537/01/06", date.format_date());
    /// ```
    pub fn add_days(&mut self, days: i64) -> Result<&mut Self, Error> {
        self.shift(days, SECONDS_PER_DAY)
    }
    /// Moves back by `days`.
    pub fn sub_days(&mut self, days: i64) -> Result<&mut Self, Error> {
        self.shift(days, -SECONDS_PER_DAY)
    }
    /// Moves forward by `weeks`.
    pub fn add_weeks(&mut self, weeks: i64) -> Result<&mut Self, Error> {
        self.shift(weeks, SECONDS_PER_WEEK)
    }
    /// Moves back by `weeks`.
    pub fn sub_weeks(&mut self, weeks: i64) -> Result<&mut Self, Error> {
        self.shift(weeks, -SECONDS_PER_WEEK)
    }

    /// Moves by whole months, keeping the day unless the target month is
    /// shorter, in which case the day becomes the last day of that month.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let mut date = ShahiDateTime::from_ymd(2537, 6, 31, &Zone::utc()).unwrap();
    /// date.add_months(1).unwrap();
    /// assert_eq!("2537/07/30", date.format_date());
    /// ```
    pub fn add_months(&mut self, months: i32) -> Result<&mut Self, Error> {
        let m = i64::from(self.month) - 1 + i64::from(months);
        let year = i64::from(self.year) + m.div_euclid(12);
        let year = i32::try_from(year).map_err(|_| Error::conversion("year out of range"))?;
        let jalali_year = year
            .checked_sub(IMPERIAL_OFFSET)
            .ok_or_else(|| Error::conversion("year out of range"))?;
        let month = m.rem_euclid(12) as i32 + 1;
        let max_day = jalali::days_in_month(jalali_year, month);
        self.set_date(year, month, self.day.min(max_day))
    }
    /// Inverse of [`add_months`](Self::add_months).
    pub fn sub_months(&mut self, months: i32) -> Result<&mut Self, Error> {
        let months = months
            .checked_neg()
            .ok_or_else(|| Error::conversion("month count out of range"))?;
        self.add_months(months)
    }
    /// Moves by whole years. The day is kept as it is, even when it does not
    /// exist in the target year (the 30th of month 12 outside a leap year).
    pub fn add_years(&mut self, years: i32) -> Result<&mut Self, Error> {
        let year = self
            .year
            .checked_add(years)
            .ok_or_else(|| Error::conversion("year out of range"))?;
        self.set_year(year)
    }
    /// Inverse of [`add_years`](Self::add_years).
    pub fn sub_years(&mut self, years: i32) -> Result<&mut Self, Error> {
        let year = self
            .year
            .checked_sub(years)
            .ok_or_else(|| Error::conversion("year out of range"))?;
        self.set_year(year)
    }

    /// Moves forward by one second.
    pub fn add_second(&mut self) -> Result<&mut Self, Error> {
        self.add_seconds(1)
    }
    /// Moves back by one second.
    pub fn sub_second(&mut self) -> Result<&mut Self, Error> {
        self.sub_seconds(1)
    }
    /// Moves forward by one minute.
    pub fn add_minute(&mut self) -> Result<&mut Self, Error> {
        self.add_minutes(1)
    }
    /// Moves back by one minute.
    pub fn sub_minute(&mut self) -> Result<&mut Self, Error> {
        self.sub_minutes(1)
    }
    /// Moves forward by one hour.
    pub fn add_hour(&mut self) -> Result<&mut Self, Error> {
        self.add_hours(1)
    }
    /// Moves back by one hour.
    pub fn sub_hour(&mut self) -> Result<&mut Self, Error> {
        self.sub_hours(1)
    }
    /// Moves forward by one day.
    pub fn add_day(&mut self) -> Result<&mut Self, Error> {
        self.add_days(1)
    }
    /// Moves back by one day.
    pub fn sub_day(&mut self) -> Result<&mut Self, Error> {
        self.sub_days(1)
    }
    /// Moves forward by one week.
    pub fn add_week(&mut self) -> Result<&mut Self, Error> {
        self.add_weeks(1)
    }
    /// Moves back by one week.
    pub fn sub_week(&mut self) -> Result<&mut Self, Error> {
        self.sub_weeks(1)
    }
    /// Moves forward by one month.
    pub fn add_month(&mut self) -> Result<&mut Self, Error> {
        self.add_months(1)
    }
    /// Moves back by one month.
    pub fn sub_month(&mut self) -> Result<&mut Self, Error> {
        self.sub_months(1)
    }
    /// Moves forward by one year.
    pub fn add_year(&mut self) -> Result<&mut Self, Error> {
        self.add_years(1)
    }
    /// Moves back by one year.
    pub fn sub_year(&mut self) -> Result<&mut Self, Error> {
        self.sub_years(1)
    }

    /// Sets the time to 00:00:00.
    pub fn start_day(&mut self) -> Result<&mut Self, Error> {
        self.set_time(0, 0, 0)
    }
    /// Sets the time to 23:59:59.
    pub fn end_day(&mut self) -> Result<&mut Self, Error> {
        self.set_time(23, 59, 59)
    }
    /// Moves to 00:00:00 on the first day of the month.
    pub fn start_month(&mut self) -> Result<&mut Self, Error> {
        self.set_date_time(self.year, self.month, 1, 0, 0, 0)
    }
    /// Moves to 23:59:59 on the last day of the month.
    pub fn end_month(&mut self) -> Result<&mut Self, Error> {
        let last = self.days_in_month();
        self.set_date_time(self.year, self.month, last, 23, 59, 59)
    }
}

/// Comparison.
///
/// All comparisons look at the instant, except [`eq`](Self::eq), which only
/// looks at the calendar date. Two values on the same day at different
/// times are `eq` and yet one is `lt` the other.
///
/// # Example
///
/// ```
/// use shahi::{ShahiDateTime, Zone};
///
/// let zone = Zone::utc();
/// let morning = ShahiDateTime::create(2537, 10, 18, 1, 0, 0, &zone).unwrap();
/// let night = ShahiDateTime::create(2537, 10, 18, 23, 0, 0, &zone).unwrap();
/// assert!(morning.eq(&night));
/// assert!(morning.lt(&night));
/// ```
impl ShahiDateTime {
    /// Whether `self` is strictly earlier.
    pub fn lt(&self, other: &Self) -> bool {
        self.timestamp < other.timestamp
    }
    /// Whether `self` is earlier or at the same instant.
    pub fn lte(&self, other: &Self) -> bool {
        self.timestamp <= other.timestamp
    }
    /// Whether `self` is strictly later.
    pub fn gt(&self, other: &Self) -> bool {
        self.timestamp > other.timestamp
    }
    /// Whether `self` is later or at the same instant.
    pub fn gte(&self, other: &Self) -> bool {
        self.timestamp >= other.timestamp
    }
    /// Returns whether both values fall on the same calendar date.
    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }
    /// Returns whether the instant lies in `start..=end`.
    pub fn between(&self, start: &Self, end: &Self) -> bool {
        self.gte(start) && self.lte(end)
    }

    /// Returns the number of whole days from `other` to `self`, rounded
    /// towards negative infinity.
    pub fn diff_days(&self, other: &Self) -> i64 {
        self.seconds_since(other.timestamp).div_euclid(SECONDS_PER_DAY)
    }
    /// Returns the difference from `other` (or from now) to `self` in
    /// `unit`, rounded towards zero.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Unit, Zone};
    ///
    /// let zone = Zone::utc();
    /// let a = ShahiDateTime::create(2537, 10, 18, 0, 0, 0, &zone).unwrap();
    /// let b = ShahiDateTime::create(2537, 10, 19, 12, 0, 0, &zone).unwrap();
    /// assert_eq!(-1, a.format_difference(Some(&b), Unit::Days));
    /// assert_eq!(-2, a.diff_days(&b));
    /// assert_eq!(36, b.format_difference(Some(&a), "hours".into()));
    /// ```
    pub fn format_difference(&self, other: Option<&Self>, unit: Unit) -> i64 {
        let other = other.map_or_else(Timestamp::now, |other| other.timestamp);
        self.seconds_since(other) / unit.seconds()
    }

    fn seconds_since(&self, other: Timestamp) -> i64 {
        self.timestamp.as_second() - other.as_second()
    }
}

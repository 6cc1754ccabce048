//! Date-time in the imperial (Shahi) calendar.
//!
//! The imperial calendar is the Jalali calendar with its years counted from
//! the foundation of the Achaemenid empire, i.e. [`IMPERIAL_OFFSET`] years
//! ahead of the Solar Hijri era.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use jiff::civil::DateTime;
use jiff::{Timestamp, Zoned};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::Error;
use crate::jalali::{self, IMPERIAL_OFFSET};
use crate::zone::{Civil, Zone};

mod arith;

pub use arith::Unit;

/// Date-time in the imperial calendar, tied to an instant.
///
/// The calendar fields and the instant are kept in sync: changing a
/// calendar field recomputes the instant in the value's [`Zone`], and moving
/// the instant recomputes the calendar fields. Operations that would leave
/// them out of sync fail and leave the value untouched.
///
/// Fields given at construction are taken as they are: a day past the end
/// of its month is kept, and the instant is computed as if the excess rolled
/// over into the next month.
///
/// # Example
///
/// ```
/// use shahi::{ShahiDateTime, Zone};
///
/// let zone = Zone::utc();
/// let mut date = ShahiDateTime::from_ymd(2537, 10, 18, &zone).unwrap();
/// date.add_days(5).unwrap().add_months(2).unwrap();
///
/// assert_eq!("2537/12/23", date.format_date());
/// ```
#[derive(Debug, Clone)]
pub struct ShahiDateTime {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    timestamp: Timestamp,
    zone: Zone,
}

/// Read-only fields derived from the calendar fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    DayOfWeek,
    DayOfYear,
    WeekOfYear,
    DaysInMonth,
    MonthName,
    DayName,
    Quarter,
}

/// Value of a [`Field`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FieldValue {
    Number(i32),
    Name(&'static str),
}

/// Plain projection of a [`ShahiDateTime`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ShahiFields {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub timestamp: i64,
    pub timezone: String,
}

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})[/-]([0-9]{1,2})[/-]([0-9]{1,2})(?:\s+([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2}))?$")
        .expect("valid date pattern")
});

/// Splits `YYYY-M-D[ HH:MM:SS]` (`/` also accepted as separator) into
/// `[year, month, day, hour, minute, second]`. Fields are not range checked.
pub(crate) fn numeric_fields(text: &str) -> Option<[i32; 6]> {
    let caps = NUMERIC_DATE.captures(text.trim())?;
    let mut fields = [0; 6];
    for (i, field) in fields.iter_mut().enumerate() {
        if let Some(m) = caps.get(i + 1) {
            *field = m.as_str().parse().ok()?;
        }
    }
    Some(fields)
}

impl ShahiDateTime {
    /// Returns the current date-time in `zone`.
    pub fn now(zone: &Zone) -> Self {
        Self::from_timestamp(Timestamp::now(), zone)
    }
    /// Returns the start of the current day in `zone`.
    pub fn today(zone: &Zone) -> Result<Self, Error> {
        let mut date = Self::now(zone);
        date.start_day()?;
        Ok(date)
    }
    /// Returns the start of the next day in `zone`.
    pub fn tomorrow(zone: &Zone) -> Result<Self, Error> {
        let mut date = Self::today(zone)?;
        date.add_days(1)?;
        Ok(date)
    }
    /// Returns the start of the previous day in `zone`.
    pub fn yesterday(zone: &Zone) -> Result<Self, Error> {
        let mut date = Self::today(zone)?;
        date.sub_days(1)?;
        Ok(date)
    }

    /// Creates a date-time from imperial calendar fields, in `zone`.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let date = ShahiDateTime::create(2583, 10, 19, 0, 0, 0, &Zone::utc()).unwrap();
    /// assert_eq!("2025-01-08 00:00:00", date.to_gregorian());
    /// ```
    pub fn create(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        zone: &Zone,
    ) -> Result<Self, Error> {
        let mut date = Self::from_timestamp(Timestamp::UNIX_EPOCH, zone);
        date.set_date_time(year, month, day, hour, minute, second)?;
        Ok(date)
    }
    /// Creates the start of an imperial calendar day, in `zone`.
    pub fn from_ymd(year: i32, month: i32, day: i32, zone: &Zone) -> Result<Self, Error> {
        Self::create(year, month, day, 0, 0, 0, zone)
    }
    /// Creates a date-time from Gregorian calendar fields, in `zone`.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let date = ShahiDateTime::from_gregorian(2025, 1, 8, 0, 0, 0, &Zone::utc()).unwrap();
    /// assert_eq!((2583, 10, 19), (date.year(), date.month(), date.day()));
    /// ```
    pub fn from_gregorian(
        gy: i32,
        gm: i32,
        gd: i32,
        hour: i32,
        minute: i32,
        second: i32,
        zone: &Zone,
    ) -> Result<Self, Error> {
        let (jy, jm, jd) = Date::checked_from_gregorian(gy, gm, gd)
            .map(|d| d.jalali())
            .ok_or_else(|| Error::conversion(format!("Gregorian date {gy}-{gm}-{gd} out of range")))?;
        Self::create(jalali::jalali_to_shahi_year(jy), jm, jd, hour, minute, second, zone)
    }
    /// Creates a date-time from seconds since the Unix epoch, in `zone`.
    pub fn from_epoch(seconds: i64, zone: &Zone) -> Result<Self, Error> {
        Ok(Self::from_timestamp(Timestamp::from_second(seconds)?, zone))
    }
    /// Creates a date-time from an instant, in `zone`.
    pub fn from_timestamp(timestamp: Timestamp, zone: &Zone) -> Self {
        let mut date = Self {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            timestamp,
            zone: zone.clone(),
        };
        let civil = zone.civil(timestamp);
        date.assign(timestamp, civil);
        date
    }
    /// Creates a date-time from a `jiff` zoned date-time, keeping its zone.
    pub fn from_zoned(zoned: &Zoned) -> Self {
        let zone = Zone::from_time_zone(zoned.time_zone().clone());
        Self::from_timestamp(zoned.timestamp(), &zone)
    }

    /// Parses a date-time, in `zone`.
    ///
    /// `YYYY-M-D` or `YYYY/M/D`, optionally followed by `HH:MM:SS`, is read as
    /// imperial calendar fields. Anything else is read as a Gregorian
    /// date-time: RFC 9557 (`2025-01-08T14:30:00+03:30[Asia/Tehran]`),
    /// RFC 3339 (`2025-01-08T11:00:00Z`), or an ISO 8601 civil date-time
    /// (`2025-01-08T14:30`) taken in `zone`.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let zone = Zone::utc();
    /// let date = ShahiDateTime::parse("2537/10/18", &zone).unwrap();
    /// assert_eq!((2537, 10, 18), (date.year(), date.month(), date.day()));
    ///
    /// let date = ShahiDateTime::parse("2025-01-08T14:30:00", &zone).unwrap();
    /// assert_eq!("2583/10/19 14:30:00", date.to_string());
    /// ```
    pub fn parse(text: &str, zone: &Zone) -> Result<Self, Error> {
        if let Some([year, month, day, hour, minute, second]) = numeric_fields(text) {
            return Self::create(year, month, day, hour, minute, second, zone);
        }
        tracing::debug!(text, "not an imperial date, trying Gregorian grammars");
        parse_gregorian(text.trim(), zone).ok_or_else(|| Error::format(text))?
    }

    /// Imperial year.
    pub fn year(&self) -> i32 {
        self.year
    }
    /// Month, `1..=12`.
    pub fn month(&self) -> i32 {
        self.month
    }
    /// Day of month.
    pub fn day(&self) -> i32 {
        self.day
    }
    /// Hour, `0..=23` once normalized.
    pub fn hour(&self) -> i32 {
        self.hour
    }
    /// Minute, `0..=59`.
    pub fn minute(&self) -> i32 {
        self.minute
    }
    /// Second, `0..=59`.
    pub fn second(&self) -> i32 {
        self.second
    }
    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp.as_second()
    }
    /// The instant this date-time refers to.
    pub fn to_timestamp(&self) -> Timestamp {
        self.timestamp
    }
    /// Zone the calendar fields are read in.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Day of week, `0` (Saturday) to `6` (Friday).
    pub fn day_of_week(&self) -> i32 {
        self.jalali_date().day_of_week()
    }
    /// Day of year, starting from 1.
    pub fn day_of_year(&self) -> i32 {
        jalali::day_of_year(self.month, self.day)
    }
    /// Week of year, counting 7-day blocks from the first day of the year.
    pub fn week_of_year(&self) -> i32 {
        (self.day_of_year() + 6) / 7
    }
    /// Length of the current month, by [`jalali::days_in_month`].
    pub fn days_in_month(&self) -> i32 {
        jalali::days_in_month(self.jalali_year(), self.month)
    }
    /// Persian name of the month, empty if the month is out of range.
    pub fn month_name(&self) -> &'static str {
        jalali::fmt::month(self.month).unwrap_or_default()
    }
    /// Persian name of the weekday.
    pub fn day_name(&self) -> &'static str {
        jalali::fmt::weekday(self.day_of_week()).unwrap_or_default()
    }
    /// Quarter of year, `1..=4`.
    pub fn quarter(&self) -> i32 {
        (self.month + 2) / 3
    }
    /// Whether the current year is leap, by [`jalali::is_leap_year`].
    pub fn is_leap_year(&self) -> bool {
        jalali::is_leap_year(self.jalali_year())
    }

    /// Looks up a derived field.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{Field, FieldValue, ShahiDateTime, Zone};
    ///
    /// let date = ShahiDateTime::from_ymd(2583, 10, 19, &Zone::utc()).unwrap();
    /// assert_eq!(FieldValue::Number(4), date.get(Field::Quarter));
    /// assert_eq!(FieldValue::Name("دی"), date.get("monthName".parse().unwrap()));
    /// ```
    pub fn get(&self, field: Field) -> FieldValue {
        use FieldValue::*;
        match field {
            Field::DayOfWeek => Number(self.day_of_week()),
            Field::DayOfYear => Number(self.day_of_year()),
            Field::WeekOfYear => Number(self.week_of_year()),
            Field::DaysInMonth => Number(self.days_in_month()),
            Field::MonthName => Name(self.month_name()),
            Field::DayName => Name(self.day_name()),
            Field::Quarter => Number(self.quarter()),
        }
    }

    /// Sets the year. Like every setter, recomputes the instant and leaves
    /// the value unchanged on error.
    pub fn set_year(&mut self, year: i32) -> Result<&mut Self, Error> {
        self.set_date(year, self.month, self.day)
    }
    /// Sets the month.
    pub fn set_month(&mut self, month: i32) -> Result<&mut Self, Error> {
        self.set_date(self.year, month, self.day)
    }
    /// Sets the day of month.
    pub fn set_day(&mut self, day: i32) -> Result<&mut Self, Error> {
        self.set_date(self.year, self.month, day)
    }
    /// Sets the hour.
    pub fn set_hour(&mut self, hour: i32) -> Result<&mut Self, Error> {
        self.set_time(hour, self.minute, self.second)
    }
    /// Sets the minute.
    pub fn set_minute(&mut self, minute: i32) -> Result<&mut Self, Error> {
        self.set_time(self.hour, minute, self.second)
    }
    /// Sets the second.
    pub fn set_second(&mut self, second: i32) -> Result<&mut Self, Error> {
        self.set_time(self.hour, self.minute, second)
    }
    /// Sets year, month and day, keeping the time of day.
    pub fn set_date(&mut self, year: i32, month: i32, day: i32) -> Result<&mut Self, Error> {
        self.set_date_time(year, month, day, self.hour, self.minute, self.second)
    }
    /// Sets hour, minute and second. Values past their range carry into
    /// the day, so `set_time(24, 0, 0)` is the start of the next day.
    pub fn set_time(&mut self, hour: i32, minute: i32, second: i32) -> Result<&mut Self, Error> {
        self.set_date_time(self.year, self.month, self.day, hour, minute, second)
    }
    /// Sets all calendar fields and recomputes the instant.
    ///
    /// On error, the value is left unchanged.
    pub fn set_date_time(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<&mut Self, Error> {
        let date = year
            .checked_sub(IMPERIAL_OFFSET)
            .and_then(|jy| Date::checked_from_jalali(jy, month, day))
            .ok_or_else(|| Error::conversion(format!("date {year}/{month}/{day} out of range")))?;
        let epoch = self.zone.to_epoch(date, hour, minute, second)?;
        self.timestamp = Timestamp::from_second(epoch)?;
        (self.year, self.month, self.day) = (year, month, day);
        (self.hour, self.minute, self.second) = (hour, minute, second);
        Ok(self)
    }
    /// Moves to another instant, given in seconds since the Unix epoch, and
    /// recomputes the calendar fields.
    pub fn set_timestamp(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        let timestamp = Timestamp::from_second(seconds)?;
        let civil = self.zone.civil(timestamp);
        self.assign(timestamp, civil);
        Ok(self)
    }

    /// Formats with a pattern.
    ///
    /// | Token | Output                                |
    /// |-------|---------------------------------------|
    /// | `Y`   | year, 4 digits                        |
    /// | `y`   | last 2 digits of the year             |
    /// | `m`   | month, 2 digits                       |
    /// | `n`   | month                                 |
    /// | `d`   | day, 2 digits                         |
    /// | `j`   | day                                   |
    /// | `H`   | hour, 2 digits                        |
    /// | `i`   | minute, 2 digits                      |
    /// | `s`   | second, 2 digits                      |
    /// | `F`   | month name                            |
    /// | `l`   | weekday name                          |
    ///
    /// Other characters are copied. Tokens are replaced in a single pass, so
    /// names are never scanned for tokens again.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{ShahiDateTime, Zone};
    ///
    /// let date = ShahiDateTime::create(2583, 10, 19, 10, 30, 0, &Zone::utc()).unwrap();
    /// assert_eq!("چهارشنبه 19 دی 2583 - 10:30", date.format("l j F Y - H:i"));
    /// ```
    pub fn format(&self, pattern: &str) -> String {
        use std::fmt::Write;

        let mut out = String::with_capacity(pattern.len() * 2);
        for c in pattern.chars() {
            // Writing into a `String` cannot fail.
            let _ = match c {
                'Y' => write!(out, "{:04}", self.year),
                'y' => write!(out, "{:02}", self.year.rem_euclid(100)),
                'm' => write!(out, "{:02}", self.month),
                'n' => write!(out, "{}", self.month),
                'd' => write!(out, "{:02}", self.day),
                'j' => write!(out, "{}", self.day),
                'H' => write!(out, "{:02}", self.hour),
                'i' => write!(out, "{:02}", self.minute),
                's' => write!(out, "{:02}", self.second),
                'F' => out.write_str(self.month_name()),
                'l' => out.write_str(self.day_name()),
                c => out.write_char(c),
            };
        }
        out
    }
    /// Formats as `Y/m/d`.
    pub fn format_date(&self) -> String {
        self.format("Y/m/d")
    }
    /// Formats as `H:i:s`.
    pub fn format_time(&self) -> String {
        self.format("H:i:s")
    }
    /// Formats as `Y/m/d H:i:s`.
    pub fn format_date_time(&self) -> String {
        self.format("Y/m/d H:i:s")
    }

    /// Formats the instant as a Gregorian `YYYY-MM-DD HH:MM:SS` in the
    /// value's zone.
    pub fn to_gregorian(&self) -> String {
        self.zone
            .time_zone()
            .to_datetime(self.timestamp)
            .strftime("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
    /// Converts into a `jiff` zoned date-time.
    pub fn to_zoned(&self) -> Zoned {
        self.timestamp.to_zoned(self.zone.time_zone().clone())
    }
    /// Returns a plain projection of the fields.
    pub fn to_fields(&self) -> ShahiFields {
        ShahiFields {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            timestamp: self.timestamp(),
            timezone: self.zone.name().to_owned(),
        }
    }

    fn jalali_year(&self) -> i32 {
        jalali::shahi_to_jalali_year(self.year)
    }
    fn jalali_date(&self) -> Date {
        Date::from_jalali(self.jalali_year(), self.month, self.day)
    }
    fn assign(&mut self, timestamp: Timestamp, civil: Civil) {
        let (jy, jm, jd) = civil.date.jalali();
        self.year = jy + IMPERIAL_OFFSET;
        (self.month, self.day) = (jm, jd);
        (self.hour, self.minute, self.second) = (civil.hour, civil.minute, civil.second);
        self.timestamp = timestamp;
    }
}

fn parse_gregorian(text: &str, zone: &Zone) -> Option<Result<ShahiDateTime, Error>> {
    if let Ok(zoned) = text.parse::<Zoned>() {
        return Some(Ok(ShahiDateTime::from_timestamp(zoned.timestamp(), zone)));
    }
    if let Ok(timestamp) = text.parse::<Timestamp>() {
        return Some(Ok(ShahiDateTime::from_timestamp(timestamp, zone)));
    }
    let dt = match text.parse::<DateTime>() {
        Ok(dt) => dt,
        Err(_) => text.parse::<jiff::civil::Date>().ok()?.at(0, 0, 0, 0),
    };
    Some(ShahiDateTime::from_gregorian(
        dt.year().into(),
        dt.month().into(),
        dt.day().into(),
        dt.hour().into(),
        dt.minute().into(),
        dt.second().into(),
        zone,
    ))
}

impl fmt::Display for ShahiDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_date_time())
    }
}

impl Serialize for ShahiDateTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&Zoned> for ShahiDateTime {
    fn from(zoned: &Zoned) -> Self {
        Self::from_zoned(zoned)
    }
}

impl From<Zoned> for ShahiDateTime {
    fn from(zoned: Zoned) -> Self {
        Self::from_zoned(&zoned)
    }
}

impl From<&ShahiDateTime> for ShahiFields {
    fn from(date: &ShahiDateTime) -> Self {
        date.to_fields()
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dayOfWeek" => Field::DayOfWeek,
            "dayOfYear" => Field::DayOfYear,
            "weekOfYear" => Field::WeekOfYear,
            "daysInMonth" => Field::DaysInMonth,
            "monthName" => Field::MonthName,
            "dayName" => Field::DayName,
            "quarter" => Field::Quarter,
            _ => return Err(Error::format(s)),
        })
    }
}

//! Time zones, and conversion between civil date-times and epoch seconds.
//!
//! A [`Zone`] is passed explicitly wherever a civil time has to be tied to
//! an instant; nothing in this crate reads a process-wide default.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::date::Date;
use crate::error::Error;

const SECONDS_PER_DAY: i64 = 86_400;

/// A time zone together with the label it is displayed under.
///
/// # Example
///
/// ```
/// use shahi::Zone;
///
/// let zone = Zone::named("Asia/Tehran").unwrap();
/// assert_eq!("Asia/Tehran", zone.name());
/// assert_eq!("UTC", Zone::utc().name());
/// ```
#[derive(Debug, Clone)]
pub struct Zone {
    label: String,
    tz: TimeZone,
}

/// Civil fields of an instant in some zone, with the date on the Gregorian
/// side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Civil {
    pub date: Date,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl Zone {
    /// Creates a zone from a `jiff` time zone, displayed as `label`.
    pub fn new(label: impl Into<String>, tz: TimeZone) -> Self {
        Self {
            label: label.into(),
            tz,
        }
    }
    /// Coordinated universal time.
    pub fn utc() -> Self {
        Self::new("UTC", TimeZone::UTC)
    }
    /// The zone of the host system. `TZ` is honoured if set.
    pub fn system() -> Self {
        Self::from_time_zone(TimeZone::system())
    }
    /// Looks up an IANA time zone by name, e.g. `"Asia/Tehran"`.
    pub fn named(name: &str) -> Result<Self, Error> {
        let tz = TimeZone::get(name)?;
        Ok(Self::new(name, tz))
    }
    /// Wraps a `jiff` time zone, labelling it by its IANA name or, for fixed
    /// offsets, by the offset.
    pub fn from_time_zone(tz: TimeZone) -> Self {
        let label = match tz.iana_name() {
            Some(name) => name.to_owned(),
            None => match tz.to_fixed_offset() {
                Ok(offset) => offset.to_string(),
                Err(_) => "Etc/Unknown".to_owned(),
            },
        };
        Self { label, tz }
    }

    /// Returns the display label of the zone.
    pub fn name(&self) -> &str {
        &self.label
    }
    /// Returns the underlying `jiff` time zone.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Returns the epoch seconds of a civil time in this zone.
    ///
    /// Hour, minute and second are not limited to their usual ranges; the
    /// excess carries into adjacent days. Civil times skipped or repeated by
    /// a transition resolve the way `jiff` does by default (the later side
    /// of a gap, the earlier side of a fold).
    pub(crate) fn to_epoch(
        &self,
        date: Date,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<i64, Error> {
        let secs = i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second);
        let date = i32::try_from(secs.div_euclid(SECONDS_PER_DAY))
            .ok()
            .and_then(|days| date.day_number().checked_add(days))
            .map(Date::from_day_number)
            .ok_or_else(|| Error::conversion("day out of range"))?;
        let secs = secs.rem_euclid(SECONDS_PER_DAY);
        let (y, m, d) = date.gregorian();
        let year = i16::try_from(y)
            .map_err(|_| Error::conversion(format!("Gregorian year {y} out of range")))?;
        let dt = DateTime::new(
            year,
            m as i8,
            d as i8,
            (secs / 3600) as i8,
            (secs % 3600 / 60) as i8,
            (secs % 60) as i8,
            0,
        )?;
        let epoch = self.tz.to_timestamp(dt)?.as_second();
        tracing::trace!(zone = %self.label, %dt, epoch, "civil time to epoch");
        Ok(epoch)
    }

    /// Returns the civil fields of an instant.
    pub(crate) fn civil(&self, ts: Timestamp) -> Civil {
        self.tz.to_datetime(ts).into()
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::utc()
    }
}

impl From<DateTime> for Civil {
    fn from(dt: DateTime) -> Civil {
        Civil {
            date: Date::from_gregorian(dt.year().into(), dt.month().into(), dt.day().into()),
            hour: dt.hour().into(),
            minute: dt.minute().into(),
            second: dt.second().into(),
        }
    }
}

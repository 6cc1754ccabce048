//! Utilities for converting between Gregorian dates and the imperial (Shahi)
//! calendar.
//!
//! The imperial calendar is the Jalali (Persian solar) calendar with its
//! years counted 1180 years ahead of the Solar Hijri era, so Jalali 1403 is
//! imperial 2583.
//!
//! # Examples
//!
//! Conversion of a calendar date:
//!
//! ```
//! use shahi::Date;
//!
//! let date = Date::from_gregorian(2025, 1, 8);
//!
//! assert_eq!((1403, 10, 19), date.jalali());
//! assert_eq!(4, date.day_of_week()); // Wednesday, weeks start on Saturday
//! ```
//!
//! Date-time with arithmetic and formatting:
//!
//! ```
//! use shahi::{ShahiDateTime, Zone};
//!
//! let zone = Zone::named("Asia/Tehran").unwrap();
//! let mut date = ShahiDateTime::from_gregorian(2025, 1, 8, 14, 30, 0, &zone).unwrap();
//!
//! assert_eq!("2583/10/19 14:30:00", date.to_string());
//! date.add_months(3).unwrap().end_month().unwrap();
//! assert_eq!("2584/01/31 23:59:59", date.to_string());
//! ```
//!
//! Validation of form input:
//!
//! ```
//! use shahi::{Rule, Validator, Zone};
//!
//! let validator = Validator::new(Zone::utc());
//!
//! assert!(validator.check("2588/12/30", &Rule::Date)); // leap year
//! assert!(!validator.check("2536/12/30", &Rule::Date));
//! assert!(validator.check("2537/10/18", &"shahi_date_before:today".parse().unwrap()));
//! ```
//!
//! Every operation that ties a civil time to an instant takes an explicit
//! [`Zone`]; nothing reads a process-wide default.

pub mod date;
pub mod error;
pub mod jalali;
pub mod shahi;
pub mod validate;
pub mod zone;

pub use date::{Date, YearType};
pub use error::Error;
pub use shahi::{Field, FieldValue, ShahiDateTime, ShahiFields, Unit};
pub use validate::{Rule, Validator};
pub use zone::Zone;

//! Error types for this crate.

/// Error type for all fallible operations in this crate.
///
/// [`Error::InvalidMonth`] and [`Error::InvalidDay`] are only reported by
/// explicit checks ([`check_date`](crate::jalali::check_date) and the
/// validator); constructing a [`ShahiDateTime`](crate::ShahiDateTime) from
/// out-of-range fields is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when a string matches none of the recognized date grammars.
    #[error("unrecognized date: {input:?}")]
    Format {
        /// The text that failed to parse.
        input: String,
    },

    /// Returned when a month number is outside `1..=12`.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number.
        month: i32,
    },

    /// Returned when a day is outside the month it is given for.
    #[error("invalid day: {day} for month {month} of year {year} (max {max_day})")]
    InvalidDay {
        /// Jalali or Shahi year, as given.
        year: i32,
        /// Month of the day.
        month: i32,
        /// The invalid day.
        day: i32,
        /// Length of the month.
        max_day: i32,
    },

    /// Returned when a civil time or an instant cannot be represented, e.g.
    /// the Gregorian year leaves the supported range.
    #[error("conversion failed: {reason}")]
    Conversion {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<jiff::Error> for Error {
    fn from(err: jiff::Error) -> Self {
        Error::Conversion {
            reason: err.to_string(),
        }
    }
}

impl Error {
    pub(crate) fn format(input: &str) -> Self {
        Error::Format {
            input: input.to_owned(),
        }
    }

    pub(crate) fn conversion(reason: impl Into<String>) -> Self {
        Error::Conversion {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let data = [
            (Error::format("2537-xx"), r#"unrecognized date: "2537-xx""#),
            (Error::InvalidMonth { month: 13 }, "invalid month: 13 (must be 1..=12)"),
            (
                Error::InvalidDay {
                    year: 2536,
                    month: 12,
                    day: 30,
                    max_day: 29,
                },
                "invalid day: 30 for month 12 of year 2536 (max 29)",
            ),
            (Error::conversion("year out of range"), "conversion failed: year out of range"),
        ];
        for (err, std) in data {
            assert_eq!(std, err.to_string());
        }
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync + 'static>() {}
        assert_impl::<Error>();
    }

    #[test]
    fn from_jiff() {
        let err: Error = jiff::civil::Date::new(2025, 2, 30).unwrap_err().into();
        assert!(matches!(err, Error::Conversion { .. }));
    }
}

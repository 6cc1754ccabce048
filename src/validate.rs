//! Validation rules for user supplied imperial dates.
//!
//! Every rule answers with a plain `bool`. Values that fail to parse, bounds
//! that fail to resolve, and conversions that fail are all reported as
//! `false`; the underlying [`Error`] is only logged at `debug` level.
//!
//! # Example
//!
//! ```
//! use shahi::{Rule, Validator, Zone};
//!
//! let validator = Validator::new(Zone::utc()).with_field("starts_at", "2537/01/01");
//!
//! let rule: Rule = "shahi_date_after:starts_at".parse().unwrap();
//! assert!(validator.check("2537/10/18", &rule));
//! assert!(!validator.check("2536/12/30", &rule));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::jalali;
use crate::shahi::{self, ShahiDateTime};
use crate::zone::Zone;

/// A named validation rule together with its parameters.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Rule {
    /// `shahi_date`
    Date,
    /// `shahi_date_after:<token>`
    After(String),
    /// `shahi_date_after_equal:<token>`
    AfterOrEqual(String),
    /// `shahi_date_before:<token>`
    Before(String),
    /// `shahi_date_before_equal:<token>`
    BeforeOrEqual(String),
    /// `shahi_date_equals:<token>`
    Equals(String),
    /// `shahi_date_between:<start>,<end>`
    Between(String, String),
}

impl Rule {
    /// Returns the rule name, without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Date => "shahi_date",
            Rule::After(_) => "shahi_date_after",
            Rule::AfterOrEqual(_) => "shahi_date_after_equal",
            Rule::Before(_) => "shahi_date_before",
            Rule::BeforeOrEqual(_) => "shahi_date_before_equal",
            Rule::Equals(_) => "shahi_date_equals",
            Rule::Between(..) => "shahi_date_between",
        }
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name, Some(params)),
            None => (s, None),
        };
        let rule = match (name, params) {
            ("shahi_date", None) => Rule::Date,
            ("shahi_date_after", Some(p)) => Rule::After(p.to_owned()),
            ("shahi_date_after_equal", Some(p)) => Rule::AfterOrEqual(p.to_owned()),
            ("shahi_date_before", Some(p)) => Rule::Before(p.to_owned()),
            ("shahi_date_before_equal", Some(p)) => Rule::BeforeOrEqual(p.to_owned()),
            ("shahi_date_equals", Some(p)) => Rule::Equals(p.to_owned()),
            ("shahi_date_between", Some(p)) => match p.split_once(',') {
                Some((start, end)) => Rule::Between(start.to_owned(), end.to_owned()),
                None => return Err(Error::format(s)),
            },
            _ => return Err(Error::format(s)),
        };
        Ok(rule)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Date => f.write_str(self.name()),
            Rule::After(p)
            | Rule::AfterOrEqual(p)
            | Rule::Before(p)
            | Rule::BeforeOrEqual(p)
            | Rule::Equals(p) => write!(f, "{}:{p}", self.name()),
            Rule::Between(start, end) => write!(f, "{}:{start},{end}", self.name()),
        }
    }
}

/// Checks strings against the imperial calendar.
///
/// The [`Zone`] anchors `today`, `yesterday` and `tomorrow` and is used when
/// parsing. The optional field data maps the names of other form fields to
/// their raw values, so a comparison can name another field instead of a
/// date.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    zone: Zone,
    data: HashMap<String, String>,
}

impl Validator {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            data: HashMap::new(),
        }
    }

    /// Replaces the field data.
    pub fn with_data(mut self, data: HashMap<String, String>) -> Self {
        self.data = data;
        self
    }

    /// Adds one field to the field data.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }

    /// Checks `value` against `rule`.
    pub fn check(&self, value: &str, rule: &Rule) -> bool {
        match rule {
            Rule::Date => self.date(value),
            Rule::After(token) => self.after(value, token),
            Rule::AfterOrEqual(token) => self.after_or_equal(value, token),
            Rule::Before(token) => self.before(value, token),
            Rule::BeforeOrEqual(token) => self.before_or_equal(value, token),
            Rule::Equals(token) => self.equals(value, token),
            Rule::Between(start, end) => self.between(value, start, end),
        }
    }

    /// Returns whether `value` is a well-formed imperial date
    /// (`YYYY-M-D` or `YYYY/M/D`, optionally followed by `HH:MM:SS`) naming a
    /// day that exists.
    ///
    /// # Example
    ///
    /// ```
    /// use shahi::{Validator, Zone};
    ///
    /// let validator = Validator::new(Zone::utc());
    /// assert!(validator.date("2588/12/30"));
    /// assert!(!validator.date("2536/12/30"));
    /// assert!(!validator.date("2537/13/01"));
    /// ```
    pub fn date(&self, value: &str) -> bool {
        fold_unit("shahi_date", check_format(value))
    }

    /// Returns whether `value` is strictly after `token`.
    pub fn after(&self, value: &str, token: &str) -> bool {
        self.compare("shahi_date_after", value, token, ShahiDateTime::gt)
    }
    pub fn after_or_equal(&self, value: &str, token: &str) -> bool {
        self.compare("shahi_date_after_equal", value, token, ShahiDateTime::gte)
    }
    /// Returns whether `value` is strictly before `token`.
    pub fn before(&self, value: &str, token: &str) -> bool {
        self.compare("shahi_date_before", value, token, ShahiDateTime::lt)
    }
    pub fn before_or_equal(&self, value: &str, token: &str) -> bool {
        self.compare("shahi_date_before_equal", value, token, ShahiDateTime::lte)
    }
    /// Returns whether `value` falls on the same calendar day as `token`.
    pub fn equals(&self, value: &str, token: &str) -> bool {
        self.compare("shahi_date_equals", value, token, ShahiDateTime::eq)
    }

    /// Returns whether `value` lies within `start..=end`.
    ///
    /// Only `today` is recognised as a symbolic bound here; other words and
    /// field names are parsed as dates.
    pub fn between(&self, value: &str, start: &str, end: &str) -> bool {
        fold("shahi_date_between", self.try_between(value, start, end))
    }

    fn try_between(&self, value: &str, start: &str, end: &str) -> Result<bool, Error> {
        let date = self.value(value)?;
        let start = self.bound(start)?;
        let end = self.bound(end)?;
        Ok(date.between(&start, &end))
    }

    fn compare(
        &self,
        rule: &str,
        value: &str,
        token: &str,
        op: fn(&ShahiDateTime, &ShahiDateTime) -> bool,
    ) -> bool {
        let result = self
            .value(value)
            .and_then(|date| Ok(op(&date, &self.resolve(token)?)));
        fold(rule, result)
    }

    fn value(&self, value: &str) -> Result<ShahiDateTime, Error> {
        check_format(value)?;
        ShahiDateTime::parse(value, &self.zone)
    }

    fn resolve(&self, token: &str) -> Result<ShahiDateTime, Error> {
        match token {
            "today" => ShahiDateTime::today(&self.zone),
            "yesterday" => ShahiDateTime::yesterday(&self.zone),
            "tomorrow" => ShahiDateTime::tomorrow(&self.zone),
            _ => match self.data.get(token) {
                Some(other) => ShahiDateTime::parse(other, &self.zone),
                None => ShahiDateTime::parse(token, &self.zone),
            },
        }
    }

    fn bound(&self, token: &str) -> Result<ShahiDateTime, Error> {
        match token {
            "today" => ShahiDateTime::today(&self.zone),
            _ => ShahiDateTime::parse(token, &self.zone),
        }
    }
}

fn check_format(value: &str) -> Result<(), Error> {
    let [year, month, day, ..] = shahi::numeric_fields(value).ok_or_else(|| Error::format(value))?;
    jalali::check_date(jalali::shahi_to_jalali_year(year), month, day).map_err(|err| match err {
        Error::InvalidDay {
            month,
            day,
            max_day,
            ..
        } => Error::InvalidDay {
            year,
            month,
            day,
            max_day,
        },
        err => err,
    })
}

fn fold(rule: &str, result: Result<bool, Error>) -> bool {
    result.unwrap_or_else(|err| {
        tracing::debug!(rule, %err, "validation failed");
        false
    })
}

fn fold_unit(rule: &str, result: Result<(), Error>) -> bool {
    fold(rule, result.map(|()| true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new(Zone::utc())
    }

    #[test]
    fn date_format() {
        let v = validator();
        for (value, std) in [
            ("2537/10/18", true),
            ("2537-10-18", true),
            ("2537-1-8", true),
            ("2537-10-18 14:30:00", true),
            ("2588/12/30", true),
            ("2536/12/29", true),
            ("2537/06/31", true),
            ("2537/07/31", false),
            ("2536/12/30", false),
            ("2537/13/01", false),
            ("2537/00/10", false),
            ("2537/10/32", false),
            ("2537/10/00", false),
            ("", false),
            ("   ", false),
            ("today", false),
            ("37/10/18", false),
            ("2537.10.18", false),
            ("2025-01-08T00:00:00", false),
        ] {
            assert_eq!(std, v.date(value), "{value:?}");
        }
    }

    #[test]
    fn format_errors() {
        assert_eq!(Err(Error::format("")), check_format(""));
        assert_eq!(Err(Error::InvalidMonth { month: 13 }), check_format("2537/13/01"));
        assert_eq!(
            Err(Error::InvalidDay {
                year: 2536,
                month: 12,
                day: 30,
                max_day: 29
            }),
            check_format("2536/12/30")
        );
        assert!(fold_unit("shahi_date", check_format("2537/10/18")));
    }

    #[test]
    fn literal_comparisons() {
        let v = validator();
        assert!(v.after("2537/10/18", "2537/10/17"));
        assert!(!v.after("2537/10/18", "2537/10/18"));
        assert!(v.after_or_equal("2537/10/18", "2537/10/18"));
        assert!(!v.after_or_equal("2537/10/17", "2537/10/18"));
        assert!(v.before("2537/10/17", "2537-10-18"));
        assert!(!v.before("2537/10/18", "2537/10/18"));
        assert!(v.before_or_equal("2537/10/18", "2537/10/18"));
        assert!(!v.before_or_equal("2537/10/19", "2537/10/18"));
        assert!(v.equals("2537/10/18", "2537-10-18"));
        assert!(!v.equals("2537/10/18", "2537/10/19"));
    }

    #[test]
    fn equals_ignores_time() {
        let v = validator();
        assert!(v.equals("2537/10/18 23:00:00", "2537/10/18 01:00:00"));
        assert!(v.after("2537/10/18 23:00:00", "2537/10/18 01:00:00"));
        assert!(!v.after_or_equal("2537/10/18 01:00:00", "2537/10/18 23:00:00"));
    }

    /// Runs `checks` on today's date, again if the day ends meanwhile.
    fn on_today<const N: usize>(
        v: &Validator,
        checks: impl Fn(&str) -> [bool; N],
    ) -> [bool; N] {
        loop {
            let today = ShahiDateTime::today(v.zone()).unwrap().format_date();
            let results = checks(&today);
            if ShahiDateTime::today(v.zone()).unwrap().format_date() == today {
                return results;
            }
        }
    }

    #[test]
    fn symbolic_tokens() {
        let v = validator();
        let results = on_today(&v, |today| {
            let mut date = ShahiDateTime::parse(today, v.zone()).unwrap();
            let tomorrow = date.add_day().unwrap().format_date();
            let yesterday = date.sub_days(2).unwrap().format_date();
            [
                v.equals(today, "today"),
                v.after_or_equal(today, "today"),
                v.before_or_equal(today, "today"),
                !v.after(today, "today"),
                v.after(today, "yesterday"),
                v.before(today, "tomorrow"),
                v.equals(&tomorrow, "tomorrow"),
                v.equals(&yesterday, "yesterday"),
                v.after(&tomorrow, "today"),
                v.before(&yesterday, "today"),
            ]
        });
        for (i, ok) in results.into_iter().enumerate() {
            assert!(ok, "check {i}");
        }
    }

    #[test]
    fn cross_field() {
        let v = validator()
            .with_field("start", "2537/10/01")
            .with_field("today", "2000/01/01")
            .with_field("broken", "not a date");
        assert!(v.after("2537/10/18", "start"));
        assert!(!v.before("2537/10/18", "start"));
        assert!(v.equals("2537/10/01", "start"));
        // Symbolic tokens win over field names.
        assert!(v.before("2537/10/18", "today"));
        assert!(!v.after("2537/10/18", "today"));
        assert!(!v.after("2537/10/18", "broken"));
        assert!(!v.before("2537/10/18", "broken"));
        // Unknown field names are parsed as dates and fail.
        assert!(!v.after("2537/10/18", "finish"));

        let data = HashMap::from([("end".to_owned(), "2538-01-01".to_owned())]);
        let v = validator().with_data(data);
        assert!(v.before("2537/10/18", "end"));
        assert_eq!(Some("2538-01-01"), v.data().get("end").map(String::as_str));
    }

    #[test]
    fn gregorian_comparison_target() {
        let v = validator();
        // 2025-01-08 is 2583/10/19.
        assert!(v.equals("2583/10/19", "2025-01-08T10:00:00"));
        assert!(v.before("2583/10/18", "2025-01-08T00:00:00Z"));
    }

    #[test]
    fn between() {
        let v = validator();
        assert!(v.between("2537/10/18", "2537/10/01", "2537/10/30"));
        assert!(v.between("2537/10/01", "2537/10/01", "2537/10/30"));
        assert!(!v.between("2537/11/01", "2537/10/01", "2537/10/30"));
        assert!(v.between("2537/10/18", "2500/01/01", "today"));
        assert!(!v.between("2537/10/18", "today", "today"));

        let [inside, symbolic] = on_today(&v, |today| {
            // Only `today` is symbolic.
            [v.between(today, "today", "today"), v.between(today, "yesterday", "tomorrow")]
        });
        assert!(inside);
        assert!(!symbolic);
        let v = v.with_field("start", "2500/01/01");
        assert!(!v.between("2537/10/18", "start", "today"));
    }

    #[test]
    fn malformed_inputs() {
        let v = validator();
        for value in ["", "2537/13/01", "2536/12/30", "soon"] {
            assert!(!v.after(value, "2500/01/01"), "{value:?}");
            assert!(!v.equals(value, value), "{value:?}");
            assert!(!v.between(value, "2500/01/01", "2600/01/01"), "{value:?}");
        }
        assert!(!v.after("2537/10/18", ""));
        assert!(!v.after("2537/10/18", "garbage"));
        assert!(!v.between("2537/10/18", "garbage", "today"));
    }

    #[test]
    fn rule_strings() {
        let data = [
            ("shahi_date", Rule::Date),
            ("shahi_date_after:today", Rule::After("today".to_owned())),
            ("shahi_date_after_equal:start", Rule::AfterOrEqual("start".to_owned())),
            ("shahi_date_before:2537/10/18", Rule::Before("2537/10/18".to_owned())),
            ("shahi_date_before_equal:tomorrow", Rule::BeforeOrEqual("tomorrow".to_owned())),
            ("shahi_date_equals:yesterday", Rule::Equals("yesterday".to_owned())),
            (
                "shahi_date_between:2537/01/01,today",
                Rule::Between("2537/01/01".to_owned(), "today".to_owned()),
            ),
        ];
        for (text, std) in data {
            let rule: Rule = text.parse().unwrap();
            assert_eq!(std, rule);
            assert_eq!(text, rule.to_string());
            assert!(text.starts_with(rule.name()));
        }
        for text in [
            "",
            "shahi",
            "shahi_date:x",
            "shahi_date_after",
            "shahi_date_between:today",
            "date_after:today",
        ] {
            assert!(text.parse::<Rule>().is_err(), "{text:?}");
        }
    }

    #[test]
    fn check_dispatch() {
        let v = validator().with_field("start", "2537/10/01");
        let data = [
            ("shahi_date", "2537/10/18", true),
            ("shahi_date", "2537/10/31", false),
            ("shahi_date_after:start", "2537/10/18", true),
            ("shahi_date_after_equal:2537/10/18", "2537/10/18", true),
            ("shahi_date_before:start", "2537/10/18", false),
            ("shahi_date_before_equal:2537/10/18", "2537/10/18", true),
            ("shahi_date_equals:2537/10/18", "2537/10/18 12:00:00", true),
            ("shahi_date_between:2537/10/01,2537/10/30", "2537/10/18", true),
            ("shahi_date_between:2537/10/19,2537/10/30", "2537/10/18", false),
        ];
        for (rule, value, std) in data {
            let rule: Rule = rule.parse().unwrap();
            assert_eq!(std, v.check(value, &rule), "{rule} {value:?}");
        }
    }
}

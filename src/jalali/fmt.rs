//! Persian month and weekday names.

/// Month names, `[0]` being Farvardin.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Weekday names. The week starts on Saturday, so `[0]` is Shanbe and `[6]`
/// is Jom'e.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یک\u{200c}شنبه",
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنج\u{200c}شنبه",
    "جمعه",
];

/// Returns the name of month `m`, or `None` if `m` is not in `1..=12`.
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert_eq!(Some("دی"), jalali::fmt::month(10));
/// assert_eq!(None, jalali::fmt::month(13));
/// ```
pub fn month(m: i32) -> Option<&'static str> {
    usize::try_from(m - 1)
        .ok()
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
}

/// Returns the name of weekday `w` (`0` = Saturday), or `None` if `w` is not
/// in `0..=6`.
///
/// # Example
///
/// ```
/// use shahi::jalali;
///
/// assert_eq!(Some("جمعه"), jalali::fmt::weekday(6));
/// ```
pub fn weekday(w: i32) -> Option<&'static str> {
    usize::try_from(w)
        .ok()
        .and_then(|i| WEEKDAY_NAMES.get(i))
        .copied()
}

use shahi::{Date, jalali};

/// Iterates over every Gregorian date in `from..=to` (years).
fn gregorian_days(from: i32, to: i32) -> impl Iterator<Item = (i32, i32, i32)> {
    let start = Date::from_gregorian(from, 1, 1);
    let end = Date::from_gregorian(to + 1, 1, 1);
    (0..end - start).map(move |n| (start + n).gregorian())
}

/// Month length as the day-counting converter sees it. Month 12 follows the
/// 33-year arithmetic cycle, which does not always agree with
/// [`jalali::is_leap_year`].
fn converter_month_length(jy: i32, jm: i32) -> i32 {
    Date::from_jalali(jy, jm + 1, 1) - Date::from_jalali(jy, jm, 1)
}

#[test]
fn test_gregorian_round_trip() {
    for (y, m, d) in gregorian_days(1700, 2400) {
        let (jy, jm, jd) = jalali::gregorian_to_jalali(y, m, d);
        assert_eq!((y, m, d), jalali::jalali_to_gregorian(jy, jm, jd));
        assert_eq!((jy, jm, jd), jalali::gregorian_to_jalali_tabular(y, m, d));
    }
}

#[test]
fn test_jalali_round_trip() {
    for jy in 1000..=1800 {
        for jm in 1..=12 {
            for jd in 1..=converter_month_length(jy, jm) {
                let (gy, gm, gd) = jalali::jalali_to_gregorian(jy, jm, jd);
                assert_eq!((jy, jm, jd), jalali::gregorian_to_jalali(gy, gm, gd));
            }
        }
    }
}

#[test]
fn test_consecutive_days() {
    let mut prev = jalali::gregorian_to_jalali(1899, 12, 31);
    for (y, m, d) in gregorian_days(1900, 2100) {
        let next = jalali::gregorian_to_jalali(y, m, d);
        let (py, pm, pd) = prev;
        let std = if pd < converter_month_length(py, pm) {
            (py, pm, pd + 1)
        } else if pm < 12 {
            (py, pm + 1, 1)
        } else {
            (py + 1, 1, 1)
        };
        assert_eq!(std, next, "after {prev:?}");
        prev = next;
    }
}

#[test]
fn test_month_lengths_outside_month_12() {
    for jy in 1000..=1800 {
        for jm in 1..=11 {
            assert_eq!(jalali::days_in_month(jy, jm), converter_month_length(jy, jm));
        }
        assert!((29..=30).contains(&converter_month_length(jy, 12)));
    }
}

#[test]
fn test_leap_rules_diverge() {
    // 1403 is a leap year in the arithmetic cycle, 1404 under the 2820-year rule.
    assert_eq!(30, converter_month_length(1403, 12));
    assert_eq!(29, converter_month_length(1404, 12));
    assert!(!jalali::is_leap_year(1403));
    assert!(jalali::is_leap_year(1404));
}

#[test]
fn test_leap_year_period() {
    for y in -5000..5000 {
        assert_eq!(jalali::is_leap_year(y), jalali::is_leap_year(y + 2820), "{y}");
    }
}

#[test]
fn test_days_in_month() {
    for y in 1300..1500 {
        for m in 1..=6 {
            assert_eq!(31, jalali::days_in_month(y, m));
        }
        for m in 7..=11 {
            assert_eq!(30, jalali::days_in_month(y, m));
        }
        let std = if jalali::is_leap_year(y) { 30 } else { 29 };
        assert_eq!(std, jalali::days_in_month(y, 12), "{y}");
    }
}

#[test]
fn test_imperial_fixed_point() {
    let (jy, jm, jd) = jalali::gregorian_to_jalali(2025, 1, 8);
    assert_eq!((2583, 10, 19), (jalali::jalali_to_shahi_year(jy), jm, jd));
    assert_eq!((2025, 1, 8), jalali::jalali_to_gregorian(jalali::shahi_to_jalali_year(2583), 10, 19));
}

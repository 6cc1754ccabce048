use std::collections::HashMap;

use shahi::{Rule, ShahiDateTime, Validator, Zone};

fn validator() -> Validator {
    Validator::new(Zone::utc())
}

#[test]
fn test_format_rule() {
    let v = validator();
    assert!(!v.date("2537/13/01"));
    assert!(!v.date("2537/10/32"));
    assert!(!v.date("2536/12/30"));
    assert!(v.date("2588/12/30"));
    assert!(v.date("2537-10-18 14:30:00"));
    assert!(!v.date(""));
}

fn current_date() -> String {
    ShahiDateTime::today(&Zone::utc()).unwrap().format_date()
}

#[test]
fn test_rule_strings() {
    let v = validator().with_data(HashMap::from([
        ("start_date".to_owned(), "2537/01/01".to_owned()),
        ("end_date".to_owned(), "2537/12/29".to_owned()),
    ]));

    let data = [
        ("shahi_date", "2537/10/18", true),
        ("shahi_date_after:start_date", "2537/10/18", true),
        ("shahi_date_after:end_date", "2537/10/18", false),
        ("shahi_date_before:end_date", "2537/10/18", true),
        ("shahi_date_after_equal:start_date", "2537/01/01", true),
        ("shahi_date_before_equal:start_date", "2537/01/02", false),
        ("shahi_date_before:today", "2537/10/18", true),
        ("shahi_date_between:2537/01/01,2537/12/29", "2537/10/18", true),
        ("shahi_date_between:2537/01/01,today", "2537/10/18", true),
        ("shahi_date_between:start_date,end_date", "2537/10/18", false),
    ];
    for (rule, value, std) in data {
        let rule: Rule = rule.parse().unwrap();
        assert_eq!(std, v.check(value, &rule), "{rule} on {value:?}");
    }
}

#[test]
fn test_rule_strings_today() {
    let v = validator();
    let data = [
        ("shahi_date_equals:today", true),
        ("shahi_date_after:yesterday", true),
        ("shahi_date_before:tomorrow", true),
        ("shahi_date_after:today", false),
        ("shahi_date_between:today,today", true),
    ];
    // Retried when the day ends between reading the date and checking it.
    let (today, results) = loop {
        let today = current_date();
        let results = data.map(|(rule, _)| v.check(&today, &rule.parse::<Rule>().unwrap()));
        if today == current_date() {
            break (today, results);
        }
    };
    for ((rule, std), result) in data.into_iter().zip(results) {
        assert_eq!(std, result, "{rule} on {today:?}");
    }
}

#[test]
fn test_failures_are_false() {
    let v = validator();
    let rules = [
        "shahi_date_after:2537/01/01",
        "shahi_date_after_equal:2537/01/01",
        "shahi_date_before:2600/01/01",
        "shahi_date_before_equal:2600/01/01",
        "shahi_date_equals:2537/10/18",
        "shahi_date_between:2537/01/01,2600/01/01",
    ];
    for rule in rules {
        let rule: Rule = rule.parse().unwrap();
        assert!(v.check("2537/10/18", &rule), "{rule}");
        for value in ["", "2537/10/31", "next week", "2537/10"] {
            assert!(!v.check(value, &rule), "{rule} on {value:?}");
        }
    }
    assert!(!v.after("2537/10/18", "someday"));
}

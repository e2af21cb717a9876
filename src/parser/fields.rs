use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\D)(\d{1,2})/(jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez)(?:/(\d{4}))?")
        .unwrap()
});
static ALL_CAPS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\p{Lu}{3,}\b").unwrap());

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1), ("fev", 2), ("mar", 3), ("abr", 4),
    ("mai", 5), ("jun", 6), ("jul", 7), ("ago", 8),
    ("set", 9), ("out", 10), ("nov", 11), ("dez", 12),
];

/// Checked in order; the first entry found anywhere in the span wins.
pub const TECHNIQUES: &[&str] = &[
    "THRUSTER", "CLEAN", "SNATCH", "DEADLIFT", "BENCH", "SQUAT",
    "RING MUSCLE UP", "CONDITIONING", "JERK", "PRESS", "FRONT SQUAT",
    "BACK SQUAT", "POWER CLEAN", "POWER SNATCH", "MUSCLE UP",
];

pub const FOCUS_PLACEHOLDER: &str = "TÉCNICA";

fn month_number(abbr: &str) -> Option<u32> {
    let abbr = abbr.to_lowercase();
    MONTHS.iter().find(|(m, _)| *m == abbr).map(|(_, n)| *n)
}

/// First `DD/mon` (optionally `DD/mon/YYYY`) that names a real calendar date.
/// Returns `None` when the span has no usable date token.
pub fn extract_date(span: &str, default_year: i32) -> Option<NaiveDate> {
    DATE_RE.captures_iter(span).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year = caps
            .get(3)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .unwrap_or(default_year);
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Focus technique: known keyword by list order, then the first all-caps
/// word, then a placeholder.
pub fn extract_focus(span: &str) -> String {
    let upper = span.to_uppercase();
    if let Some(tech) = TECHNIQUES.iter().find(|t| upper.contains(*t)) {
        return tech.to_string();
    }
    ALL_CAPS_RE
        .find(span)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FOCUS_PLACEHOLDER.to_string())
}

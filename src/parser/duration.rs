use std::sync::LazyLock;

use regex::Regex;

// Minute marks: 15' or 15’ or 15′
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*['’′]\s*(?:a|até|-|–)\s*(\d+)\s*['’′]").unwrap());
static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*['’′]").unwrap());

/// Minutes for a section body: `N' a M'` gives `M - N`, a lone `N'` gives `N`,
/// otherwise `default`. Never below one minute.
pub fn resolve_minutes(body: &str, default: u32) -> u32 {
    let minutes = range_minutes(body)
        .or_else(|| single_minutes(body))
        .unwrap_or(default);
    minutes.max(1)
}

fn range_minutes(body: &str) -> Option<u32> {
    RANGE_RE.captures_iter(body).find_map(|caps| {
        let start: u32 = caps[1].parse().ok()?;
        let end: u32 = caps[2].parse().ok()?;
        Some(end.saturating_sub(start))
    })
}

fn single_minutes(body: &str) -> Option<u32> {
    SINGLE_RE
        .captures_iter(body)
        .find_map(|caps| caps[1].parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range() {
        assert_eq!(resolve_minutes("15' a 30'", 10), 15);
        assert_eq!(resolve_minutes("Warm-up (3’ a 15’)\nA", 10), 12);
        assert_eq!(resolve_minutes("40'-52'", 10), 12);
    }

    #[test]
    fn single_mark() {
        assert_eq!(resolve_minutes("20'", 10), 20);
        assert_eq!(resolve_minutes("AMRAP 8′", 10), 8);
    }

    #[test]
    fn range_beats_earlier_single_mark() {
        assert_eq!(resolve_minutes("descanso 2'\n15' a 30'", 10), 15);
    }

    #[test]
    fn default_when_absent() {
        assert_eq!(resolve_minutes("10 burpees", 12), 12);
        assert_eq!(resolve_minutes("", 3), 3);
    }

    #[test]
    fn clamped_to_one_minute() {
        assert_eq!(resolve_minutes("30' a 15'", 10), 1);
        assert_eq!(resolve_minutes("5' a 5'", 10), 1);
        assert_eq!(resolve_minutes("0'", 10), 1);
        assert_eq!(resolve_minutes("", 0), 1);
    }

    #[test]
    fn overflowing_numbers_are_skipped() {
        assert_eq!(resolve_minutes("99999999999' e 7'", 10), 7);
    }
}

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::Slot;

const KEYWORDS: [&str; 5] = [
    r"\bmobility",
    r"\bwarm[ -]?up",
    r"\bskill",
    r"\bstrength",
    r"#?\bwod\b",
];

const NOTES_KEYWORD: &str = r"\bobserva[çc][õo]es";

// Title-line remainder that only carries the time window, e.g. "0' a 3'" or "(20')".
static TIME_WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\s*\d+\s*['’′](?:\s*(?:a|até|-|–)\s*\d+\s*['’′])?\s*\)?$").unwrap()
});

/// One regex per slot locating its title keyword.
static TITLE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|k| Regex::new(&format!("(?i){}", k)).unwrap())
        .collect()
});

/// One regex per slot matching any title that may close it: every later slot
/// keyword plus the notes marker.
static END_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (0..KEYWORDS.len())
        .map(|i| {
            let alternatives: Vec<&str> = KEYWORDS[i + 1..]
                .iter()
                .copied()
                .chain(std::iter::once(NOTES_KEYWORD))
                .collect();
            Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
        })
        .collect()
});

/// Raw body of one slot. `body` is `None` when the slot keyword never occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBody<'a> {
    pub slot: Slot,
    pub body: Option<&'a str>,
}

/// Split a day span into the five slot bodies, treating the slot titles as
/// ordered delimiters.
pub fn split_sections(span: &str) -> [SectionBody<'_>; 5] {
    Slot::ALL.map(|slot| SectionBody {
        slot,
        body: find_body(span, slot),
    })
}

fn find_body(span: &str, slot: Slot) -> Option<&str> {
    let idx = slot.index();
    let title = TITLE_RES[idx].find(span)?;
    let rest = &span[title.end()..];
    let end = END_RES[idx].find(rest).map(|m| m.start()).unwrap_or(rest.len());
    let body = rest[..end].trim_start_matches([' ', '\t', ':']);
    debug!(slot = slot.id(), len = body.len(), "section body");
    Some(body)
}

/// The part of a body that holds content lines. The rest of the title line is
/// skipped when it is only a time window; lines below the title are untouched.
pub fn content_part(body: &str) -> &str {
    let (head, tail) = body.split_once('\n').unwrap_or((body, ""));
    if TIME_WINDOW_RE.is_match(head.trim()) {
        tail
    } else {
        body
    }
}

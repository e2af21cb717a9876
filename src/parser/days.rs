use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::model::Weekday;

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(segunda|ter[çc]a|quarta|quinta|sexta|s[áa]bado|domingo)\b").unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentOptions {
    /// Anchors closing a span shorter than this are treated as incidental
    /// mentions. Zero accepts every anchor.
    pub min_span_chars: usize,
}

/// A located weekday token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayAnchor {
    weekday: Weekday,
    offset: usize,
}

/// The text attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutSpan<'a> {
    pub weekday: Weekday,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Split normalized text into one span per weekday anchor, in document order.
/// Text before the first anchor belongs to no span. Without anchors the whole
/// document becomes a single span for the default weekday.
pub fn segment_days<'a>(text: &'a str, opts: &SegmentOptions) -> Vec<WorkoutSpan<'a>> {
    let anchors = accept_anchors(find_anchors(text), opts.min_span_chars);

    if anchors.is_empty() {
        if !text.trim().is_empty() {
            warn!("no weekday anchors found; treating the document as one day");
        }
        return vec![WorkoutSpan {
            weekday: Weekday::default(),
            start: 0,
            end: text.len(),
            text,
        }];
    }

    let mut spans = Vec::with_capacity(anchors.len());
    for (i, anchor) in anchors.iter().enumerate() {
        let end = anchors.get(i + 1).map(|a| a.offset).unwrap_or(text.len());
        debug!(weekday = %anchor.weekday, start = anchor.offset, end, "day span");
        spans.push(WorkoutSpan {
            weekday: anchor.weekday,
            start: anchor.offset,
            end,
            text: &text[anchor.offset..end],
        });
    }
    spans
}

fn find_anchors(text: &str) -> Vec<DayAnchor> {
    WEEKDAY_RE
        .find_iter(text)
        .filter_map(|m| {
            Weekday::from_token(m.as_str()).map(|weekday| DayAnchor {
                weekday,
                offset: m.start(),
            })
        })
        .collect()
}

fn accept_anchors(anchors: Vec<DayAnchor>, min_span_chars: usize) -> Vec<DayAnchor> {
    if min_span_chars == 0 {
        return anchors;
    }
    let mut accepted: Vec<DayAnchor> = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        match accepted.last() {
            Some(prev) if anchor.offset - prev.offset < min_span_chars => {
                debug!(weekday = %anchor.weekday, offset = anchor.offset, "incidental weekday mention");
            }
            _ => accepted.push(anchor),
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays(text: &str) -> Vec<Weekday> {
        segment_days(text, &SegmentOptions::default())
            .iter()
            .map(|s| s.weekday)
            .collect()
    }

    #[test]
    fn empty_document_is_one_default_span() {
        let spans = segment_days("", &SegmentOptions::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].weekday, Weekday::Segunda);
        assert_eq!(spans[0].text, "");
    }

    #[test]
    fn no_anchor_keeps_whole_text() {
        let spans = segment_days("Mobility\n- geral", &SegmentOptions::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Mobility\n- geral");
    }

    #[test]
    fn spans_are_contiguous_and_ordered() {
        let text = "cabeçalho\nSegunda 19/jan\nA\nTerça 20/jan\nB\nQuarta\nC";
        let spans = segment_days(text, &SegmentOptions::default());
        assert_eq!(spans.len(), 3);
        assert!(spans[0].text.starts_with("Segunda"));
        assert_eq!(spans[0].end, spans[1].start);
        assert_eq!(spans[1].end, spans[2].start);
        assert_eq!(spans[2].end, text.len());
        assert!(!spans.iter().any(|s| s.text.contains("cabeçalho")));
    }

    #[test]
    fn case_and_accents() {
        assert_eq!(
            weekdays("SEGUNDA\nterca-feira\nSÁBADO\nsabado\nDomingo"),
            [Weekday::Segunda, Weekday::Terca, Weekday::Sabado, Weekday::Sabado, Weekday::Domingo]
        );
    }

    #[test]
    fn repeated_token_starts_new_span() {
        assert_eq!(
            weekdays("Segunda\ntreino de segunda a sexta\n"),
            [Weekday::Segunda, Weekday::Segunda, Weekday::Sexta]
        );
    }

    #[test]
    fn token_inside_word_is_ignored() {
        assert_eq!(weekdays("Segunda\nquintal e bisegunda"), [Weekday::Segunda]);
    }

    #[test]
    fn min_span_guard_absorbs_close_mentions() {
        let text = "Segunda\ntreino de segunda a sexta\nMobility\n- geral\nTerça\nWOD";
        let opts = SegmentOptions { min_span_chars: 40 };
        let spans = segment_days(text, &opts);
        let days: Vec<Weekday> = spans.iter().map(|s| s.weekday).collect();
        assert_eq!(days, [Weekday::Segunda, Weekday::Terca]);
        assert!(spans[0].text.contains("segunda a sexta"));
    }
}

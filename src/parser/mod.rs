pub mod assemble;
pub mod content;
pub mod days;
pub mod duration;
pub mod fields;
pub mod normalize;
pub mod sections;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::model::ParsedWorkout;
use days::{SegmentOptions, WorkoutSpan};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub const DEFAULT_YEAR: i32 = 2026;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Year used when a date token carries none.
    pub default_year: i32,
    /// Date used when a day has no date token at all.
    pub today: NaiveDate,
    pub segment: SegmentOptions,
}

impl ParseOptions {
    pub fn new(today: NaiveDate) -> Self {
        ParseOptions {
            default_year: DEFAULT_YEAR,
            today,
            segment: SegmentOptions::default(),
        }
    }
}

/// Pipeline: normalize → day spans → (fields, sections, durations, content) → workouts.
///
/// Always returns at least one workout, in document order.
pub fn parse_workouts(raw: &str, opts: &ParseOptions) -> Vec<ParsedWorkout> {
    let text = normalize::normalize(raw);
    let spans = days::segment_days(&text, &opts.segment);

    let workouts = parse_spans(&spans, opts);
    info!(
        days = workouts.len(),
        needs_review = workouts.iter().filter(|w| w.needs_review()).count(),
        "parsed workout document"
    );
    workouts
}

#[cfg(feature = "rayon")]
fn parse_spans(spans: &[WorkoutSpan<'_>], opts: &ParseOptions) -> Vec<ParsedWorkout> {
    spans.par_iter().map(|span| parse_span(span, opts)).collect()
}

#[cfg(not(feature = "rayon"))]
fn parse_spans(spans: &[WorkoutSpan<'_>], opts: &ParseOptions) -> Vec<ParsedWorkout> {
    spans.iter().map(|span| parse_span(span, opts)).collect()
}

/// One day span to one workout. Independent of every other span.
pub fn parse_span(span: &WorkoutSpan<'_>, opts: &ParseOptions) -> ParsedWorkout {
    let date = fields::extract_date(span.text, opts.default_year).unwrap_or_else(|| {
        warn!(weekday = %span.weekday, fallback = %opts.today, "no date token; using today");
        opts.today
    });
    let focus = fields::extract_focus(span.text);
    let bodies = sections::split_sections(span.text);
    assemble::assemble(span.weekday, date, focus, &bodies)
}

// ── Tests ──

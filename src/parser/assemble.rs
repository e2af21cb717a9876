use chrono::NaiveDate;

use super::content::content_lines;
use super::duration::resolve_minutes;
use super::sections::{content_part, SectionBody};
use crate::model::{ParsedWorkout, SlotOrigin, Weekday, WorkoutSection};

/// Compose one workout from the per-span extractions. Pure composition; every
/// fallback has already been decided upstream except per-slot defaults.
pub fn assemble(
    weekday: Weekday,
    date: NaiveDate,
    focus_technique: String,
    bodies: &[SectionBody<'_>; 5],
) -> ParsedWorkout {
    let sections = bodies.iter().map(build_section).collect();

    ParsedWorkout {
        date,
        day_of_week: weekday,
        focus_technique,
        sections,
    }
}

fn build_section(body: &SectionBody<'_>) -> WorkoutSection {
    let slot = body.slot;
    let Some(text) = body.body else {
        return WorkoutSection::defaulted(slot);
    };

    let mut content = content_lines(content_part(text));
    if content.is_empty() {
        content.push(slot.default_content().to_string());
    }

    WorkoutSection {
        id: slot.id().to_string(),
        title: slot.title().to_string(),
        duration_minutes: resolve_minutes(text, slot.default_minutes()),
        content,
        origin: SlotOrigin::Detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slot;
    use crate::parser::sections::split_sections;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()
    }

    #[test]
    fn all_defaults_when_nothing_found() {
        let w = assemble(Weekday::Segunda, date(), "TÉCNICA".into(), &split_sections(""));
        assert_eq!(w.sections.len(), 5);
        for (slot, s) in Slot::ALL.iter().zip(&w.sections) {
            assert_eq!(s.id, slot.id());
            assert_eq!(s.duration_minutes, slot.default_minutes());
            assert_eq!(s.content, [slot.default_content()]);
            assert_eq!(s.origin, SlotOrigin::Defaulted);
        }
    }

    #[test]
    fn detected_slot_with_empty_body_gets_default_content() {
        let w = assemble(Weekday::Terca, date(), "CLEAN".into(), &split_sections("Skill\nStrength 10'\n5x3"));
        let skill = w.section(Slot::Skill).unwrap();
        assert_eq!(skill.origin, SlotOrigin::Detected);
        assert_eq!(skill.content, ["Trabalho técnico do dia"]);
        assert_eq!(skill.duration_minutes, 15);

        let strength = w.section(Slot::Strength).unwrap();
        assert_eq!(strength.duration_minutes, 10);
        assert_eq!(strength.content, ["5x3"]);
    }

    #[test]
    fn duration_comes_from_body() {
        let w = assemble(Weekday::Quarta, date(), "JERK".into(), &split_sections("WOD 20' a 40'\nFran"));
        let wod = w.section(Slot::Wod).unwrap();
        assert_eq!(wod.duration_minutes, 20);
        assert_eq!(wod.content, ["Fran"]);
        assert_eq!(w.day_of_week, Weekday::Quarta);
        assert_eq!(w.focus_technique, "JERK");
    }

    #[test]
    fn time_mark_below_title_is_content() {
        let w = assemble(Weekday::Quinta, date(), "SNATCH".into(), &split_sections("WOD\n20'\n"));
        let wod = w.section(Slot::Wod).unwrap();
        assert_eq!(wod.content, ["20'"]);
        assert_eq!(wod.duration_minutes, 20);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidWorkout;

/// Canonical Portuguese weekday labels used as the `dayOfWeek` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weekday {
    #[default]
    #[serde(rename = "Segunda-feira")]
    Segunda,
    #[serde(rename = "Terça-feira")]
    Terca,
    #[serde(rename = "Quarta-feira")]
    Quarta,
    #[serde(rename = "Quinta-feira")]
    Quinta,
    #[serde(rename = "Sexta-feira")]
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
    #[serde(rename = "Domingo")]
    Domingo,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Segunda => "Segunda-feira",
            Weekday::Terca => "Terça-feira",
            Weekday::Quarta => "Quarta-feira",
            Weekday::Quinta => "Quinta-feira",
            Weekday::Sexta => "Sexta-feira",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    /// Lenient lookup: accepts the canonical label, the short token ("terça"),
    /// accent-less spellings and any letter case.
    pub fn from_token(token: &str) -> Option<Weekday> {
        let stem = |s: &str| {
            let folded = fold(s);
            let folded = folded.strip_suffix("-feira").unwrap_or(&folded);
            folded.strip_suffix(" feira").unwrap_or(folded).to_string()
        };
        let wanted = stem(token.trim());
        Weekday::ALL.into_iter().find(|day| stem(day.label()) == wanted)
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'á' | 'à' | 'â' | 'ã' => 'a',
            other => other,
        })
        .collect()
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::from_token(s).ok_or_else(|| format!("unknown weekday: {}", s))
    }
}

/// The five fixed section roles, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Mobility,
    WarmUp,
    Skill,
    Strength,
    Wod,
}

struct SlotDefaults {
    id: &'static str,
    title: &'static str,
    minutes: u32,
    content: &'static str,
}

const SLOT_DEFAULTS: [SlotDefaults; 5] = [
    SlotDefaults { id: "mobility", title: "Mobility", minutes: 3, content: "Mobilidade geral" },
    SlotDefaults { id: "warmup", title: "Warm-up", minutes: 12, content: "Aquecimento específico" },
    SlotDefaults { id: "skill", title: "Skill", minutes: 15, content: "Trabalho técnico do dia" },
    SlotDefaults { id: "strength", title: "Strength", minutes: 10, content: "Força do dia" },
    SlotDefaults { id: "wod", title: "WOD", minutes: 15, content: "Workout of the Day" },
];

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Mobility, Slot::WarmUp, Slot::Skill, Slot::Strength, Slot::Wod];

    pub fn index(self) -> usize {
        match self {
            Slot::Mobility => 0,
            Slot::WarmUp => 1,
            Slot::Skill => 2,
            Slot::Strength => 3,
            Slot::Wod => 4,
        }
    }

    fn defaults(self) -> &'static SlotDefaults {
        &SLOT_DEFAULTS[self.index()]
    }

    pub fn id(self) -> &'static str {
        self.defaults().id
    }

    pub fn title(self) -> &'static str {
        self.defaults().title
    }

    pub fn default_minutes(self) -> u32 {
        self.defaults().minutes
    }

    pub fn default_content(self) -> &'static str {
        self.defaults().content
    }

    pub fn from_id(id: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Where a section's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOrigin {
    /// The slot keyword was found in the day's text.
    Detected,
    /// Keyword missing; canonical title, duration and content were substituted.
    Defaulted,
    /// Entered through JSON by a reviewer.
    #[default]
    Reviewed,
}

impl SlotOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotOrigin::Detected => "detected",
            SlotOrigin::Defaulted => "defaulted",
            SlotOrigin::Reviewed => "reviewed",
        }
    }

    pub fn parse(s: &str) -> SlotOrigin {
        match s {
            "detected" => SlotOrigin::Detected,
            "defaulted" => SlotOrigin::Defaulted,
            _ => SlotOrigin::Reviewed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSection {
    pub id: String,
    pub title: String,
    pub duration_minutes: u32,
    pub content: Vec<String>,
    #[serde(default)]
    pub origin: SlotOrigin,
}

impl WorkoutSection {
    /// The placeholder section used when a slot was not found at all.
    pub fn defaulted(slot: Slot) -> Self {
        WorkoutSection {
            id: slot.id().to_string(),
            title: slot.title().to_string(),
            duration_minutes: slot.default_minutes(),
            content: vec![slot.default_content().to_string()],
            origin: SlotOrigin::Defaulted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorkout {
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub focus_technique: String,
    pub sections: Vec<WorkoutSection>,
}

impl ParsedWorkout {
    /// Check the record-level invariants. Assembled workouts always pass;
    /// this guards records that come back from a reviewer as JSON.
    pub fn validate(&self) -> Result<(), InvalidWorkout> {
        if self.sections.len() != Slot::ALL.len() {
            return Err(InvalidWorkout::SectionCount(self.sections.len()));
        }
        for (slot, section) in Slot::ALL.iter().zip(&self.sections) {
            if Slot::from_id(&section.id) != Some(*slot) {
                return Err(InvalidWorkout::SlotOrder {
                    position: slot.index(),
                    expected: slot.id(),
                    found: section.id.clone(),
                });
            }
            if section.duration_minutes < 1 {
                return Err(InvalidWorkout::Duration(section.id.clone()));
            }
            if section.content.is_empty() || section.content.iter().any(|l| l.trim().is_empty()) {
                return Err(InvalidWorkout::Content(section.id.clone()));
            }
        }
        if self.focus_technique.trim().is_empty() {
            return Err(InvalidWorkout::Focus);
        }
        Ok(())
    }

    pub fn section(&self, slot: Slot) -> Option<&WorkoutSection> {
        self.sections.get(slot.index())
    }

    /// Total planned minutes across all sections.
    pub fn total_minutes(&self) -> u32 {
        self.sections.iter().map(|s| s.duration_minutes).sum()
    }

    /// True when at least one slot fell back to its defaults.
    pub fn needs_review(&self) -> bool {
        self.sections.iter().any(|s| s.origin == SlotOrigin::Defaulted)
    }
}

/// A workout as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWorkout {
    pub id: i64,
    #[serde(flatten)]
    pub workout: ParsedWorkout,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedWorkout {
        ParsedWorkout {
            date: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
            day_of_week: Weekday::Segunda,
            focus_technique: "THRUSTER".to_string(),
            sections: Slot::ALL.iter().map(|s| WorkoutSection::defaulted(*s)).collect(),
        }
    }

    #[test]
    fn weekday_tokens() {
        assert_eq!(Weekday::from_token("terça"), Some(Weekday::Terca));
        assert_eq!(Weekday::from_token("TERCA"), Some(Weekday::Terca));
        assert_eq!(Weekday::from_token("Sábado"), Some(Weekday::Sabado));
        assert_eq!(Weekday::from_token("quinta-feira"), Some(Weekday::Quinta));
        assert_eq!(Weekday::from_token("monday"), None);
        for day in Weekday::ALL {
            assert_eq!(day.label().parse::<Weekday>(), Ok(day));
        }
    }

    #[test]
    fn weekday_serializes_as_label() {
        let json = serde_json::to_string(&Weekday::Terca).unwrap();
        assert_eq!(json, "\"Terça-feira\"");
        let back: Weekday = serde_json::from_str("\"Sábado\"").unwrap();
        assert_eq!(back, Weekday::Sabado);
    }

    #[test]
    fn wire_field_names() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["date"], "2026-01-19");
        assert_eq!(v["dayOfWeek"], "Segunda-feira");
        assert_eq!(v["focusTechnique"], "THRUSTER");
        assert_eq!(v["sections"][0]["durationMinutes"], 3);
        assert_eq!(v["sections"][4]["title"], "WOD");
        assert_eq!(v["sections"][1]["origin"], "defaulted");
    }

    #[test]
    fn origin_defaults_to_reviewed_on_input() {
        let json = r#"{"id":"skill","title":"Skill","durationMinutes":5,"content":["a"]}"#;
        let s: WorkoutSection = serde_json::from_str(json).unwrap();
        assert_eq!(s.origin, SlotOrigin::Reviewed);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_records() {
        let mut w = sample();
        w.sections.pop();
        assert!(matches!(w.validate(), Err(InvalidWorkout::SectionCount(4))));

        let mut w = sample();
        w.sections.swap(0, 1);
        assert!(matches!(w.validate(), Err(InvalidWorkout::SlotOrder { position: 0, .. })));

        let mut w = sample();
        w.sections[2].duration_minutes = 0;
        assert!(matches!(w.validate(), Err(InvalidWorkout::Duration(id)) if id == "skill"));

        let mut w = sample();
        w.sections[3].content.push("   ".to_string());
        assert!(matches!(w.validate(), Err(InvalidWorkout::Content(id)) if id == "strength"));
    }

    #[test]
    fn slot_table() {
        let ids: Vec<&str> = Slot::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["mobility", "warmup", "skill", "strength", "wod"]);
        assert_eq!(Slot::from_id("wod"), Some(Slot::Wod));
        assert_eq!(sample().total_minutes(), 3 + 12 + 15 + 10 + 15);
        assert!(sample().needs_review());
    }
}

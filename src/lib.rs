//! Weekly workout schedule import: raw schedule text in, one structured
//! five-section workout per day out.

pub mod db;
pub mod error;
pub mod model;
pub mod parser;
pub mod settings;
pub mod source;

pub use error::{ImportError, InvalidWorkout};
pub use model::{ParsedWorkout, Slot, SlotOrigin, StoredWorkout, Weekday, WorkoutSection};
pub use parser::{parse_workouts, ParseOptions};

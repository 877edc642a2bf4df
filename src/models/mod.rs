// Estructuras de datos principales

pub mod time;
mod course;
mod combination;
mod disallowed;

pub use time::{parse_time_of_day, weekday_name, TimeOfDay, TimeWindow, Weekday, WeekdaySet};
pub use course::{CandidateCourse, Course, CourseId, Section};
pub use combination::{Assignment, Combination, DisplayRecord, WitnessedCombination};
pub use disallowed::DisallowedMap;

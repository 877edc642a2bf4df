// Núcleo combinatorio: admisibilidad, conflictos, búsqueda, muestreo y presentación.
pub mod admissibility;
pub mod conflict;
pub mod presentation;
pub mod sampler;
pub mod search;
pub mod section_selector;
pub mod subsets;

pub use admissibility::{admissible_candidates, admissible_sections, is_admissible};
pub use conflict::{conflicts, ConflictMatrix};
pub use presentation::{index_courses, present_all, present_witness, CourseIndex};
pub use sampler::sample_without_replacement;
pub use search::{find_witnessed_combinations, Completeness, SearchLimits, SearchOutcome};

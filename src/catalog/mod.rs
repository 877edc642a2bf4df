//! Módulo `catalog`: frontera con la fuente de cursos.
//!
//! Submódulos:
//! - `rows`: filas del catálogo -> `Course` (saltando filas y secciones ilegibles)
//! - `names`: selección de cursos a partir de nombres de requisitos ("COMPSCI 61A")
//!
//! El catálogo en sí (almacenamiento, paginación) vive fuera del crate.

mod names;
mod rows;

pub use names::{select_by_requirement_names, split_requirement_name};
pub(crate) use rows::python_literal_to_json;
pub use rows::{course_from_row, courses_from_rows, parse_catalog_clock, parse_word_days, CatalogLoad};

use std::collections::HashSet;

use crate::models::Course;

/// Une requisitos y cursos de interés sin repetir ids; los requisitos van primero.
pub fn union_candidates<'a>(required: &[&'a Course], interesting: &[&'a Course]) -> Vec<&'a Course> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(required.len() + interesting.len());
    for &course in required.iter().chain(interesting.iter()) {
        if seen.insert(course.id.as_str()) {
            out.push(course);
        }
    }
    out
}

/// Filtro de admisibilidad: descarta secciones que chocan con las franjas
/// prohibidas por el usuario.
///
/// La regla es asimétrica a propósito: una sección es inadmisible sólo si su
/// inicio o su fin cae estrictamente dentro de una franja prohibida. Una
/// sección que envuelve por completo la franja (sin que ningún extremo caiga
/// dentro) no se marca. Se conserva tal cual hasta que producto decida otra
/// semántica.

use crate::models::{CandidateCourse, Course, DisallowedMap, Section};

/// True si la sección se puede usar bajo el mapa de franjas prohibidas.
/// Una sección sin días es admisible: ninguna restricción le aplica.
pub fn is_admissible(section: &Section, disallowed: &DisallowedMap) -> bool {
    for day in section.days.iter() {
        for slot in disallowed.windows(day) {
            if slot.strictly_contains(section.window.start()) || slot.strictly_contains(section.window.end()) {
                return false;
            }
        }
    }
    true
}

/// Secciones admisibles del curso, en su orden original.
pub fn admissible_sections(course: &Course, disallowed: &DisallowedMap) -> Vec<Section> {
    course.sections.iter().filter(|s| is_admissible(s, disallowed)).cloned().collect()
}

/// Convierte cursos en candidatos, dejando fuera los que no conservan ninguna
/// sección admisible. Mantiene el orden de entrada.
pub fn admissible_candidates<'a, I>(courses: I, disallowed: &DisallowedMap) -> Vec<CandidateCourse>
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut out = Vec::new();
    for course in courses {
        let sections = admissible_sections(course, disallowed);
        if sections.is_empty() {
            log::debug!("[admissibility] {} sin secciones admisibles ({} totales)", course.id, course.sections.len());
            continue;
        }
        out.push(CandidateCourse::new(course.id.clone(), sections));
    }
    out
}

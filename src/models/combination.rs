use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::course::{CourseId, Section};

/// Conjunto de k cursos distintos. La identidad no depende del orden ni de
/// las secciones elegidas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Combination(BTreeSet<CourseId>);

impl Combination {
    pub fn course_ids(&self) -> impl Iterator<Item = &CourseId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }
}

impl<S: Into<CourseId>> FromIterator<S> for Combination {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Combination(iter.into_iter().map(Into::into).collect())
    }
}

/// Sección elegida para un curso dentro del testigo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub course_id: CourseId,
    pub section: Section,
}

/// Combinación + asignación sin conflictos que la prueba factible.
///
/// La asignación es la que se muestra al usuario; nunca se recalcula después.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WitnessedCombination {
    assignments: Vec<Assignment>,
}

impl WitnessedCombination {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        WitnessedCombination { assignments }
    }

    /// En el orden de enumeración de los cursos.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn combination(&self) -> Combination {
        self.assignments.iter().map(|a| a.course_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn section_for(&self, course_id: &str) -> Option<&Section> {
        self.assignments.iter().find(|a| a.course_id == course_id).map(|a| &a.section)
    }
}

/// Fila lista para desplegar: curso + sección del testigo.
///
/// Los nombres de campo siguen el contrato del colaborador de curaduría
/// (`startTime`, `endTime`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub department: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub units: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub location: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub instructor: String,
}

impl DisplayRecord {
    /// Identidad de la reunión: mismo curso a la misma hora los mismos días.
    pub fn meeting_key(&self) -> (&str, &str, &str, &str) {
        (self.name.trim(), self.days.trim(), self.start_time.trim(), self.end_time.trim())
    }
}

/// Los asesores externos a veces devuelven `"units": 4` en vez de `"4"`, o
/// `null` en campos opcionales como `instructor`.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

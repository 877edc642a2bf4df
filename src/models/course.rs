use serde::{Deserialize, Serialize};

use super::time::{TimeWindow, WeekdaySet};

pub type CourseId = String;

/// Una reunión semanal de un curso: días + franja + datos de despliegue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub days: WeekdaySet,
    pub window: TimeWindow,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
}

impl Section {
    pub fn new(days: WeekdaySet, window: TimeWindow) -> Self {
        Section { days, window, location: String::new(), instructor: String::new() }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }
}

/// Curso del catálogo. `sections` conserva el orden de inserción.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub course_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Course {
    pub fn new(id: impl Into<CourseId>) -> Self {
        Course { id: id.into(), ..Default::default() }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// "COMPSCI 61A"; si falta la abreviatura se usa el id.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.abbreviation.trim(), self.course_number.trim());
        let name = name.trim();
        if name.is_empty() { self.id.clone() } else { name.to_string() }
    }
}

/// Curso con sus secciones admisibles ya filtradas; entrada del buscador.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCourse {
    pub id: CourseId,
    pub sections: Vec<Section>,
}

impl CandidateCourse {
    pub fn new(id: impl Into<CourseId>, sections: Vec<Section>) -> Self {
        CandidateCourse { id: id.into(), sections }
    }
}

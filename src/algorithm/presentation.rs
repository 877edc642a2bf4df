// Adaptador de presentación: aplana un testigo en filas para el asesor externo.
//
// Siempre usa la sección del testigo; buscar "la primera sección del curso"
// rompería la garantía de horario sin conflictos.
use std::collections::HashMap;

use crate::models::{Course, DisplayRecord, WitnessedCombination};

pub type CourseIndex<'a> = HashMap<&'a str, &'a Course>;

pub fn index_courses(courses: &[Course]) -> CourseIndex<'_> {
    courses.iter().map(|c| (c.id.as_str(), c)).collect()
}

/// Una fila por curso, en el orden de la asignación.
pub fn present_witness(witness: &WitnessedCombination, courses: &CourseIndex<'_>) -> Vec<DisplayRecord> {
    witness
        .assignments()
        .iter()
        .map(|a| {
            let section = &a.section;
            let mut rec = DisplayRecord {
                name: a.course_id.clone(),
                title: String::new(),
                department: String::new(),
                units: String::new(),
                description: String::new(),
                days: section.days.render(),
                start_time: section.window.start().to_string(),
                end_time: section.window.end().to_string(),
                location: section.location.clone(),
                instructor: section.instructor.clone(),
            };
            if let Some(course) = courses.get(a.course_id.as_str()) {
                rec.name = course.display_name();
                rec.title = course.title.clone();
                rec.department = course.abbreviation.clone();
                rec.units = course.units.clone();
                rec.description = course.description.clone();
            } else {
                log::warn!("[presentation] curso {} no está en el índice; fila sin datos de curso", a.course_id);
            }
            rec
        })
        .collect()
}

pub fn present_all(witnesses: &[WitnessedCombination], courses: &CourseIndex<'_>) -> Vec<Vec<DisplayRecord>> {
    witnesses.iter().map(|w| present_witness(w, courses)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Section, TimeWindow, Weekday, WeekdaySet};

    #[test]
    fn test_uses_witness_section_not_first_section() {
        let first = Section::new([Weekday::Mon].into_iter().collect::<WeekdaySet>(), TimeWindow::parse("09:00", "10:00").unwrap());
        let second = Section::new(
            [Weekday::Tue, Weekday::Thu].into_iter().collect::<WeekdaySet>(),
            TimeWindow::parse("13:00", "14:30").unwrap(),
        )
        .with_location("155 Dwinelle")
        .with_instructor("Jane Doe");
        let mut course = Course::new("42").with_section(first).with_section(second.clone());
        course.abbreviation = "HISTORY".into();
        course.course_number = "7B".into();
        course.title = "The United States".into();
        course.units = "4".into();

        let courses = vec![course];
        let idx = index_courses(&courses);
        let w = WitnessedCombination::new(vec![Assignment { course_id: "42".into(), section: second }]);
        let rows = present_witness(&w, &idx);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "HISTORY 7B");
        assert_eq!(rows[0].department, "HISTORY");
        assert_eq!(rows[0].days, "Tuesday Thursday");
        assert_eq!(rows[0].start_time, "13:00");
        assert_eq!(rows[0].end_time, "14:30");
        assert_eq!(rows[0].location, "155 Dwinelle");
        assert_eq!(rows[0].instructor, "Jane Doe");
    }
}

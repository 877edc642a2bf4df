use chrono::NaiveTime;
use serde_json::Value;

use crate::error::{EngineError, EngineResult, Warning};
use crate::models::{parse_time_of_day, Course, Section, TimeOfDay, TimeWindow, Weekday, WeekdaySet};

/// Resultado de cargar filas del catálogo: cursos válidos + avisos de lo descartado.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub courses: Vec<Course>,
    pub warnings: Vec<Warning>,
}

/// Abreviaturas de días tal como vienen en `wordDays` ("MWF", "TuTh").
const WORD_DAYS: [(&str, Weekday); 7] = [
    ("M", Weekday::Mon),
    ("Tu", Weekday::Tue),
    ("W", Weekday::Wed),
    ("Th", Weekday::Thu),
    ("F", Weekday::Fri),
    ("Sa", Weekday::Sat),
    ("Su", Weekday::Sun),
];

/// "MWF" -> {Lun, Mié, Vie}. Basta con que la abreviatura aparezca en el texto.
pub fn parse_word_days(word_days: &str) -> WeekdaySet {
    WORD_DAYS.iter().filter(|(abbr, _)| word_days.contains(abbr)).map(|(_, d)| *d).collect()
}

/// Extrae la hora de un timestamp del catálogo.
///
/// Acepta `HH:MM`, `HH:MM:SS` y timestamps ISO (`1970-01-01T09:00:00`); en
/// todos los casos se ignoran los segundos.
pub fn parse_catalog_clock(raw: &str) -> EngineResult<TimeOfDay> {
    let raw = raw.trim();
    let clock = raw.split_once('T').map(|(_, t)| t).unwrap_or(raw);
    if let Ok(t) = parse_time_of_day(clock) {
        return Ok(t);
    }
    NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .map(TimeOfDay::from_naive)
        .map_err(|_| EngineError::InvalidTimeFormat { input: raw.to_string() })
}

fn text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Convierte un literal estilo Python (`{'edges': [...], 'x': None}`) a JSON.
pub(crate) fn python_literal_to_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        match word.as_str() {
            "None" => out.push_str("null"),
            "True" => out.push_str("true"),
            "False" => out.push_str("false"),
            w => out.push_str(w),
        }
        word.clear();
    };

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                flush(&mut word, &mut out);
                let quote = c;
                out.push('"');
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => {
                            if let Some(esc) = chars.next() {
                                if esc == '\'' {
                                    out.push('\'');
                                } else {
                                    out.push('\\');
                                    out.push(esc);
                                }
                            }
                        }
                        '"' if quote == '\'' => out.push_str("\\\""),
                        q if q == quote => break,
                        other => out.push(other),
                    }
                }
                out.push('"');
            }
            c if c.is_alphanumeric() || c == '_' => word.push(c),
            other => {
                flush(&mut word, &mut out);
                out.push(other);
            }
        }
    }
    flush(&mut word, &mut out);
    out
}

/// `sectionSet` puede venir como objeto, como JSON en texto o como literal Python.
fn parse_section_set(v: &Value) -> Result<Value, String> {
    match v {
        Value::Object(_) => Ok(v.clone()),
        Value::Null => Ok(Value::Null),
        Value::String(s) => serde_json::from_str::<Value>(s)
            .or_else(|_| serde_json::from_str::<Value>(&python_literal_to_json(s)))
            .map_err(|e| format!("unparsable sectionSet: {}", e)),
        other => Err(format!("unexpected sectionSet value {}", other)),
    }
}

fn section_from_node(node: &Value) -> EngineResult<Section> {
    let days = node.get("wordDays").and_then(Value::as_str).map(parse_word_days).unwrap_or_default();
    let start = node.get("startTime").and_then(Value::as_str).unwrap_or("");
    let end = node.get("endTime").and_then(Value::as_str).unwrap_or("");
    let window = TimeWindow::new(parse_catalog_clock(start)?, parse_catalog_clock(end)?)?;
    Ok(Section::new(days, window)
        .with_location(text(node.get("locationName").or_else(|| node.get("location"))))
        .with_instructor(text(node.get("instructor"))))
}

/// Convierte una fila del catálogo en `Course`. Las secciones ilegibles se
/// descartan con aviso; sólo una fila sin `id` o con `sectionSet` corrupto
/// invalida la fila entera.
pub fn course_from_row(row: &Value) -> Result<(Course, Vec<Warning>), String> {
    let id = text(row.get("id"));
    if id.is_empty() {
        return Err("missing id".to_string());
    }

    let mut course = Course::new(id);
    course.abbreviation = text(row.get("abbreviation"));
    course.course_number = text(row.get("courseNumber"));
    course.title = text(row.get("title"));
    course.department = text(row.get("department"));
    course.units = text(row.get("units"));
    course.description = text(row.get("description"));

    let mut warnings = Vec::new();
    let section_set = parse_section_set(row.get("sectionSet").unwrap_or(&Value::Null))?;
    let edges = section_set.get("edges").and_then(Value::as_array).cloned().unwrap_or_default();
    for edge in edges.iter() {
        let Some(node) = edge.get("node").filter(|n| n.is_object()) else { continue };
        match section_from_node(node) {
            Ok(s) => course.sections.push(s),
            Err(e) => {
                log::warn!("[catalog] sección de {} descartada: {}", course.id, e);
                warnings.push(Warning::SkippedSection { course_id: course.id.clone(), reason: e.to_string() });
            }
        }
    }
    Ok((course, warnings))
}

/// Carga todas las filas, saltando las ilegibles sin abortar el lote.
pub fn courses_from_rows(rows: &[Value]) -> CatalogLoad {
    let mut load = CatalogLoad::default();
    for (idx, row) in rows.iter().enumerate() {
        match course_from_row(row) {
            Ok((course, warnings)) => {
                load.courses.push(course);
                load.warnings.extend(warnings);
            }
            Err(reason) => {
                log::warn!("[catalog] fila {} descartada: {}", idx, reason);
                load.warnings.push(Warning::SkippedCatalogRow { row: idx, reason });
            }
        }
    }
    log::info!("[catalog] {} cursos cargados de {} filas", load.courses.len(), rows.len());
    load
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_word_days() {
        assert_eq!(parse_word_days("MWF").render(), "Monday Wednesday Friday");
        assert_eq!(parse_word_days("TuTh").render(), "Tuesday Thursday");
        assert!(parse_word_days("TBA").is_empty());
    }

    #[test]
    fn test_parse_catalog_clock() {
        assert_eq!(parse_catalog_clock("1970-01-01T09:30:00").unwrap().to_string(), "09:30");
        assert_eq!(parse_catalog_clock("14:00").unwrap().to_string(), "14:00");
        assert_eq!(parse_catalog_clock("14:00:59").unwrap().to_string(), "14:00");
        assert!(parse_catalog_clock("").is_err());
        assert!(parse_catalog_clock("noon").is_err());
    }

    #[test]
    fn test_python_literal_section_set() {
        let row = json!({
            "id": 7,
            "abbreviation": "COMPSCI",
            "courseNumber": "61A",
            "units": 4,
            "sectionSet": "{'edges': [{'node': {'wordDays': 'MWF', 'startTime': '1970-01-01T10:00:00', 'endTime': '1970-01-01T11:00:00', 'locationName': \"Wheeler 150\", 'instructor': None}}]}"
        });
        let (course, warnings) = course_from_row(&row).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(course.id, "7");
        assert_eq!(course.units, "4");
        assert_eq!(course.display_name(), "COMPSCI 61A");
        assert_eq!(course.sections.len(), 1);
        assert_eq!(course.sections[0].location, "Wheeler 150");
        assert_eq!(course.sections[0].instructor, "");
        assert_eq!(course.sections[0].window.to_string(), "10:00-11:00");
    }

    #[test]
    fn test_bad_rows_and_sections_are_skipped() {
        let rows = vec![
            json!({"title": "no id"}),
            json!({"id": "1", "sectionSet": "{not parsable"}),
            json!({"id": "2", "sectionSet": {"edges": [
                {"node": {"wordDays": "TuTh", "startTime": "09:00", "endTime": "10:00"}},
                {"node": {"wordDays": "TuTh", "startTime": null, "endTime": "10:00"}},
                {"node": {"wordDays": "M", "startTime": "11:00", "endTime": "10:00"}}
            ]}}),
            json!({"id": "3"}),
        ];
        let load = courses_from_rows(&rows);
        let ids: Vec<&str> = load.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(load.courses[0].sections.len(), 1);
        assert!(load.courses[1].sections.is_empty());
        let skipped_rows = load.warnings.iter().filter(|w| matches!(w, Warning::SkippedCatalogRow { .. })).count();
        let skipped_sections = load.warnings.iter().filter(|w| matches!(w, Warning::SkippedSection { .. })).count();
        assert_eq!((skipped_rows, skipped_sections), (2, 2));
    }
}

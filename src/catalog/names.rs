use std::collections::HashSet;

use crate::models::Course;

/// Separa "COMPSCI 61A" en ("COMPSCI", "61A").
///
/// El departamento son las palabras antes del primer token que empieza con
/// dígito; el número es ese token (dígitos + letras opcionales). Nombres que
/// no encajan devuelven `None`.
pub fn split_requirement_name(name: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let pos = tokens.iter().position(|t| t.starts_with(|c: char| c.is_ascii_digit()))?;
    if pos == 0 {
        return None;
    }
    let dept_tokens = &tokens[..pos];
    if !dept_tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_alphabetic())) {
        return None;
    }
    let number = tokens[pos];
    let digits_end = number.find(|c: char| !c.is_ascii_digit()).unwrap_or(number.len());
    if !number[digits_end..].chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((dept_tokens.join(" ").to_uppercase(), number.to_uppercase()))
}

/// Cursos del catálogo que corresponden a los nombres de requisitos pendientes.
/// Conserva el orden de los nombres y elimina duplicados.
pub fn select_by_requirement_names<'a>(courses: &'a [Course], names: &[String]) -> Vec<&'a Course> {
    let mut out: Vec<&Course> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for name in names {
        let Some((dept, number)) = split_requirement_name(name) else {
            log::debug!("[catalog] nombre de requisito con formato inesperado: '{}'", name);
            continue;
        };
        for c in courses.iter() {
            if c.abbreviation.trim().to_uppercase() == dept
                && c.course_number.trim().to_uppercase() == number
                && seen.insert(c.id.as_str())
            {
                out.push(c);
            }
        }
    }
    out
}

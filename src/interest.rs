//! Afinidad por intereses.
//!
//! El ranking semántico real (embeddings) es un colaborador externo; este
//! módulo define la costura (`InterestMatcher`) y una implementación local por
//! palabras clave basada en similitud Jaro-Winkler, útil sin servicio externo.

use std::collections::HashMap;

use crate::error::Warning;
use crate::models::{Course, CourseId};

pub trait InterestMatcher: Send + Sync {
    /// Ids de cursos ordenados por relevancia descendente, a lo sumo `top_k`.
    fn rank(&self, query: &str, courses: &[Course], top_k: usize) -> Vec<CourseId>;
}

/// Separa la consulta en palabras clave. Acepta la lista JSON que devuelve el
/// parser externo (`["robotics", "AI"]`) o texto separado por comas.
pub fn split_keywords(query: &str) -> Vec<String> {
    let trimmed = query.trim();
    let raw: Vec<String> = match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(list) => list,
        Err(_) => trimmed.split([',', ';']).map(|s| s.to_string()).collect(),
    };
    raw.into_iter()
        .map(|k| k.trim().trim_matches(|c| c == '[' || c == ']' || c == '"' || c == '\'').trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .map(|w| w.to_lowercase())
        .collect()
}

#[derive(Debug, Clone)]
pub struct KeywordInterestMatcher {
    /// Puntaje mínimo (0..1) para considerar que un curso coincide.
    pub threshold: f64,
}

impl Default for KeywordInterestMatcher {
    fn default() -> Self {
        KeywordInterestMatcher { threshold: 0.9 }
    }
}

impl KeywordInterestMatcher {
    /// Mejor coincidencia de cualquier palabra clave contra el texto del curso.
    /// Para claves de varias palabras se promedia la mejor coincidencia de cada una.
    pub fn score(&self, keywords: &[String], course: &Course) -> f64 {
        let course_words = words(&format!("{} {}", course.title, course.description));
        if course_words.is_empty() {
            return 0.0;
        }
        keywords
            .iter()
            .map(|k| {
                let parts = words(k);
                if parts.is_empty() {
                    return 0.0;
                }
                let total: f64 = parts
                    .iter()
                    .map(|p| course_words.iter().map(|w| strsim::jaro_winkler(p, w)).fold(0.0, f64::max))
                    .sum();
                total / parts.len() as f64
            })
            .fold(0.0, f64::max)
    }
}

impl InterestMatcher for KeywordInterestMatcher {
    fn rank(&self, query: &str, courses: &[Course], top_k: usize) -> Vec<CourseId> {
        let keywords = split_keywords(query);
        if keywords.is_empty() || top_k == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(f64, &Course)> = courses
            .iter()
            .map(|c| (self.score(&keywords, c), c))
            .filter(|(s, _)| *s >= self.threshold)
            .collect();
        // orden estable: empates respetan el orden del catálogo
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(top_k).map(|(_, c)| c.id.clone()).collect()
    }
}

/// Valida que los ids devueltos por el colaborador existan en el catálogo.
/// No se juzga la calidad del ranking, sólo la pertenencia.
pub fn resolve_interest_ids<'a>(ids: &[CourseId], courses: &'a [Course]) -> (Vec<&'a Course>, Vec<Warning>) {
    let by_id: HashMap<&str, &Course> = courses.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut found = Vec::new();
    let mut warnings = Vec::new();
    for id in ids {
        match by_id.get(id.as_str()) {
            Some(c) => found.push(*c),
            None => {
                log::warn!("[interest] id {} no existe en el catálogo", id);
                warnings.push(Warning::UnknownInterestId { course_id: id.clone() });
            }
        }
    }
    (found, warnings)
}

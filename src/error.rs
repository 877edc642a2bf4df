//! Errores y avisos del motor.
//!
//! `EngineError` cubre sólo las condiciones a nivel de petición (k inválido,
//! catálogo vacío, JSON ilegible). Todo lo que ocurre por fila o por sección
//! se recupera localmente y queda registrado como `Warning` en la respuesta.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid time format '{input}' (expected HH:MM)")]
    InvalidTimeFormat { input: String },

    #[error("invalid time window {start}-{end}: start must be before end")]
    InvalidTimeWindow { start: String, end: String },

    #[error("class count must be at least 1 (got {0})")]
    InvalidClassCount(usize),

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("malformed advisory response: {0}")]
    MalformedAdvisoryResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("advisor failed: {0}")]
    Advisor(String),

    #[error("planner task failed: {0}")]
    Join(String),
}

/// Motivo por el que la búsqueda se detuvo antes de agotar el espacio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStop {
    MaxResults,
    Deadline,
    SectionAttempts,
}

/// Condiciones blandas: nunca hacen fallar la petición.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    SkippedCatalogRow { row: usize, reason: String },
    SkippedSection { course_id: String, reason: String },
    SkippedDisallowedWindow { day: String, reason: String },
    EmptyCandidatePool { available: usize, wanted: usize },
    SearchBudgetExceeded { stop: BudgetStop },
    MalformedAdvisoryResponse { reason: String },
    UnknownInterestId { course_id: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::SkippedCatalogRow { row, reason } => write!(f, "catalog row {} skipped: {}", row, reason),
            Warning::SkippedSection { course_id, reason } => write!(f, "section of {} skipped: {}", course_id, reason),
            Warning::SkippedDisallowedWindow { day, reason } => write!(f, "disallowed window on {} skipped: {}", day, reason),
            Warning::EmptyCandidatePool { available, wanted } => {
                write!(f, "only {} admissible courses for {} classes", available, wanted)
            }
            Warning::SearchBudgetExceeded { stop } => write!(f, "search stopped early ({:?}); results are partial", stop),
            Warning::MalformedAdvisoryResponse { reason } => write!(f, "advisory response unusable: {}", reason),
            Warning::UnknownInterestId { course_id } => write!(f, "interest match {} is not in the catalog", course_id),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

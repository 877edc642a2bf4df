use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, Warning};
use crate::models::DisplayRecord;

/// Petición de planificación.
///
/// # JSON esperado
/// ```json
/// {
///   "not_completed": ["COMPSCI 61A", "MATH 54"],
///   "interests": "[\"robotics\", \"computer vision\"]",
///   "disallowed": { "Monday": [["00:00", "09:00"]] },
///   "num_courses": 3,
///   "max_results": 500,
///   "search_budget_ms": 2000
/// }
/// ```
///
/// - `not_completed`: requisitos pendientes, como nombres "DEPTO NÚMERO"
/// - `interests`: palabras clave (lista JSON o texto separado por comas)
/// - `disallowed`: franjas prohibidas por día, salida del parser de restricciones
/// - `num_courses`, `max_results`, `search_budget_ms`: opcionales, ganan sobre la configuración
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRequest {
    pub not_completed: Vec<String>,
    pub interests: String,
    pub disallowed: serde_json::Value,
    pub num_courses: Option<usize>,
    pub max_results: Option<usize>,
    pub search_budget_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub combinations: Vec<Vec<DisplayRecord>>,
    /// `false` si algún límite cortó la búsqueda antes de agotar el espacio.
    pub complete: bool,
    /// Combinaciones encontradas antes del muestreo.
    pub total_found: usize,
    pub warnings: Vec<Warning>,
}

pub fn parse_plan_request(json: &str) -> EngineResult<PlanRequest> {
    serde_json::from_str(json).map_err(|e| EngineError::InvalidRequest(e.to_string()))
}

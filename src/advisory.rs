//! Curaduría externa de horarios.
//!
//! El asesor (un LLM u otro servicio) recibe los horarios muestreados y
//! devuelve texto con una lista JSON de horarios. Sólo se aceptan horarios que
//! coinciden con alguno de los enviados; si no queda ninguno válido se usa la
//! muestra truncada.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::python_literal_to_json;
use crate::error::{EngineError, EngineResult, Warning};
use crate::models::DisplayRecord;

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryRequest {
    pub interests: String,
    pub schedules: Vec<Vec<DisplayRecord>>,
    pub wanted: usize,
}

pub trait ScheduleAdvisor: Send + Sync {
    /// Respuesta cruda del asesor; se interpreta con `parse_advisory_response`.
    fn curate(&self, request: &AdvisoryRequest) -> EngineResult<String>;
}

/// Extrae la lista JSON más externa (`[` ... `]`) del texto del asesor.
///
/// Si no es JSON válido se reintenta como literal estilo Python
/// (comillas simples, `None`), igual que `sectionSet` en el catálogo.
pub fn parse_advisory_response(raw: &str) -> EngineResult<Vec<Vec<DisplayRecord>>> {
    let start = raw.find('[');
    let end = raw.rfind(']');
    let body = match (start, end) {
        (Some(s), Some(e)) if s < e => &raw[s..=e],
        _ => return Err(EngineError::MalformedAdvisoryResponse("no JSON list found".to_string())),
    };
    serde_json::from_str::<Vec<Vec<DisplayRecord>>>(body)
        .or_else(|_| serde_json::from_str::<Vec<Vec<DisplayRecord>>>(&python_literal_to_json(body)))
        .map_err(|e| EngineError::MalformedAdvisoryResponse(e.to_string()))
}

type ScheduleKey = Vec<(String, String, String, String)>;

fn schedule_key(schedule: &[DisplayRecord]) -> ScheduleKey {
    let mut key: ScheduleKey = schedule
        .iter()
        .map(|r| {
            let (n, d, s, e) = r.meeting_key();
            (n.to_string(), d.to_string(), s.to_string(), e.to_string())
        })
        .collect();
    key.sort();
    key
}

/// Deja sólo los horarios curados que son exactamente uno de los muestreados
/// (mismas reuniones, sin importar el orden de las filas). Devuelve la
/// versión muestreada, no la del asesor.
pub fn retain_known_schedules(
    curated: Vec<Vec<DisplayRecord>>,
    sampled: &[Vec<DisplayRecord>],
) -> Vec<Vec<DisplayRecord>> {
    let mut used: HashSet<usize> = HashSet::new();
    let sampled_keys: Vec<ScheduleKey> = sampled.iter().map(|s| schedule_key(s)).collect();
    let mut out = Vec::new();
    for schedule in curated {
        let key = schedule_key(&schedule);
        match sampled_keys.iter().position(|k| *k == key) {
            Some(idx) if used.insert(idx) => out.push(sampled[idx].clone()),
            Some(_) => {}
            None => log::debug!("[advisory] horario curado descartado: no coincide con la muestra"),
        }
    }
    out
}

/// Consulta al asesor si existe; cualquier falla cae a los primeros `wanted`
/// horarios muestreados con un aviso.
pub fn curate_or_fallback(
    advisor: Option<&dyn ScheduleAdvisor>,
    interests: &str,
    sampled: Vec<Vec<DisplayRecord>>,
    wanted: usize,
    warnings: &mut Vec<Warning>,
) -> Vec<Vec<DisplayRecord>> {
    let Some(advisor) = advisor else {
        return sampled.into_iter().take(wanted).collect();
    };
    if sampled.is_empty() {
        return sampled;
    }

    let request = AdvisoryRequest { interests: interests.to_string(), schedules: sampled, wanted };
    let reason = match advisor.curate(&request).and_then(|raw| parse_advisory_response(&raw)) {
        Ok(curated) => {
            let kept = retain_known_schedules(curated, &request.schedules);
            if !kept.is_empty() {
                log::info!("[advisory] {} horarios curados aceptados", kept.len().min(wanted));
                return kept.into_iter().take(wanted).collect();
            }
            "no curated schedule matches the sampled ones".to_string()
        }
        Err(e) => e.to_string(),
    };

    log::warn!("[advisory] respuesta inutilizable ({}); se usa la muestra", reason);
    warnings.push(Warning::MalformedAdvisoryResponse { reason });
    request.schedules.into_iter().take(wanted).collect()
}

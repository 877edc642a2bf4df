// planner.rs - Orquestador de una petición de planificación completa.
//
// Pipeline:
// PHASE 1: validar k y catálogo (únicos errores a nivel de petición)
// PHASE 2: requisitos pendientes -> cursos del catálogo
// PHASE 3: ranking por intereses (colaborador opcional)
// PHASE 4: unión requisitos + intereses, sin repetir ids
// PHASE 5: admisibilidad contra las franjas prohibidas
// PHASE 6: búsqueda de combinaciones con testigo (con límites)
// PHASE 7: muestreo hasta `sample_cap`
// PHASE 8: presentación usando la sección del testigo
// PHASE 9: curaduría externa o truncado determinista
//
// Todo es local a la petición; el catálogo se recibe por referencia y no se
// modifica.

use std::time::Instant;

use rand::Rng;

use crate::advisory::{curate_or_fallback, ScheduleAdvisor};
use crate::algorithm::{
    admissible_candidates, find_witnessed_combinations, index_courses, present_all, sample_without_replacement,
    Completeness,
};
use crate::catalog::{select_by_requirement_names, union_candidates};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, Warning};
use crate::interest::{resolve_interest_ids, InterestMatcher};
use crate::models::{Course, DisallowedMap};
use crate::request::{PlanRequest, PlanResponse};

/// Colaboradores externos opcionales de una petición.
#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
    pub interest: Option<&'a dyn InterestMatcher>,
    pub advisor: Option<&'a dyn ScheduleAdvisor>,
}

pub fn plan_schedules<R: Rng + ?Sized>(
    catalog: &[Course],
    request: &PlanRequest,
    collaborators: Collaborators<'_>,
    config: &EngineConfig,
    rng: &mut R,
) -> EngineResult<PlanResponse> {
    let started = Instant::now();
    let mut warnings: Vec<Warning> = Vec::new();

    // =========================================================================
    // PHASE 1: validación
    // =========================================================================
    let k = request.num_courses.unwrap_or(config.num_courses);
    if k == 0 {
        return Err(EngineError::InvalidClassCount(k));
    }
    if catalog.is_empty() {
        return Err(EngineError::EmptyCatalog);
    }
    log::info!("[planner] PHASE 1: k={}, catálogo={} cursos", k, catalog.len());

    // =========================================================================
    // PHASE 2: requisitos pendientes
    // =========================================================================
    let required = select_by_requirement_names(catalog, &request.not_completed);
    log::info!(
        "[planner] PHASE 2: {} cursos requeridos de {} nombres",
        required.len(),
        request.not_completed.len()
    );

    // =========================================================================
    // PHASE 3: intereses
    // =========================================================================
    let interesting = match collaborators.interest {
        Some(matcher) if !request.interests.trim().is_empty() => {
            let ids = matcher.rank(&request.interests, catalog, config.interest_top_k);
            let (found, unknown) = resolve_interest_ids(&ids, catalog);
            warnings.extend(unknown);
            found
        }
        _ => Vec::new(),
    };
    log::info!("[planner] PHASE 3: {} cursos por intereses", interesting.len());

    // =========================================================================
    // PHASE 4: unión
    // =========================================================================
    let union = union_candidates(&required, &interesting);
    log::info!("[planner] PHASE 4: {} cursos candidatos", union.len());

    // =========================================================================
    // PHASE 5: admisibilidad
    // =========================================================================
    let (disallowed, window_warnings) = DisallowedMap::from_value(&request.disallowed);
    warnings.extend(window_warnings);
    let pool = admissible_candidates(union, &disallowed);
    log::info!(
        "[planner] PHASE 5: {} cursos admisibles ({} franjas prohibidas)",
        pool.len(),
        disallowed.len()
    );
    if pool.len() < k {
        log::warn!("[planner] sólo {} cursos admisibles para {} clases", pool.len(), k);
        warnings.push(Warning::EmptyCandidatePool { available: pool.len(), wanted: k });
    }

    // =========================================================================
    // PHASE 6: búsqueda
    // =========================================================================
    let limits = config.search_limits(request.max_results, request.search_budget_ms, started);
    let outcome = find_witnessed_combinations(&pool, k, &limits)?;
    let complete = outcome.is_complete();
    if let Completeness::Partial(stop) = outcome.completeness {
        warnings.push(Warning::SearchBudgetExceeded { stop });
    }
    let total_found = outcome.witnesses.len();
    log::info!(
        "[planner] PHASE 6: {} combinaciones ({} subconjuntos examinados, completo={})",
        total_found,
        outcome.subsets_examined,
        complete
    );

    // =========================================================================
    // PHASE 7: muestreo
    // =========================================================================
    let sampled = sample_without_replacement(outcome.witnesses, config.sample_cap, rng);
    log::info!("[planner] PHASE 7: {} combinaciones muestreadas", sampled.len());

    // =========================================================================
    // PHASE 8: presentación
    // =========================================================================
    let index = index_courses(catalog);
    let records = present_all(&sampled, &index);

    // =========================================================================
    // PHASE 9: curaduría
    // =========================================================================
    let combinations =
        curate_or_fallback(collaborators.advisor, &request.interests, records, config.curated_count, &mut warnings);
    log::info!(
        "[planner] PHASE 9: {} horarios finales, {} avisos, {:?}",
        combinations.len(),
        warnings.len(),
        started.elapsed()
    );

    Ok(PlanResponse { combinations, complete, total_found, warnings })
}

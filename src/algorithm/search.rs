//! Motor de búsqueda de combinaciones con testigo.
//!
//! Recorre los subconjuntos de k cursos en orden lexicográfico y, para cada
//! uno, busca una asignación de secciones sin conflictos con
//! `section_selector`. Cada subconjunto se emite a lo sumo una vez junto a su
//! primer testigo.
//!
//! Límites configurables (`SearchLimits`): `max_results`, tope de intentos
//! por subconjunto y una fecha límite. Cualquiera de ellos sacrifica
//! completitud, nunca corrección: lo devuelto siempre está libre de
//! conflictos, y `SearchOutcome::completeness` dice si faltó explorar algo.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::algorithm::conflict::ConflictMatrix;
use crate::algorithm::section_selector::{select_non_conflicting_sections, Selection, SelectionBudget};
use crate::algorithm::subsets::{binomial, unrank, Subsets};
use crate::error::{BudgetStop, EngineError, EngineResult};
use crate::models::{Assignment, CandidateCourse, WitnessedCombination};

/// Debajo de esta cantidad de subconjuntos no vale la pena lanzar hilos.
const PARALLEL_THRESHOLD: u128 = 512;
const MIN_CHUNK: u128 = 16;
const MAX_CHUNK: u128 = 4096;

#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub max_results: Option<usize>,
    pub max_section_attempts: Option<u64>,
    pub deadline: Option<Instant>,
    /// 0 o 1 = secuencial.
    pub workers: usize,
}

impl SearchLimits {
    pub fn sequential() -> Self {
        SearchLimits { workers: 1, ..Default::default() }
    }

    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_section_attempts(mut self, n: u64) -> Self {
        self.max_section_attempts = Some(n);
        self
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn selection_budget(&self) -> SelectionBudget {
        SelectionBudget { max_attempts: self.max_section_attempts, deadline: self.deadline }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Exhaustive,
    Partial(BudgetStop),
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub witnesses: Vec<WitnessedCombination>,
    pub completeness: Completeness,
    pub subsets_examined: u64,
}

impl SearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Exhaustive
    }
}

/// Busca combinaciones de `k` cursos con al menos una asignación de secciones
/// sin conflictos. El orden de salida es el orden de enumeración.
pub fn find_witnessed_combinations(
    pool: &[CandidateCourse],
    k: usize,
    limits: &SearchLimits,
) -> EngineResult<SearchOutcome> {
    if k == 0 {
        return Err(EngineError::InvalidClassCount(k));
    }
    let n = pool.len();
    if n < k {
        log::debug!("[search] {} cursos candidatos, insuficientes para k={}", n, k);
        return Ok(SearchOutcome { witnesses: Vec::new(), completeness: Completeness::Exhaustive, subsets_examined: 0 });
    }
    if limits.max_results == Some(0) {
        return Ok(SearchOutcome {
            witnesses: Vec::new(),
            completeness: Completeness::Partial(BudgetStop::MaxResults),
            subsets_examined: 0,
        });
    }

    let matrix = ConflictMatrix::build(pool);
    let total = binomial(n, k);
    log::debug!("[search] {} cursos, k={}, subconjuntos={:?}, workers={}", n, k, total, limits.workers);

    match total {
        Some(t) if limits.workers > 1 && t >= PARALLEL_THRESHOLD => search_parallel(pool, k, t, &matrix, limits),
        _ => Ok(search_sequential(pool, k, &matrix, limits)),
    }
}

fn witness_from(pool: &[CandidateCourse], subset: &[usize], picks: &[usize]) -> WitnessedCombination {
    let assignments = subset
        .iter()
        .zip(picks)
        .map(|(&c, &s)| Assignment { course_id: pool[c].id.clone(), section: pool[c].sections[s].clone() })
        .collect();
    WitnessedCombination::new(assignments)
}

fn search_sequential(
    pool: &[CandidateCourse],
    k: usize,
    matrix: &ConflictMatrix,
    limits: &SearchLimits,
) -> SearchOutcome {
    let mut witnesses = Vec::new();
    let mut examined = 0u64;
    let mut abandoned = false;
    let mut stop = None;

    let mut subsets = Subsets::new(pool.len(), k).peekable();
    while let Some(subset) = subsets.next() {
        if limits.deadline_passed() {
            stop = Some(BudgetStop::Deadline);
            break;
        }
        examined += 1;
        match select_non_conflicting_sections(&subset, matrix, limits.selection_budget()) {
            Selection::Found(picks) => witnesses.push(witness_from(pool, &subset, &picks)),
            Selection::Exhausted => {}
            Selection::Abandoned => abandoned = true,
            Selection::TimedOut => {
                stop = Some(BudgetStop::Deadline);
                break;
            }
        }
        if limits.max_results.is_some_and(|m| witnesses.len() >= m) {
            if subsets.peek().is_some() {
                stop = Some(BudgetStop::MaxResults);
            }
            break;
        }
    }

    let completeness = match (stop, abandoned) {
        (Some(s), _) => Completeness::Partial(s),
        (None, true) => Completeness::Partial(BudgetStop::SectionAttempts),
        (None, false) => Completeness::Exhaustive,
    };
    log::debug!("[search] secuencial: {} testigos, {} subconjuntos examinados, {:?}", witnesses.len(), examined, completeness);
    SearchOutcome { witnesses, completeness, subsets_examined: examined }
}

/// Reparte rangos contiguos de rangos lexicográficos entre hilos.
///
/// Los trozos se reclaman en orden creciente y un trozo reclamado siempre se
/// termina (salvo fecha límite, que también corta dentro del backtracking), así que al cortar por `max_results` el
/// prefijo ordenado coincide con el de la búsqueda secuencial.
fn search_parallel(
    pool: &[CandidateCourse],
    k: usize,
    total: u128,
    matrix: &ConflictMatrix,
    limits: &SearchLimits,
) -> EngineResult<SearchOutcome> {
    let n = pool.len();
    let chunk = (total / (limits.workers as u128 * 8)).clamp(MIN_CHUNK, MAX_CHUNK);
    let chunks = total.div_ceil(chunk);
    let Ok(chunks) = u64::try_from(chunks) else {
        return Ok(search_sequential(pool, k, matrix, limits));
    };

    let next_chunk = AtomicU64::new(0);
    let examined = AtomicU64::new(0);
    let stop = AtomicBool::new(false);
    let deadline_hit = AtomicBool::new(false);
    let abandoned = AtomicBool::new(false);
    let found: Mutex<Vec<(u128, Vec<usize>, Vec<usize>)>> = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for _ in 0..limits.workers {
            scope.spawn(|| {
                loop {
                    if stop.load(Ordering::Acquire) {
                        break;
                    }
                    let c = next_chunk.fetch_add(1, Ordering::AcqRel);
                    if c >= chunks {
                        break;
                    }
                    let start = c as u128 * chunk;
                    let len = (total - start).min(chunk) as usize;
                    let Some(first) = unrank(n, k, start) else {
                        log::error!("[search] no se pudo reconstruir el subconjunto de rango {}", start);
                        continue;
                    };

                    let mut local = Vec::new();
                    for (offset, subset) in Subsets::starting_at(n, first).take(len).enumerate() {
                        if limits.deadline_passed() {
                            deadline_hit.store(true, Ordering::Release);
                            stop.store(true, Ordering::Release);
                            break;
                        }
                        examined.fetch_add(1, Ordering::Relaxed);
                        match select_non_conflicting_sections(&subset, matrix, limits.selection_budget()) {
                            Selection::Found(picks) => local.push((start + offset as u128, subset, picks)),
                            Selection::Exhausted => {}
                            Selection::Abandoned => abandoned.store(true, Ordering::Relaxed),
                            Selection::TimedOut => {
                                deadline_hit.store(true, Ordering::Release);
                                stop.store(true, Ordering::Release);
                                break;
                            }
                        }
                    }

                    let mut guard = found.lock().unwrap_or_else(|e| e.into_inner());
                    guard.extend(local);
                    if limits.max_results.is_some_and(|m| guard.len() >= m) {
                        stop.store(true, Ordering::Release);
                    }
                }
            });
        }
    });

    let mut found = found.into_inner().unwrap_or_else(|e| e.into_inner());
    found.sort_by_key(|(rank, _, _)| *rank);
    let examined = examined.load(Ordering::Relaxed);

    let mut truncated = false;
    if let Some(m) = limits.max_results {
        if found.len() > m {
            found.truncate(m);
            truncated = true;
        }
    }
    let max_hit = limits.max_results.is_some_and(|m| found.len() >= m) && (truncated || (examined as u128) < total);

    let completeness = if deadline_hit.load(Ordering::Acquire) {
        Completeness::Partial(BudgetStop::Deadline)
    } else if max_hit {
        Completeness::Partial(BudgetStop::MaxResults)
    } else if abandoned.load(Ordering::Relaxed) {
        Completeness::Partial(BudgetStop::SectionAttempts)
    } else {
        Completeness::Exhaustive
    };

    let witnesses: Vec<WitnessedCombination> =
        found.iter().map(|(_, subset, picks)| witness_from(pool, subset, picks)).collect();
    log::debug!(
        "[search] paralelo ({} hilos, trozos de {}): {} testigos, {} subconjuntos examinados, {:?}",
        limits.workers,
        chunk,
        witnesses.len(),
        examined,
        completeness
    );
    Ok(SearchOutcome { witnesses, completeness, subsets_examined: examined })
}

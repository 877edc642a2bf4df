//! Configuración del motor.
//!
//! Valores por defecto sensatos, sobreescribibles por variables de entorno
//! `COMBISHIFT_*` (con `.env` opcional). Los valores ilegibles se ignoran con
//! un aviso en el log y se conserva el default.

use std::env;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::algorithm::SearchLimits;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// k por defecto cuando la petición no lo indica.
    pub num_courses: usize,
    pub max_results: Option<usize>,
    /// Tope de intentos de asignación por conjunto de cursos.
    pub max_section_attempts: Option<u64>,
    pub search_budget_ms: Option<u64>,
    pub sample_cap: usize,
    pub curated_count: usize,
    pub interest_top_k: usize,
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            num_courses: 4,
            max_results: None,
            max_section_attempts: None,
            search_budget_ms: None,
            sample_cap: 50,
            curated_count: 4,
            interest_top_k: 5,
            workers: num_cpus::get().max(1),
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else { return };
    match raw.trim().parse::<T>() {
        Ok(v) => *slot = v,
        Err(_) => log::warn!("[config] {}='{}' no es válido; se mantiene el valor por defecto", key, raw),
    }
}

fn read_opt<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut Option<T>) {
    let Some(raw) = lookup(key) else { return };
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        *slot = None;
        return;
    }
    match raw.parse::<T>() {
        Ok(v) => *slot = Some(v),
        Err(_) => log::warn!("[config] {}='{}' no es válido; se mantiene el valor por defecto", key, raw),
    }
}

impl EngineConfig {
    /// Lee `.env` (si existe) y luego las variables de entorno del proceso.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = EngineConfig::default();
        read(&lookup, "COMBISHIFT_NUM_COURSES", &mut cfg.num_courses);
        read_opt(&lookup, "COMBISHIFT_MAX_RESULTS", &mut cfg.max_results);
        read_opt(&lookup, "COMBISHIFT_MAX_SECTION_ATTEMPTS", &mut cfg.max_section_attempts);
        read_opt(&lookup, "COMBISHIFT_SEARCH_BUDGET_MS", &mut cfg.search_budget_ms);
        read(&lookup, "COMBISHIFT_SAMPLE_CAP", &mut cfg.sample_cap);
        read(&lookup, "COMBISHIFT_CURATED_COUNT", &mut cfg.curated_count);
        read(&lookup, "COMBISHIFT_INTEREST_TOP_K", &mut cfg.interest_top_k);
        read(&lookup, "COMBISHIFT_WORKERS", &mut cfg.workers);
        if cfg.workers == 0 {
            cfg.workers = 1;
        }
        cfg
    }

    /// Límites de búsqueda para una petición; `started` marca el inicio del
    /// presupuesto de tiempo.
    pub fn search_limits(&self, max_results: Option<usize>, budget_ms: Option<u64>, started: Instant) -> SearchLimits {
        let mut limits = SearchLimits::sequential().with_workers(self.workers);
        if let Some(n) = max_results.or(self.max_results) {
            limits = limits.with_max_results(n);
        }
        if let Some(n) = self.max_section_attempts {
            limits = limits.with_max_section_attempts(n);
        }
        if let Some(ms) = budget_ms.or(self.search_budget_ms) {
            limits = limits.with_deadline(started + Duration::from_millis(ms));
        }
        limits
    }
}

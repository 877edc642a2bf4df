// Biblioteca raíz del crate `combishift`.
// Motor de combinaciones de horarios: filtra secciones por franjas prohibidas,
// busca combinaciones de k cursos con una asignación de secciones sin choques
// y muestrea el resultado para presentarlo. `plan_schedules` orquesta el flujo
// completo; `ScheduleService` lo expone de forma asíncrona.
pub mod advisory;
pub mod algorithm;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interest;
pub mod models;
pub mod planner;
pub mod request;
pub mod requirements;
pub mod service;

pub use advisory::{AdvisoryRequest, ScheduleAdvisor};
pub use algorithm::{find_witnessed_combinations, Completeness, SearchLimits, SearchOutcome};
pub use config::EngineConfig;
pub use error::{BudgetStop, EngineError, EngineResult, Warning};
pub use interest::{InterestMatcher, KeywordInterestMatcher};
pub use planner::{plan_schedules, Collaborators};
pub use request::{parse_plan_request, PlanRequest, PlanResponse};
pub use service::ScheduleService;

//! Fachada asíncrona del planificador.
//!
//! Comparte un catálogo inmutable entre peticiones, limita las búsquedas
//! simultáneas con un semáforo del tamaño de la máquina y corre cada
//! búsqueda en `spawn_blocking` para no bloquear el runtime.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Semaphore;

use crate::advisory::ScheduleAdvisor;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::interest::InterestMatcher;
use crate::models::Course;
use crate::planner::{plan_schedules, Collaborators};
use crate::request::{parse_plan_request, PlanRequest, PlanResponse};

#[derive(Clone)]
pub struct ScheduleService {
    catalog: Arc<Vec<Course>>,
    config: Arc<EngineConfig>,
    semaphore: Arc<Semaphore>,
    interest: Option<Arc<dyn InterestMatcher>>,
    advisor: Option<Arc<dyn ScheduleAdvisor>>,
}

impl ScheduleService {
    pub fn new(catalog: Vec<Course>, config: EngineConfig) -> Self {
        let permits = std::cmp::max(1, num_cpus::get());
        ScheduleService {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            semaphore: Arc::new(Semaphore::new(permits)),
            interest: None,
            advisor: None,
        }
    }

    pub fn with_interest_matcher(mut self, matcher: Arc<dyn InterestMatcher>) -> Self {
        self.interest = Some(matcher);
        self
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn ScheduleAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn catalog(&self) -> &[Course] {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn plan(&self, request: PlanRequest) -> EngineResult<PlanResponse> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EngineError::Join(format!("failed to acquire semaphore: {}", e)))?;

        let catalog = Arc::clone(&self.catalog);
        let config = Arc::clone(&self.config);
        let interest = self.interest.clone();
        let advisor = self.advisor.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let mut rng = StdRng::from_os_rng();
            let collaborators = Collaborators { interest: interest.as_deref(), advisor: advisor.as_deref() };
            plan_schedules(&catalog, &request, collaborators, &config, &mut rng)
        });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                log::error!("[service] tarea de planificación falló: {}", e);
                Err(EngineError::Join(e.to_string()))
            }
        }
    }

    /// Igual que `plan`, desde el JSON crudo de la petición.
    pub async fn plan_json(&self, body: &str) -> EngineResult<PlanResponse> {
        let request = parse_plan_request(body)?;
        self.plan(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, TimeWindow, Weekday, WeekdaySet};

    fn catalog() -> Vec<Course> {
        ["54", "55", "56"]
            .iter()
            .enumerate()
            .map(|(i, num)| {
                let mut c = Course::new(format!("{}", i)).with_section(Section::new(
                    [Weekday::Fri].into_iter().collect::<WeekdaySet>(),
                    TimeWindow::parse(&format!("{:02}:00", 8 + i), &format!("{:02}:00", 9 + i)).unwrap(),
                ));
                c.abbreviation = "MATH".into();
                c.course_number = num.to_string();
                c
            })
            .collect()
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_catalog() {
        let svc = ScheduleService::new(catalog(), EngineConfig { workers: 1, ..EngineConfig::default() });
        let body = r#"{"not_completed": ["MATH 54", "MATH 55", "MATH 56"], "num_courses": 2}"#;
        let (a, b) = tokio::join!(svc.plan_json(body), svc.plan_json(body));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.total_found, 3);
        assert_eq!(b.total_found, 3);
        assert!(a.complete && b.complete);
    }

    #[tokio::test]
    async fn test_bad_json_is_request_error() {
        let svc = ScheduleService::new(catalog(), EngineConfig::default());
        assert!(matches!(svc.plan_json("not json").await, Err(EngineError::InvalidRequest(_))));
    }
}

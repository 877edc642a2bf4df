use std::sync::Arc;

use combishift::advisory::{AdvisoryRequest, ScheduleAdvisor};
use combishift::catalog::courses_from_rows;
use combishift::requirements::{parse_required_courses, RequirementPage};
use combishift::{
    plan_schedules, Collaborators, EngineConfig, EngineResult, KeywordInterestMatcher, PlanRequest, ScheduleService,
    Warning,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn rows() -> Vec<serde_json::Value> {
    vec![
        json!({"id": "1", "abbreviation": "COMPSCI", "courseNumber": "61A", "title": "Structure and Interpretation of Computer Programs",
               "units": "4", "sectionSet": {"edges": [
                   {"node": {"wordDays": "MWF", "startTime": "1970-01-01T08:00:00", "endTime": "1970-01-01T09:00:00", "locationName": "Wheeler 150"}},
                   {"node": {"wordDays": "TuTh", "startTime": "1970-01-01T14:00:00", "endTime": "1970-01-01T15:30:00"}}
               ]}}),
        json!({"id": "2", "abbreviation": "MATH", "courseNumber": "54", "title": "Linear Algebra and Differential Equations",
               "units": 4, "sectionSet": "{'edges': [{'node': {'wordDays': 'TuTh', 'startTime': '1970-01-01T14:00:00', 'endTime': '1970-01-01T15:30:00', 'instructor': None}}]}"}),
        json!({"id": "3", "abbreviation": "EECS", "courseNumber": "16A", "title": "Designing Information Devices",
               "sectionSet": {"edges": [{"node": {"wordDays": "MWF", "startTime": "1970-01-01T08:30:00", "endTime": "1970-01-01T09:30:00"}}]}}),
        json!({"id": "4", "abbreviation": "COMPSCI", "courseNumber": "188", "title": "Introduction to Artificial Intelligence",
               "description": "Robotics and machine learning", "sectionSet": {"edges": [
                   {"node": {"wordDays": "MW", "startTime": "1970-01-01T17:00:00", "endTime": "1970-01-01T18:30:00"}}]}}),
        json!({"title": "row without id"}),
        json!({"id": "5", "abbreviation": "PHYSICS", "courseNumber": "7A", "sectionSet": {"edges": [
                   {"node": {"wordDays": "F", "startTime": "tbd", "endTime": "1970-01-01T10:00:00"}}]}}),
    ]
}

const GUIDE: &str = r#"<html><body>
<h2>Lower Division Requirements</h2>
<table>
<tr><th>Course</th><th>Title</th></tr>
<tr><td><a href="/search/?P=COMPSCI%2061A">COMPSCI 61A</a></td><td>SICP</td></tr>
<tr><td><a href="/search/?P=MATH%2054">MATH 54</a></td><td>Linear Algebra</td></tr>
<tr><td><a href="/search/?P=EECS%2016A">EECS 16A</a></td><td>Devices</td></tr>
<tr><td><a href="/search/?P=PHYSICS%207A">PHYSICS 7A</a></td><td>Physics</td></tr>
</table>
<h2>Upper Division Requirements</h2>
<h2>Other</h2>
</body></html>"#;

fn request(not_completed: Vec<String>) -> PlanRequest {
    PlanRequest {
        not_completed,
        interests: r#"["robotics"]"#.to_string(),
        num_courses: Some(3),
        ..PlanRequest::default()
    }
}

fn config() -> EngineConfig {
    EngineConfig { workers: 1, curated_count: 10, ..EngineConfig::default() }
}

#[test]
fn test_guide_to_schedules() {
    let load = courses_from_rows(&rows());
    assert_eq!(load.courses.len(), 5);
    eprintln!("avisos de carga: {:?}", load.warnings);
    assert!(load.warnings.iter().any(|w| matches!(w, Warning::SkippedCatalogRow { row: 4, .. })));
    assert!(load.warnings.iter().any(|w| matches!(w, Warning::SkippedSection { course_id, .. } if course_id == "5")));

    let required = parse_required_courses(GUIDE, &RequirementPage::default());
    assert_eq!(required, vec!["COMPSCI 61A", "MATH 54", "EECS 16A", "PHYSICS 7A"]);

    let matcher = KeywordInterestMatcher::default();
    let collaborators = Collaborators { interest: Some(&matcher), advisor: None };
    let mut rng = StdRng::seed_from_u64(11);
    let resp = plan_schedules(&load.courses, &request(required), collaborators, &config(), &mut rng).unwrap();

    // pool: 61A, MATH 54, EECS 16A (PHYSICS 7A sin secciones) + COMPSCI 188 por intereses.
    // 61A necesita TuTh para convivir con EECS 16A, y entonces choca con MATH 54.
    let names: Vec<Vec<&str>> =
        resp.combinations.iter().map(|s| s.iter().map(|r| r.name.as_str()).collect()).collect();
    eprintln!("horarios: {:?}", names);
    assert!(resp.complete);
    assert_eq!(resp.total_found, 3);
    assert!(!names.iter().any(|n| n.contains(&"COMPSCI 61A") && n.contains(&"MATH 54") && n.contains(&"EECS 16A")));
    for schedule in &resp.combinations {
        if let Some(cs) = schedule.iter().find(|r| r.name == "COMPSCI 61A") {
            if schedule.iter().any(|r| r.name == "EECS 16A") {
                assert_eq!(cs.days, "Tuesday Thursday");
                assert_eq!(cs.start_time, "14:00");
            }
        }
    }
}

#[test]
fn test_disallowed_mornings() {
    let load = courses_from_rows(&rows());
    let mut req = request(vec!["COMPSCI 61A".into(), "MATH 54".into(), "EECS 16A".into()]);
    req.interests = String::new();
    req.num_courses = Some(2);
    req.disallowed = json!({"Monday": [["00:00", "12:00"]], "Wednesday": [["00:00", "12:00"]]});
    let mut rng = StdRng::seed_from_u64(5);
    let resp = plan_schedules(&load.courses, &req, Collaborators::default(), &config(), &mut rng).unwrap();
    // EECS 16A queda fuera; 61A sólo puede usar TuTh, que choca con MATH 54
    assert_eq!(resp.total_found, 0);
    assert!(!resp.warnings.iter().any(|w| matches!(w, Warning::EmptyCandidatePool { .. })));
    assert!(resp.combinations.is_empty());
}

struct PicksSecond;

impl ScheduleAdvisor for PicksSecond {
    fn curate(&self, request: &AdvisoryRequest) -> EngineResult<String> {
        let pick = request.schedules.get(1).cloned().into_iter().collect::<Vec<_>>();
        Ok(format!("Best option:\n{}\n", serde_json::to_string(&pick).unwrap_or_default()))
    }
}

struct Rambles;

impl ScheduleAdvisor for Rambles {
    fn curate(&self, _request: &AdvisoryRequest) -> EngineResult<String> {
        Ok("I think all of them are great!".to_string())
    }
}

#[tokio::test]
async fn test_service_with_advisor_and_fallback() {
    let load = courses_from_rows(&rows());
    let names = vec!["COMPSCI 61A".to_string(), "MATH 54".to_string(), "EECS 16A".to_string(), "COMPSCI 188".to_string()];
    let mut req = request(names);
    req.num_courses = Some(2);

    let cfg = EngineConfig { workers: 1, curated_count: 2, ..EngineConfig::default() };
    let good = ScheduleService::new(load.courses.clone(), cfg.clone()).with_advisor(Arc::new(PicksSecond));
    let resp = good.plan(req.clone()).await.unwrap();
    assert_eq!(resp.combinations.len(), 1);
    assert!(resp.warnings.is_empty());

    let bad = ScheduleService::new(load.courses, cfg).with_advisor(Arc::new(Rambles));
    let resp = bad.plan(req).await.unwrap();
    assert_eq!(resp.combinations.len(), 2);
    assert!(resp.warnings.iter().any(|w| matches!(w, Warning::MalformedAdvisoryResponse { .. })));
}

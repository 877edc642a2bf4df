use combishift::algorithm::{admissible_candidates, find_witnessed_combinations, is_admissible, SearchLimits};
use combishift::models::{Combination, Course, DisallowedMap, Section, TimeWindow, Weekday, WeekdaySet};

fn section(days: &[Weekday], start: &str, end: &str) -> Section {
    Section::new(days.iter().copied().collect::<WeekdaySet>(), TimeWindow::parse(start, end).unwrap())
}

/// A, B, C sin choques (LMV 9-10, 10-11, 11-12), D choca con A, E sin días.
fn scenario() -> Vec<Course> {
    let mwf = [Weekday::Mon, Weekday::Wed, Weekday::Fri];
    vec![
        Course::new("A").with_section(section(&mwf, "09:00", "10:00")),
        Course::new("B").with_section(section(&mwf, "10:00", "11:00")),
        Course::new("C").with_section(section(&mwf, "11:00", "12:00")),
        Course::new("D").with_section(section(&[Weekday::Mon], "09:00", "10:00")),
        Course::new("E").with_section(section(&[], "09:00", "10:00")),
    ]
}

fn combo(ids: &[&str]) -> Combination {
    ids.iter().copied().collect()
}

#[test]
fn test_end_to_end_scenario_k3() {
    let catalog = scenario();
    let pool = admissible_candidates(&catalog, &DisallowedMap::new());
    assert_eq!(pool.len(), 5);

    let outcome = find_witnessed_combinations(&pool, 3, &SearchLimits::sequential()).unwrap();
    let found: Vec<Combination> = outcome.witnesses.iter().map(|w| w.combination()).collect();
    eprintln!("combinaciones: {:?}", found);

    assert!(outcome.is_complete());
    assert!(found.contains(&combo(&["A", "B", "C"])), "{{A,B,C}} debe aparecer");
    assert!(
        !found.iter().any(|c| c.contains("A") && c.contains("D")),
        "ninguna combinación puede tener A y D juntos"
    );
    // E no impone restricciones: acompaña a cualquier par compatible
    for pair in [["A", "B"], ["A", "C"], ["B", "C"], ["B", "D"], ["C", "D"]] {
        assert!(found.contains(&combo(&[pair[0], pair[1], "E"])), "falta {:?} + E", pair);
    }
    assert_eq!(found.len(), 7);
    assert_eq!(found[0], combo(&["A", "B", "C"]));
}

#[test]
fn test_witness_is_the_displayed_assignment() {
    let mut catalog = scenario();
    // segunda sección de A que no choca con D
    catalog[0].sections.push(section(&[Weekday::Tue], "09:00", "10:00"));
    let pool = admissible_candidates(&catalog, &DisallowedMap::new());
    let outcome = find_witnessed_combinations(&pool, 2, &SearchLimits::sequential()).unwrap();
    let ad = outcome
        .witnesses
        .iter()
        .find(|w| w.combination() == combo(&["A", "D"]))
        .expect("A y D son compatibles usando la segunda sección de A");
    assert_eq!(ad.section_for("A").unwrap().days, [Weekday::Tue].into_iter().collect::<WeekdaySet>());
}

#[test]
fn test_disallowed_window_prunes_courses() {
    let catalog = scenario();
    let disallowed = DisallowedMap::new().with(Weekday::Mon, TimeWindow::parse("08:30", "09:30").unwrap());
    let pool = admissible_candidates(&catalog, &disallowed);
    let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
    // A y D empiezan 09:00, dentro de (08:30, 09:30); E no tiene días
    assert_eq!(ids, vec!["B", "C", "E"]);

    let outcome = find_witnessed_combinations(&pool, 3, &SearchLimits::sequential()).unwrap();
    assert_eq!(outcome.witnesses.len(), 1);
    assert_eq!(outcome.witnesses[0].combination(), combo(&["B", "C", "E"]));
}

#[test]
fn test_admissibility_boundaries() {
    let s = section(&[Weekday::Mon], "09:00", "10:00");
    let inside = DisallowedMap::new().with(Weekday::Mon, TimeWindow::parse("08:30", "09:30").unwrap());
    let touching = DisallowedMap::new().with(Weekday::Mon, TimeWindow::parse("07:00", "09:00").unwrap());
    let enclosed = DisallowedMap::new().with(Weekday::Mon, TimeWindow::parse("09:15", "09:45").unwrap());
    assert!(!is_admissible(&s, &inside));
    assert!(is_admissible(&s, &touching));
    // regla asimétrica: una franja contenida por completo en la sección no la descarta
    assert!(is_admissible(&s, &enclosed));
}

#[test]
fn test_max_results_gives_prefix_and_partial_flag() {
    let catalog = scenario();
    let pool = admissible_candidates(&catalog, &DisallowedMap::new());
    let full = find_witnessed_combinations(&pool, 3, &SearchLimits::sequential()).unwrap();
    let capped = find_witnessed_combinations(&pool, 3, &SearchLimits::sequential().with_max_results(3)).unwrap();
    assert!(!capped.is_complete());
    assert_eq!(capped.witnesses, full.witnesses[..3].to_vec());
}

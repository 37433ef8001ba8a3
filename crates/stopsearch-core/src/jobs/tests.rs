use super::*;
use serde_json::json;

fn fixture_registry() -> AvailabilityRegistry {
    AvailabilityRegistry::from_payload(
        br#"[
            {"date":"2019-10","stop-and-search":["avon-and-somerset","cambridgeshire","cheshire"]},
            {"date":"2019-08","stop-and-search":"['cambridgeshire', 'cheshire', 'btp']"},
            {"date":"2019-07","stop-and-search":["cambridgeshire","cheshire","kent"]}
        ]"#,
    )
    .unwrap()
}

#[test]
fn valid_pairs_are_all_flagged_valid() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job(
        &reg,
        Selection::only(["2019-10", "2019-07"]),
        Selection::only(["cambridgeshire", "cheshire"]),
    );
    assert_eq!(r.outcome, AddOutcome::Added);
    assert_eq!(r.added, 4);
    assert_eq!(q.len(), 4);
    assert!(q.jobs().iter().all(|j| j.valid_date && j.valid_force));
    assert!(q.jobs().iter().all(|j| j.status == JobStatus::NotDone));
}

#[test]
fn invalid_date_is_flagged_not_dropped() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    q.add_job(
        &reg,
        Selection::only(["2019-08", "2019-X7"]),
        Selection::only(["cheshire"]),
    );
    assert_eq!(q.len(), 2);
    assert_eq!(q.jobs().iter().filter(|j| j.valid_date).count(), 1);
    assert!(q.jobs().iter().all(|j| j.valid_force));
}

#[test]
fn count_is_product_of_distinct_inputs() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job(
        &reg,
        Selection::only(["2019-08", "2019-07", "2019-08"]),
        Selection::only(["kent", "btp", "kent", "cheshire"]),
    );
    assert_eq!(r.added, 2 * 3);
    let pairs: Vec<(&str, &str)> = q
        .jobs()
        .iter()
        .map(|j| (j.date.as_str(), j.force.as_str()))
        .collect();
    let distinct: HashSet<_> = pairs.iter().collect();
    assert_eq!(distinct.len(), pairs.len());
}

#[test]
fn forces_match_case_insensitively() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    for force in ["Cheshire", "CHESHIRE", "cheshire"] {
        q.add_job(&reg, Selection::only(["2019-08"]), Selection::only([force]));
    }
    assert_eq!(q.len(), 3);
    for j in q.jobs() {
        assert_eq!(j.force, "cheshire");
        assert!(j.valid_force);
    }
}

#[test]
fn mixed_case_listing_still_validates_forces() {
    let reg = AvailabilityRegistry::from_payload(
        br#"[{"date":"2019-08","stop-and-search":"['Cheshire', 'BTP']"}]"#,
    )
    .unwrap();
    assert_eq!(reg.forces(), vec!["cheshire", "btp"]);
    let mut q = JobQueue::new();
    q.add_job(
        &reg,
        Selection::only(["2019-08"]),
        Selection::only(["Cheshire", "btp"]),
    );
    assert!(q.jobs().iter().all(|j| j.valid_force));
}

#[test]
fn mixed_case_duplicates_collapse_within_one_call() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job(
        &reg,
        Selection::only(["2019-08"]),
        Selection::only(["Kent", "kent", "KENT"]),
    );
    assert_eq!(r.added, 1);
}

#[test]
fn dates_are_not_case_folded() {
    let reg = AvailabilityRegistry::from_payload(
        br#"[{"date":"2019-aug","stop-and-search":["kent"]}]"#,
    )
    .unwrap();
    let mut q = JobQueue::new();
    q.add_job(&reg, Selection::only(["2019-AUG"]), Selection::only(["kent"]));
    assert_eq!(q.jobs()[0].date, "2019-AUG");
    assert!(!q.jobs()[0].valid_date);
}

#[test]
fn separate_calls_are_not_deduplicated() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    q.add_job(
        &reg,
        Selection::only(["2019-10", "2019-07"]),
        Selection::only(["cambridgeshire", "cheshire"]),
    );
    q.add_job(
        &reg,
        Selection::only(["2019-10"]),
        Selection::only(["cambridgeshire", "cheshire"]),
    );
    assert_eq!(q.len(), 6);
    // Earlier entries keep their position.
    assert_eq!(q.jobs()[0].date, "2019-10");
    assert_eq!(q.jobs()[4].date, "2019-10");
}

#[test]
fn unknown_registry_flags_everything_invalid() {
    let reg = AvailabilityRegistry::unknown();
    let mut q = JobQueue::new();
    let r = q.add_job(
        &reg,
        Selection::only(["2019-10", "2019-07"]),
        Selection::only(["cambridgeshire", "cheshire"]),
    );
    assert_eq!(r.added, 4);
    assert!(q.jobs().iter().all(|j| !j.valid_date && !j.valid_force));
}

#[test]
fn unknown_registry_cannot_expand_all() {
    let reg = AvailabilityRegistry::unknown();
    let mut q = JobQueue::new();
    let r = q.add_job(&reg, Selection::only(["2019-10"]), Selection::All);
    assert_eq!(r.outcome, AddOutcome::AvailabilityUnknown);
    assert_eq!(r.added, 0);
    assert!(q.is_empty());
}

#[test]
fn all_forces_for_given_months() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job(&reg, Selection::only(["2019-08", "2019-07"]), Selection::All);
    // Five distinct forces in the fixture.
    assert_eq!(r.forces.len(), 5);
    assert_eq!(r.added, 10);
}

#[test]
fn all_and_all_adds_full_grid() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job(&reg, Selection::All, Selection::All);
    assert_eq!(r.added, reg.dates().len() * reg.forces().len());
    // The grid includes combinations the registry never listed together.
    assert!(q
        .jobs()
        .iter()
        .any(|j| j.date == "2019-10" && j.force == "kent" && j.valid_date && j.valid_force));
}

#[test]
fn non_list_input_adds_nothing() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job_json(&reg, Some(&json!("2019-08")), Some(&json!(["cheshire"])));
    assert!(matches!(r.outcome, AddOutcome::Malformed(ref e) if e.axis == "dates"));
    let r = q.add_job_json(&reg, Some(&json!(["2019-08"])), Some(&json!(42)));
    assert!(matches!(r.outcome, AddOutcome::Malformed(ref e) if e.axis == "forces"));
    assert!(q.is_empty());
}

#[test]
fn non_string_elements_are_dropped() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job_json(&reg, Some(&json!(["2019-08", 1])), Some(&json!(["cheshire"])));
    assert_eq!(r.added, 1);
    assert_eq!(r.rejected_dates, vec![json!(1)]);
    assert_eq!(q.jobs()[0].date, "2019-08");
}

#[test]
fn filtering_to_empty_adds_nothing() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job_json(&reg, Some(&json!([1, 2.5, null])), Some(&json!(["cheshire"])));
    assert_eq!(r.outcome, AddOutcome::EmptyAfterFiltering);
    assert_eq!(r.rejected_dates.len(), 3);
    assert!(q.is_empty());

    let r = q.add_job(&reg, Selection::only(Vec::<String>::new()), Selection::All);
    assert_eq!(r.outcome, AddOutcome::EmptyAfterFiltering);
    assert!(q.is_empty());
}

#[test]
fn missing_json_axes_mean_all() {
    let reg = fixture_registry();
    let mut q = JobQueue::new();
    let r = q.add_job_json(&reg, Some(&json!(["2019-07"])), None);
    assert_eq!(r.added, 5);
}

#[test]
fn file_name_uses_date_and_force() {
    let job = Job {
        date: "2019-08".into(),
        force: "cheshire".into(),
        valid_date: true,
        valid_force: true,
        status: JobStatus::NotDone,
    };
    assert_eq!(job.file_name("csv"), "2019-08_cheshire.csv");
    assert_eq!(JobStatus::Error.as_str(), "error");
    assert!(job.has_safe_file_name());
}

#[test]
fn path_like_values_are_not_safe_file_names() {
    let job = |date: &str, force: &str| Job {
        date: date.into(),
        force: force.into(),
        valid_date: false,
        valid_force: false,
        status: JobStatus::NotDone,
    };
    assert!(!job("2019-08", "../x").has_safe_file_name());
    assert!(!job("a/b", "cheshire").has_safe_file_name());
    assert!(!job("2019-08", "..\\x").has_safe_file_name());
    assert!(!job("", "cheshire").has_safe_file_name());
    assert!(job("2019-X7", "narnia").has_safe_file_name());
}

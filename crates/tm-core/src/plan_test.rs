use super::*;

fn v(n: u64) -> Version {
    Version::new(n)
}

fn catalog() -> Vec<Version> {
    // Deliberately unsorted: discovery order carries no meaning
    vec![v(30), v(10), v(20)]
}

#[test]
fn test_upgrade_to_target_stops_at_target() {
    let plan = Plan::upgrade(Version::ZERO, Target::Exact(v(20)), &catalog()).unwrap();

    assert_eq!(plan.versions(), vec![v(10), v(20)]);
    assert!(plan.steps.iter().all(|s| s.direction == Direction::Up));
    assert_eq!(plan.final_version(), v(20));
}

#[test]
fn test_full_upgrade_skips_applied_versions() {
    let plan = Plan::upgrade(v(10), Target::Full, &catalog()).unwrap();

    assert_eq!(plan.versions(), vec![v(20), v(30)]);
    assert_eq!(plan.steps[0].record_after, v(20));
    assert_eq!(plan.steps[1].record_after, v(30));
}

#[test]
fn test_upgrade_target_between_versions() {
    let plan = Plan::upgrade(Version::ZERO, Target::Exact(v(25)), &catalog()).unwrap();
    assert_eq!(plan.versions(), vec![v(10), v(20)]);
}

#[test]
fn test_upgrade_below_current_is_ahead_of_target() {
    let err = Plan::upgrade(v(10), Target::Exact(v(5)), &catalog()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::AheadOfTarget { current, target } if current == v(10) && target == v(5)
    ));
}

#[test]
fn test_upgrade_to_reached_target_is_empty() {
    let plan = Plan::upgrade(v(20), Target::Exact(v(20)), &catalog()).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.final_version(), v(20));
}

#[test]
fn test_full_upgrade_at_latest_is_empty() {
    let plan = Plan::upgrade(v(30), Target::Full, &catalog()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_empty_catalog_plans_nothing() {
    let up = Plan::upgrade(Version::ZERO, Target::Full, &[]).unwrap();
    let down = Plan::downgrade(v(10), Target::Full, &[]).unwrap();
    assert!(up.is_empty());
    assert!(down.is_empty());
    assert_eq!(down.final_version(), v(10));
}

#[test]
fn test_full_downgrade_is_descending_and_ends_at_zero() {
    let plan = Plan::downgrade(v(20), Target::Full, &catalog()).unwrap();

    assert_eq!(plan.versions(), vec![v(20), v(10)]);
    assert!(plan.steps.iter().all(|s| s.direction == Direction::Down));
    assert_eq!(plan.steps[0].record_after, v(10));
    assert_eq!(plan.steps[1].record_after, Version::ZERO);
    assert_eq!(plan.final_version(), Version::ZERO);
}

#[test]
fn test_downgrade_to_target_keeps_target_applied() {
    let plan = Plan::downgrade(v(30), Target::Exact(v(10)), &catalog()).unwrap();

    assert_eq!(plan.versions(), vec![v(30), v(20)]);
    assert_eq!(plan.final_version(), v(10));
}

#[test]
fn test_downgrade_above_current_is_behind_target() {
    let err = Plan::downgrade(v(10), Target::Exact(v(20)), &catalog()).unwrap_err();
    assert!(matches!(err, CoreError::BehindTarget { .. }));
}

#[test]
fn test_downgrade_to_current_is_empty() {
    let plan = Plan::downgrade(v(20), Target::Exact(v(20)), &catalog()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_downgrade_from_marker_between_versions() {
    // A marker that is not itself a known version still undoes everything
    // at or below it
    let plan = Plan::downgrade(v(25), Target::Full, &catalog()).unwrap();
    assert_eq!(plan.versions(), vec![v(20), v(10)]);
}

#[test]
fn test_round_trip_plans_return_to_start() {
    let up = Plan::upgrade(v(10), Target::Full, &catalog()).unwrap();
    let down = Plan::downgrade(up.final_version(), Target::Exact(v(10)), &catalog()).unwrap();

    assert_eq!(down.versions(), vec![v(30), v(20)]);
    assert_eq!(down.final_version(), v(10));
}

#[test]
fn test_duplicate_versions_are_planned_once() {
    let plan = Plan::upgrade(Version::ZERO, Target::Full, &[v(10), v(10), v(20)]).unwrap();
    assert_eq!(plan.versions(), vec![v(10), v(20)]);
}

#[test]
fn test_compute_dispatches_on_direction() {
    let plan = Plan::compute(Direction::Down, v(30), Target::Full, &catalog()).unwrap();
    assert_eq!(plan.direction, Direction::Down);
    assert_eq!(plan.len(), 3);
}

#[test]
fn test_check_target_without_catalog() {
    assert!(check_target(Direction::Up, v(10), Target::Full).is_ok());
    assert!(check_target(Direction::Up, v(10), Target::Exact(v(10))).is_ok());
    assert!(check_target(Direction::Up, v(10), Target::Exact(v(5))).is_err());
    assert!(check_target(Direction::Down, v(10), Target::Exact(v(5))).is_ok());
    assert!(check_target(Direction::Down, v(10), Target::Exact(v(15))).is_err());
}

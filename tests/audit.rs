#![forbid(unsafe_code)]
use chrono::{TimeZone, Utc};
use crewroster::{
    AssignmentLedger, CrewId, CrewMember, CrewRegistry, FlightId, Planner, PlannerConfig, Role,
    RosterError,
};
use std::collections::BTreeMap;

fn declared(id: &str, role: Role, flight: Option<&str>) -> CrewMember {
    let member = CrewMember::new(id, role);
    match flight {
        Some(f) => member.declaring(FlightId::new(f)),
        None => member,
    }
}

#[test]
fn audit_reports_divergence_as_data() {
    let roster = CrewRegistry::try_from_members(vec![
        declared("C1", Role::Pilot, Some("FL1")),
        declared("C2", Role::Pilot, Some("FL1")),
        declared("C3", Role::Cabin, Some("FL2")),
        declared("C4", Role::Cabin, None),
    ])
    .unwrap();

    let clean_ledger = AssignmentLedger::new();
    assert!(roster.seed_ledger(&clean_ledger).is_empty());
    let clean = Planner::new(&clean_ledger).validate(&FlightId::new("FL1"), &roster);
    insta::assert_snapshot!(clean.to_string(), @"FL1: 2 crew [C1, C2], no issues");
    assert!(!clean.double_booking_found);

    // engagements antérieurs au chargement du roster
    let ledger = AssignmentLedger::new();
    ledger.try_reserve(&CrewId::new("C2"), &FlightId::new("FL2"));
    ledger.try_reserve(&CrewId::new("C3"), &FlightId::new("FL1"));
    assert_eq!(roster.seed_ledger(&ledger).len(), 2);
    ledger.try_reserve(&CrewId::new("C4"), &FlightId::new("FL1"));
    ledger.try_reserve(&CrewId::new("GHOST"), &FlightId::new("FL1"));

    let report = Planner::new(&ledger).validate(&FlightId::new("FL1"), &roster);
    assert!(report.double_booking_found);
    assert_eq!(report.issues.len(), 3);
    insta::assert_snapshot!(report.to_string(), @r"
FL1: 3 crew [C1, C3, C4]
- Crew C2 is double-booked: assigned to both FL1 and FL2
- Crew C3 is committed to FL1 but the roster declares FL2
- Crew GHOST is committed to FL1 but is not on the roster
");

    // l'audit ne modifie pas le ledger
    assert_eq!(ledger.len(), 5);
}

#[test]
fn audit_flags_declared_crew_without_commitment() {
    let roster =
        CrewRegistry::try_from_members(vec![declared("C1", Role::Pilot, Some("FL1"))]).unwrap();
    let claims = BTreeMap::from([(CrewId::new("C1"), FlightId::new("FL1"))]);
    let ledger = AssignmentLedger::from_snapshot(BTreeMap::new(), claims);

    let report = Planner::new(&ledger).validate(&FlightId::new("FL1"), &roster);

    assert!(report.assigned_crew.is_empty());
    assert_eq!(
        report.issues,
        vec!["Crew C1 is declared on FL1 but holds no commitment".to_string()]
    );
    assert!(ledger.is_empty());
}

#[test]
fn released_declaration_is_not_reported_after_reassignment() {
    let roster = CrewRegistry::try_from_members(vec![
        declared("C1", Role::Pilot, Some("FL100")),
        declared("C2", Role::Pilot, None),
        declared("K1", Role::Cabin, None),
    ])
    .unwrap();
    let ledger = AssignmentLedger::new();
    assert!(roster.seed_ledger(&ledger).is_empty());
    assert_eq!(ledger.claim_of(&CrewId::new("C1")), Some(FlightId::new("FL100")));
    let planner = Planner::new(&ledger);
    let (fl100, fl200) = (FlightId::new("FL100"), FlightId::new("FL200"));

    assert_eq!(planner.release(&fl100, &roster).len(), 1);
    assert_eq!(ledger.claim_of(&CrewId::new("C1")), None);
    assert!(planner.validate(&fl100, &roster).issues.is_empty());

    let now = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
    let result = planner.assign_at(&fl200, &roster, &PlannerConfig::default(), now);
    assert!(result.assigned.iter().any(|m| m.crew_id().as_str() == "C1"));

    let old = planner.validate(&fl100, &roster);
    assert!(!old.double_booking_found, "{old}");
    assert!(old.issues.is_empty());
    let new = planner.validate(&fl200, &roster);
    assert!(!new.double_booking_found, "{new}");
    insta::assert_snapshot!(new.to_string(), @"FL200: 3 crew [C1, C2, K1], no issues");
}

#[test]
fn clear_all_drops_roster_declarations() {
    let roster =
        CrewRegistry::try_from_members(vec![declared("C1", Role::Pilot, Some("FL1"))]).unwrap();
    let ledger = AssignmentLedger::new();
    roster.seed_ledger(&ledger);

    ledger.clear_all();

    assert_eq!(ledger.claim_of(&CrewId::new("C1")), None);
    assert!(ledger.view().claims.is_empty());
    let report = Planner::new(&ledger).validate(&FlightId::new("FL1"), &roster);
    assert!(report.issues.is_empty());
    assert!(report.assigned_crew.is_empty());
}

#[test]
fn suggest_offers_disjoint_batches_of_free_crew() {
    let roster = CrewRegistry::try_from_members(
        (1..=7)
            .map(|i| declared(&format!("C{i}"), Role::Cabin, None))
            .collect(),
    )
    .unwrap();
    let ledger = AssignmentLedger::new();
    ledger.try_reserve(&CrewId::new("C2"), &FlightId::new("FL1"));
    let planner = Planner::new(&ledger);

    let batches = planner.suggest(&roster, 3, 2);
    let ids: Vec<Vec<&str>> = batches
        .iter()
        .map(|b| b.iter().map(|m| m.crew_id().as_str()).collect())
        .collect();
    assert_eq!(ids, vec![vec!["C1", "C3", "C4"], vec!["C5", "C6", "C7"]]);

    assert_eq!(planner.suggest(&roster, 4, 2).len(), 1);
    assert_eq!(planner.suggest(&roster, 2, 10).len(), 3);
    assert_eq!(planner.suggest(&roster, 3, 1).len(), 1);
    assert!(planner.suggest(&roster, 0, 2).is_empty());
    assert!(planner.suggest(&roster, 7, 2).is_empty());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn seeding_reports_conflicting_declarations() {
    let roster =
        CrewRegistry::try_from_members(vec![declared("C1", Role::Pilot, Some("FL1"))]).unwrap();
    let ledger = AssignmentLedger::new();
    ledger.try_reserve(&CrewId::new("C1"), &FlightId::new("FL9"));

    let conflicts = roster.seed_ledger(&ledger);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].declared, FlightId::new("FL1"));
    assert_eq!(conflicts[0].committed, FlightId::new("FL9"));
    assert_eq!(ledger.flight_of(&CrewId::new("C1")), Some(FlightId::new("FL9")));
}

#[test]
fn registry_rejects_duplicate_and_empty_ids() {
    let dup = CrewRegistry::try_from_members(vec![
        CrewMember::new("C1", Role::Pilot),
        CrewMember::new("C1", Role::Cabin),
    ]);
    assert_eq!(dup.unwrap_err(), RosterError::DuplicateCrewId("C1".into()));

    let empty = CrewRegistry::try_from_members(vec![CrewMember::new(" ", Role::Pilot)]);
    assert_eq!(empty.unwrap_err(), RosterError::EmptyCrewId(0));

    let lenient = CrewRegistry::from_members_lenient(vec![
        CrewMember::new("C1", Role::Pilot),
        CrewMember::new("", Role::Pilot),
        CrewMember::new("C1", Role::Cabin),
        CrewMember::new("C2", Role::Cabin),
    ]);
    assert_eq!(lenient.len(), 2);
    assert_eq!(lenient.get(&CrewId::new("C1")).map(|m| m.role()), Some(&Role::Pilot));
}

#[test]
fn view_reads_assignments_from_ledger() {
    let roster = CrewRegistry::try_from_members(vec![
        declared("C1", Role::Pilot, Some("FL1")),
        declared("C2", Role::Cabin, None),
    ])
    .unwrap();
    let ledger = AssignmentLedger::new();
    ledger.try_reserve(&CrewId::new("C2"), &FlightId::new("FL3"));

    let view = roster.view(&ledger);
    assert_eq!(view[0].assigned_flight, None);
    assert_eq!(view[1].assigned_flight, Some(FlightId::new("FL3")));
}

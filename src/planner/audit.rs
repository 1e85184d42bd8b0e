use super::{AuditReport, Planner};
use crate::model::FlightId;
use crate::registry::CrewRegistry;

// Seules les déclarations encore actives (reportées au chargement et jamais
// libérées) sont confrontées aux engagements.
pub(super) fn validate(
    planner: &Planner<'_>,
    flight: &FlightId,
    roster: &CrewRegistry,
) -> AuditReport {
    let view = planner.ledger.view();
    let mut assigned_crew = Vec::new();
    let mut issues = Vec::new();

    for member in roster.iter() {
        let crew = member.crew_id();
        let committed = view.assignments.get(crew);
        let claim = view.claims.get(crew);

        if committed == Some(flight) {
            assigned_crew.push(member.summary());
            if let Some(other) = claim.filter(|c| *c != flight) {
                issues.push(format!(
                    "Crew {crew} is committed to {flight} but the roster declares {other}"
                ));
            }
            continue;
        }

        if claim != Some(flight) {
            continue;
        }
        match committed {
            Some(other) => issues.push(format!(
                "Crew {crew} is double-booked: assigned to both {flight} and {other}"
            )),
            None => issues.push(format!(
                "Crew {crew} is declared on {flight} but holds no commitment"
            )),
        }
    }

    for (crew, _) in view.assignments.iter().filter(|(_, f)| *f == flight) {
        if !roster.contains(crew) {
            issues.push(format!(
                "Crew {crew} is committed to {flight} but is not on the roster"
            ));
        }
    }

    AuditReport {
        flight_id: flight.clone(),
        assigned_crew,
        double_booking_found: !issues.is_empty(),
        issues,
    }
}

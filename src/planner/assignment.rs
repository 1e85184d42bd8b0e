use super::{AssignmentResult, Planner, RoleOutcome};
use crate::config::{CandidateOrder, PlannerConfig};
use crate::model::{CrewMember, FlightId, Role};
use crate::registry::CrewRegistry;
use crate::rest::{self, RestRule};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;
use tracing::{debug, info, warn};

pub(super) fn assign(
    planner: &Planner<'_>,
    flight: &FlightId,
    roster: &CrewRegistry,
    config: &PlannerConfig,
    now: DateTime<Utc>,
) -> AssignmentResult {
    let rule = config.rest_rule();
    let mut assigned = Vec::new();
    let mut roles = Vec::new();

    for quota in config.quotas() {
        let mut count = 0u32;

        for candidate in ordered_candidates(roster, &quota.role, config.candidate_order, now) {
            if count >= quota.required {
                break;
            }
            if accept(planner, candidate, flight, &rule, now) {
                count += 1;
                assigned.push(candidate.clone());
            }
        }

        roles.push(RoleOutcome {
            role: quota.role,
            required: quota.required,
            assigned: count,
        });
    }

    let shortage = roles.iter().any(RoleOutcome::is_short);
    if shortage {
        warn!(flight = %flight, assigned = assigned.len(), "crew shortage");
    } else {
        info!(flight = %flight, assigned = assigned.len(), "flight fully staffed");
    }

    AssignmentResult {
        flight_id: flight.clone(),
        assigned,
        roles,
        shortage,
    }
}

// Le repos est vérifié avant la réservation : un candidat non reposé n'est
// jamais inscrit au ledger. Un équipier déjà engagé sur ce vol est dispensé du
// contrôle de repos, mais l'engagement passe toujours par `try_reserve`.
fn accept(
    planner: &Planner<'_>,
    candidate: &CrewMember,
    flight: &FlightId,
    rule: &RestRule,
    now: DateTime<Utc>,
) -> bool {
    let crew = candidate.crew_id();
    let committed_here = planner.ledger.flight_of(crew).as_ref() == Some(flight);
    if !committed_here && !rule.is_rested(candidate, now) {
        debug!(crew_id = %crew, flight = %flight, "rejected: insufficient rest");
        return false;
    }
    if !planner.ledger.try_reserve(crew, flight) {
        debug!(crew_id = %crew, flight = %flight, "rejected: committed to another flight");
        return false;
    }
    true
}

fn ordered_candidates<'a>(
    roster: &'a CrewRegistry,
    role: &'a Role,
    order: CandidateOrder,
    now: DateTime<Utc>,
) -> Vec<&'a CrewMember> {
    let mut candidates: Vec<&CrewMember> = roster.with_role(role).collect();
    if order == CandidateOrder::MostRested {
        // tri stable : les égalités gardent l'ordre du roster
        candidates.sort_by_key(|m| {
            Reverse(rest::rest_elapsed(m, now).unwrap_or(Duration::MAX))
        });
    }
    candidates
}

use super::Planner;
use crate::model::{CrewId, FlightId};
use crate::registry::CrewRegistry;
use tracing::info;

pub(super) fn release(
    planner: &Planner<'_>,
    flight: &FlightId,
    roster: &CrewRegistry,
) -> Vec<CrewId> {
    let released: Vec<CrewId> = roster
        .iter()
        .filter(|m| planner.ledger.release_from(m.crew_id(), flight))
        .map(|m| m.crew_id().clone())
        .collect();

    if !released.is_empty() {
        info!(flight = %flight, released = released.len(), "crew released");
    }
    released
}

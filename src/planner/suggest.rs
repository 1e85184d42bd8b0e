use super::Planner;
use crate::model::CrewMember;
use crate::registry::CrewRegistry;

// Lecture détendue : un instantané du ledger suffit, rien n'est réservé ici.
pub(super) fn suggest(
    planner: &Planner<'_>,
    roster: &CrewRegistry,
    needed: usize,
    max_batches: usize,
) -> Vec<Vec<CrewMember>> {
    if needed == 0 {
        return Vec::new();
    }

    let committed = planner.ledger.snapshot();
    let free: Vec<CrewMember> = roster
        .iter()
        .filter(|m| !committed.contains_key(m.crew_id()))
        .cloned()
        .collect();

    free.chunks_exact(needed)
        .take(max_batches)
        .map(<[CrewMember]>::to_vec)
        .collect()
}

use crate::ledger::AssignmentLedger;
use crate::model::{CrewId, CrewMember, CrewRecordView, FlightId, Role};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("crew record #{0} has an empty crew_id")]
    EmptyCrewId(usize),
    #[error("duplicate crew_id: {0}")]
    DuplicateCrewId(String),
}

/// Conflit rencontré en reportant les affectations déclarées dans le ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConflict {
    pub crew_id: CrewId,
    pub declared: FlightId,
    pub committed: FlightId,
}

/// Roster chargé en mémoire, dans l'ordre de la source.
#[derive(Debug, Clone, Default)]
pub struct CrewRegistry {
    members: Vec<CrewMember>,
}

impl CrewRegistry {
    /// Valide l'unicité et la présence des identifiants.
    pub fn try_from_members(members: Vec<CrewMember>) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();
        for (idx, member) in members.iter().enumerate() {
            if member.crew_id().as_str().trim().is_empty() {
                return Err(RosterError::EmptyCrewId(idx));
            }
            if !seen.insert(member.crew_id().clone()) {
                return Err(RosterError::DuplicateCrewId(
                    member.crew_id().as_str().to_string(),
                ));
            }
        }
        Ok(Self { members })
    }

    /// Comme [`Self::try_from_members`] mais écarte les enregistrements fautifs.
    pub fn from_members_lenient(members: Vec<CrewMember>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(members.len());
        for (idx, member) in members.into_iter().enumerate() {
            if member.crew_id().as_str().trim().is_empty() {
                warn!(record = idx, "dropping crew record without crew_id");
                continue;
            }
            if !seen.insert(member.crew_id().clone()) {
                warn!(crew_id = %member.crew_id(), "dropping duplicate crew record");
                continue;
            }
            kept.push(member);
        }
        Self { members: kept }
    }

    pub fn members(&self) -> &[CrewMember] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrewMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, crew: &CrewId) -> Option<&CrewMember> {
        self.members.iter().find(|m| m.crew_id() == crew)
    }

    pub fn contains(&self, crew: &CrewId) -> bool {
        self.get(crew).is_some()
    }

    /// Candidats d'un rôle, dans l'ordre du roster.
    pub fn with_role<'a>(&'a self, role: &'a Role) -> impl Iterator<Item = &'a CrewMember> + 'a {
        self.members.iter().filter(move |m| m.role() == role)
    }

    /// Reporte les affectations déclarées par la source dans `ledger`. Les
    /// déclarations deviennent actives pour l'audit jusqu'à leur libération.
    pub fn seed_ledger(&self, ledger: &AssignmentLedger) -> Vec<SeedConflict> {
        let mut conflicts = Vec::new();
        for member in &self.members {
            let Some(declared) = member.declared_flight() else {
                continue;
            };
            if let Err(committed) = ledger.seed(member.crew_id(), declared) {
                warn!(
                    crew_id = %member.crew_id(),
                    declared = %declared,
                    committed = %committed,
                    "declared assignment conflicts with ledger"
                );
                conflicts.push(SeedConflict {
                    crew_id: member.crew_id().clone(),
                    declared: declared.clone(),
                    committed,
                });
            }
        }
        conflicts
    }

    /// Vue du roster avec `assigned_flight` lu dans le ledger.
    pub fn view(&self, ledger: &AssignmentLedger) -> Vec<CrewRecordView> {
        let snapshot = ledger.snapshot();
        self.members
            .iter()
            .map(|m| CrewRecordView {
                crew_id: m.crew_id().clone(),
                name: m.name().map(str::to_owned),
                role: m.role().clone(),
                last_rest_end: m.last_rest_end().map(str::to_owned),
                assigned_flight: snapshot.get(m.crew_id()).cloned(),
            })
            .collect()
    }
}

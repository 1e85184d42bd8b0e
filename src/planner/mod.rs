//! Planification des équipages : quotas par rôle, repos minimal, aucune
//! double réservation.
//!
//! Le [`Planner`] ne possède pas d'état : il emprunte un
//! [`AssignmentLedger`] injecté par l'appelant (un par journée opérationnelle,
//! un par test…).

mod assignment;
mod audit;
mod release;
mod suggest;
mod types;

pub use types::{AssignmentResult, AuditReport, RoleOutcome};

use crate::config::PlannerConfig;
use crate::ledger::AssignmentLedger;
use crate::model::{CrewId, CrewMember, FlightId};
use crate::registry::CrewRegistry;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    ledger: &'a AssignmentLedger,
}

impl<'a> Planner<'a> {
    pub fn new(ledger: &'a AssignmentLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &'a AssignmentLedger {
        self.ledger
    }

    /// Staffe `flight` à l'heure courante.
    pub fn assign(
        &self,
        flight: &FlightId,
        roster: &CrewRegistry,
        config: &PlannerConfig,
    ) -> AssignmentResult {
        self.assign_at(flight, roster, config, Utc::now())
    }

    /// Staffe `flight` en évaluant le repos par rapport à `now`.
    pub fn assign_at(
        &self,
        flight: &FlightId,
        roster: &CrewRegistry,
        config: &PlannerConfig,
        now: DateTime<Utc>,
    ) -> AssignmentResult {
        assignment::assign(self, flight, roster, config, now)
    }

    /// Libère tous les équipiers du roster engagés sur `flight` (annulation).
    pub fn release(&self, flight: &FlightId, roster: &CrewRegistry) -> Vec<CrewId> {
        release::release(self, flight, roster)
    }

    /// Lots d'équipiers libres proposés en réserve, sans rien réserver.
    pub fn suggest(
        &self,
        roster: &CrewRegistry,
        needed: usize,
        max_batches: usize,
    ) -> Vec<Vec<CrewMember>> {
        suggest::suggest(self, roster, needed, max_batches)
    }

    /// Vérifie la cohérence roster / ledger pour `flight`.
    pub fn validate(&self, flight: &FlightId, roster: &CrewRegistry) -> AuditReport {
        audit::validate(self, flight, roster)
    }
}

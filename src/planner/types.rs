use crate::model::{CrewId, CrewMember, CrewSummary, FlightId, Role};
use serde::Serialize;
use std::fmt;

/// Bilan d'un rôle pour un vol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOutcome {
    pub role: Role,
    pub required: u32,
    pub assigned: u32,
}

impl RoleOutcome {
    pub fn is_short(&self) -> bool {
        self.assigned < self.required
    }

    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.assigned)
    }
}

/// Résultat d'un appel de planification. L'affectation partielle est conservée.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResult {
    pub flight_id: FlightId,
    pub assigned: Vec<CrewMember>,
    pub roles: Vec<RoleOutcome>,
    pub shortage: bool,
}

impl AssignmentResult {
    pub fn assigned_ids(&self) -> Vec<&CrewId> {
        self.assigned.iter().map(CrewMember::crew_id).collect()
    }

    pub fn short_roles(&self) -> impl Iterator<Item = &RoleOutcome> {
        self.roles.iter().filter(|r| r.is_short())
    }
}

impl fmt::Display for AssignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.assigned.iter().map(|m| m.crew_id().as_str()).collect();
        write!(f, "{}: [{}]", self.flight_id, ids.join(", "))?;
        if self.shortage {
            let missing: Vec<String> = self
                .short_roles()
                .map(|r| format!("{} {}", r.missing(), r.role))
                .collect();
            write!(f, " SHORTAGE (missing {})", missing.join(", "))?;
        }
        Ok(())
    }
}

/// Rapport d'audit d'un vol. Les incohérences sont des données, jamais des erreurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub flight_id: FlightId,
    pub assigned_crew: Vec<CrewSummary>,
    pub double_booking_found: bool,
    pub issues: Vec<String>,
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.assigned_crew.iter().map(|c| c.crew_id.as_str()).collect();
        write!(f, "{}: {} crew [{}]", self.flight_id, ids.len(), ids.join(", "))?;
        if self.issues.is_empty() {
            write!(f, ", no issues")
        } else {
            for issue in &self.issues {
                write!(f, "\n- {issue}")?;
            }
            Ok(())
        }
    }
}

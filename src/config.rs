use crate::model::Role;
use crate::rest::{RestRule, UnknownRestPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("role '{0}' has more than one quota")]
    DuplicateRole(String),
    #[error("quota #{0} has an empty role name")]
    EmptyRole(usize),
}

/// Ordre dans lequel les candidats d'un rôle sont examinés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrder {
    /// First-fit dans l'ordre de la source roster.
    #[default]
    Roster,
    /// Repos écoulé le plus long d'abord ; repos inconnu en tête, égalités dans
    /// l'ordre du roster.
    MostRested,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQuota {
    pub role: Role,
    pub required: u32,
}

impl RoleQuota {
    pub fn new(role: Role, required: u32) -> Self {
        Self { role, required }
    }
}

/// Options de planification. Les clés inconnues du fichier de configuration
/// (seuils météo, vibrations moteur…) sont ignorées.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub required_pilots: u32,
    pub required_cabin_crew: u32,
    pub crew_rest_hours: u32,
    pub additional_roles: Vec<RoleQuota>,
    pub candidate_order: CandidateOrder,
    pub unknown_rest: UnknownRestPolicy,
    pub max_alternate_batches: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            required_pilots: 2,
            required_cabin_crew: 1,
            crew_rest_hours: 12,
            additional_roles: Vec::new(),
            candidate_order: CandidateOrder::Roster,
            unknown_rest: UnknownRestPolicy::Permit,
            max_alternate_batches: 2,
        }
    }
}

impl PlannerConfig {
    /// Quotas dans l'ordre d'évaluation : pilotes, cabine, puis rôles additionnels.
    pub fn quotas(&self) -> Vec<RoleQuota> {
        let mut out = vec![
            RoleQuota::new(Role::Pilot, self.required_pilots),
            RoleQuota::new(Role::Cabin, self.required_cabin_crew),
        ];
        out.extend(self.additional_roles.iter().cloned());
        out
    }

    pub fn rest_rule(&self) -> RestRule {
        RestRule::new(self.crew_rest_hours).with_unknown_rest(self.unknown_rest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (idx, quota) in self.quotas().iter().enumerate() {
            if quota.role.as_str().is_empty() {
                return Err(ConfigError::EmptyRole(idx));
            }
            if !seen.insert(quota.role.clone()) {
                return Err(ConfigError::DuplicateRole(quota.role.to_string()));
            }
        }
        Ok(())
    }
}

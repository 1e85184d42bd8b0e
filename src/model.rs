use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifiant fort pour un membre d'équipage
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrewId(String);

impl CrewId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CrewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant de vol. Le sous-système ne modélise rien d'autre du vol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(String);

impl FlightId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rôle à bord. Comparaison insensible à la casse : `"PILOT"` et `"pilot"`
/// désignent le même rôle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Pilot,
    Cabin,
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "pilot" => Role::Pilot,
            "cabin" => Role::Cabin,
            _ => Role::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Pilot => "pilot",
            Role::Cabin => "cabin",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membre d'équipage tel que fourni par la source roster.
///
/// `assigned_flight` est la déclaration de la source, en lecture seule : l'état
/// d'affectation faisant foi vit dans [`crate::ledger::AssignmentLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    crew_id: CrewId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default = "unknown_role")]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_rest_end: Option<String>,
    #[serde(default, rename = "assigned_flight", skip_serializing_if = "Option::is_none")]
    declared_flight: Option<FlightId>,
}

fn unknown_role() -> Role {
    Role::Other(String::new())
}

impl CrewMember {
    pub fn new<S: AsRef<str>>(crew_id: S, role: Role) -> Self {
        Self {
            crew_id: CrewId::new(crew_id),
            name: None,
            role,
            last_rest_end: None,
            declared_flight: None,
        }
    }

    pub fn with_name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fin du dernier repos, brute (ISO-8601 attendu, non validé ici).
    pub fn with_rest_end<R: Into<String>>(mut self, raw: R) -> Self {
        self.last_rest_end = Some(raw.into());
        self
    }

    /// Affectation déclarée par la source roster.
    pub fn declaring(mut self, flight: FlightId) -> Self {
        self.declared_flight = Some(flight);
        self
    }

    pub fn crew_id(&self) -> &CrewId {
        &self.crew_id
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn role(&self) -> &Role {
        &self.role
    }
    pub fn last_rest_end(&self) -> Option<&str> {
        self.last_rest_end.as_deref()
    }
    pub fn declared_flight(&self) -> Option<&FlightId> {
        self.declared_flight.as_ref()
    }

    pub fn summary(&self) -> CrewSummary {
        CrewSummary {
            crew_id: self.crew_id.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// Résumé d'un membre pour les rapports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewSummary {
    pub crew_id: CrewId,
    pub name: Option<String>,
    pub role: Role,
}

/// Vue d'un enregistrement roster dont l'affectation est calculée depuis le
/// ledger au moment de la lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRecordView {
    pub crew_id: CrewId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_rest_end: Option<String>,
    pub assigned_flight: Option<FlightId>,
}

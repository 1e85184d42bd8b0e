#![forbid(unsafe_code)]
//! Crewroster — affectation d'équipages aux vols.
//!
//! - Quotas par rôle (pilotes, cabine, rôles additionnels), first-fit.
//! - Repos minimal depuis la fin du dernier repos (UTC).
//! - Ledger injectable et verrouillé : aucun équipier sur deux vols à la fois.
//! - Pénurie signalée, lots de réserve proposés, audit de cohérence.

pub mod config;
pub mod io;
pub mod ledger;
pub mod model;
pub mod planner;
pub mod registry;
pub mod rest;
pub mod storage;

pub use config::{CandidateOrder, ConfigError, PlannerConfig, RoleQuota};
pub use ledger::{AssignmentLedger, CrewSchedule, LedgerView};
pub use model::{CrewId, CrewMember, CrewRecordView, CrewSummary, FlightId, Role};
pub use planner::{AssignmentResult, AuditReport, Planner, RoleOutcome};
pub use registry::{CrewRegistry, RosterError, SeedConflict};
pub use rest::{RestRule, UnknownRestPolicy};
pub use storage::{JsonLedgerStorage, LedgerSnapshot, LedgerStorage};

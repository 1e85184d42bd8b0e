use crate::ledger::AssignmentLedger;
use crate::model::{CrewId, FlightId};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// État persisté du ledger pour une journée opérationnelle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub day: NaiveDate,
    #[serde(default)]
    pub assignments: BTreeMap<CrewId, FlightId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub claims: BTreeMap<CrewId, FlightId>,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &AssignmentLedger, day: NaiveDate) -> Self {
        let view = ledger.view();
        Self {
            day,
            assignments: view.assignments,
            claims: view.claims,
        }
    }

    /// Sauvegardé un autre jour que `today` : à remettre à zéro.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.day != today
    }

    pub fn into_ledger(self) -> AssignmentLedger {
        AssignmentLedger::from_snapshot(self.assignments, self.claims)
    }
}

pub trait LedgerStorage {
    /// Charge l'instantané ; `None` si rien n'a encore été persisté.
    fn load(&self) -> anyhow::Result<Option<LedgerSnapshot>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, snapshot: &LedgerSnapshot) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    path: PathBuf,
}

impl JsonLedgerStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn load(&self) -> anyhow::Result<Option<LedgerSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot: LedgerSnapshot = serde_json::from_slice(&data)
            .with_context(|| format!("parsing ledger {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

//! Ledger d'affectation : seule source de vérité « équipier → vol ».
//!
//! Toute écriture passe par un verrou exclusif ; `try_reserve` est un
//! check-and-set atomique. Un équipier figure au plus une fois dans la table.
//!
//! Le ledger garde aussi, sous le même verrou, les affectations déclarées par
//! la source roster au moment du chargement (`claims`). Une libération efface
//! l'entrée et la déclaration ensemble ; l'audit ne compare que les
//! déclarations encore actives.

use crate::model::{CrewId, FlightId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Planning d'un équipier, calculé depuis le ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewSchedule {
    pub crew_id: CrewId,
    pub assigned_flight: Option<FlightId>,
    pub is_available: bool,
}

/// Copie cohérente des engagements et des déclarations actives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerView {
    pub assignments: BTreeMap<CrewId, FlightId>,
    pub claims: BTreeMap<CrewId, FlightId>,
}

#[derive(Debug, Default)]
struct Book {
    entries: HashMap<CrewId, FlightId>,
    claims: HashMap<CrewId, FlightId>,
}

impl Book {
    fn is_free(&self, crew: &CrewId, flight: &FlightId) -> bool {
        self.entries.get(crew).map_or(true, |current| current == flight)
    }

    fn remove(&mut self, crew: &CrewId) -> Option<FlightId> {
        self.claims.remove(crew);
        self.entries.remove(crew)
    }
}

#[derive(Debug, Default)]
pub struct AssignmentLedger {
    book: Mutex<Book>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruit un ledger depuis un instantané persisté.
    pub fn from_snapshot(
        assignments: BTreeMap<CrewId, FlightId>,
        claims: BTreeMap<CrewId, FlightId>,
    ) -> Self {
        Self {
            book: Mutex::new(Book {
                entries: assignments.into_iter().collect(),
                claims: claims.into_iter().collect(),
            }),
        }
    }

    // Aucune opération ne laisse la table à moitié écrite : on récupère
    // simplement le garde après un panic d'un autre thread.
    fn lock(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Libre si aucune entrée, ou déjà engagé sur ce même vol.
    pub fn is_free(&self, crew: &CrewId, flight: &FlightId) -> bool {
        self.lock().is_free(crew, flight)
    }

    /// Réserve `crew` pour `flight` si possible. Retourne `false` si l'équipier
    /// est engagé sur un autre vol.
    pub fn try_reserve(&self, crew: &CrewId, flight: &FlightId) -> bool {
        let mut book = self.lock();
        if !book.is_free(crew, flight) {
            return false;
        }
        book.entries.insert(crew.clone(), flight.clone());
        true
    }

    /// Enregistre l'affectation déclarée par la source roster et tente de la
    /// réserver. En cas de conflit, la déclaration est conservée pour l'audit
    /// et le vol déjà engagé est retourné.
    pub fn seed(&self, crew: &CrewId, declared: &FlightId) -> Result<(), FlightId> {
        let mut book = self.lock();
        book.claims.insert(crew.clone(), declared.clone());
        match book.entries.get(crew) {
            Some(committed) if committed != declared => Err(committed.clone()),
            _ => {
                book.entries.insert(crew.clone(), declared.clone());
                Ok(())
            }
        }
    }

    /// Supprime l'entrée et la déclaration sans condition. Retourne le vol
    /// libéré s'il y en avait un.
    pub fn release(&self, crew: &CrewId) -> Option<FlightId> {
        self.lock().remove(crew)
    }

    /// Supprime l'entrée (et la déclaration) seulement si elle pointe sur `flight`.
    pub fn release_from(&self, crew: &CrewId, flight: &FlightId) -> bool {
        let mut book = self.lock();
        if book.entries.get(crew) == Some(flight) {
            book.remove(crew);
            true
        } else {
            false
        }
    }

    /// Remise à zéro quotidienne.
    pub fn clear_all(&self) {
        let mut book = self.lock();
        book.entries.clear();
        book.claims.clear();
    }

    pub fn flight_of(&self, crew: &CrewId) -> Option<FlightId> {
        self.lock().entries.get(crew).cloned()
    }

    /// Déclaration roster encore active pour `crew`.
    pub fn claim_of(&self, crew: &CrewId) -> Option<FlightId> {
        self.lock().claims.get(crew).cloned()
    }

    pub fn schedule(&self, crew: &CrewId) -> CrewSchedule {
        let assigned_flight = self.flight_of(crew);
        CrewSchedule {
            crew_id: crew.clone(),
            is_available: assigned_flight.is_none(),
            assigned_flight,
        }
    }

    /// Équipiers engagés sur `flight`, triés par identifiant.
    pub fn crew_on(&self, flight: &FlightId) -> Vec<CrewId> {
        let mut out: Vec<CrewId> = self
            .lock()
            .entries
            .iter()
            .filter(|(_, f)| *f == flight)
            .map(|(c, _)| c.clone())
            .collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Copie triée des engagements, pour lecture détendue.
    pub fn snapshot(&self) -> BTreeMap<CrewId, FlightId> {
        sorted(&self.lock().entries)
    }

    /// Engagements et déclarations lus sous un même verrou.
    pub fn view(&self) -> LedgerView {
        let book = self.lock();
        LedgerView {
            assignments: sorted(&book.entries),
            claims: sorted(&book.claims),
        }
    }
}

fn sorted(map: &HashMap<CrewId, FlightId>) -> BTreeMap<CrewId, FlightId> {
    map.iter().map(|(c, f)| (c.clone(), f.clone())).collect()
}

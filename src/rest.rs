//! Règle de repos minimal.
//!
//! Fonction pure : aucun état partagé, appelable en parallèle.

use crate::model::CrewMember;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Politique appliquée quand `last_rest_end` est absent ou illisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRestPolicy {
    /// Considéré comme reposé au maximum (comportement historique).
    #[default]
    Permit,
    /// Écarté tant que le repos n'est pas documenté.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestRule {
    pub minimum_rest_hours: u32,
    pub unknown_rest: UnknownRestPolicy,
}

impl RestRule {
    pub fn new(minimum_rest_hours: u32) -> Self {
        Self {
            minimum_rest_hours,
            unknown_rest: UnknownRestPolicy::Permit,
        }
    }

    pub fn with_unknown_rest(mut self, policy: UnknownRestPolicy) -> Self {
        self.unknown_rest = policy;
        self
    }

    /// Éligible ssi `now - last_rest_end >= minimum_rest_hours`.
    pub fn is_rested(&self, member: &CrewMember, now: DateTime<Utc>) -> bool {
        match rest_elapsed(member, now) {
            Some(elapsed) => elapsed >= Duration::hours(i64::from(self.minimum_rest_hours)),
            None => self.unknown_rest == UnknownRestPolicy::Permit,
        }
    }
}

/// Temps écoulé depuis la fin du dernier repos, `None` si inconnu.
pub fn rest_elapsed(member: &CrewMember, now: DateTime<Utc>) -> Option<Duration> {
    member
        .last_rest_end()
        .and_then(parse_rest_end)
        .map(|end| now - end)
}

const OFFSET_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse un horodatage ISO-8601 : secondes, minutes ou fuseau optionnels,
/// décalage compact (`+0200`) ou étendu (`+02:00`), séparateur `T` ou espace.
/// Sans fuseau, l'heure est lue en UTC ; une date seule vaut minuit.
pub fn parse_rest_end(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let normalized = normalize(raw);
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// `Z` devient `+00:00` et une heure seule (`T10`) reçoit ses minutes, chrono
// exigeant les minutes dès qu'une heure est présente.
fn normalize(raw: &str) -> String {
    let mut out = match raw.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_owned(),
    };
    if let Some(time) = out.get(11..) {
        let hour_len = time.find(['+', '-']).unwrap_or(time.len());
        if hour_len == 2 {
            out.insert_str(13, ":00");
        }
    }
    out
}

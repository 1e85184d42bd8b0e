use crate::config::PlannerConfig;
use crate::ledger::AssignmentLedger;
use crate::model::{CrewMember, FlightId, Role};
use crate::planner::AssignmentResult;
use crate::registry::CrewRegistry;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Charge un roster : CSV si l'extension est `.csv`, JSON (tableau) sinon.
///
/// Les identifiants vides ou dupliqués sont une erreur.
pub fn load_roster<P: AsRef<Path>>(path: P) -> anyhow::Result<CrewRegistry> {
    let path = path.as_ref();
    let members = if is_csv(path) {
        import_crew_csv(path)?
    } else {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice::<Vec<CrewMember>>(&data)
            .with_context(|| format!("parsing roster {}", path.display()))?
    };
    CrewRegistry::try_from_members(members)
        .with_context(|| format!("validating roster {}", path.display()))
}

/// Source absente ou illisible : roster vide, la planification signalera une
/// pénurie complète.
pub fn load_roster_or_empty<P: AsRef<Path>>(path: P) -> CrewRegistry {
    let path = path.as_ref();
    match load_roster(path) {
        Ok(registry) => registry,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "roster unavailable, using an empty roster"
            );
            CrewRegistry::default()
        }
    }
}

/// Import CSV: header `crew_id,role[,last_rest_end][,assigned_flight][,name]`
pub fn import_crew_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CrewMember>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let crew_id = rec.get(0).context("missing crew_id")?.trim();
        let role = rec.get(1).context("missing role")?.trim();
        if crew_id.is_empty() {
            bail!("invalid crew row (empty crew_id)");
        }
        let mut member = CrewMember::new(crew_id, Role::parse(role));
        if let Some(rest) = non_empty(rec.get(2)) {
            member = member.with_rest_end(rest);
        }
        if let Some(flight) = non_empty(rec.get(3)) {
            member = member.declaring(FlightId::new(flight));
        }
        if let Some(name) = non_empty(rec.get(4)) {
            member = member.with_name(name);
        }
        out.push(member);
    }
    Ok(out)
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Chargement strict de la configuration JSON.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<PlannerConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let config: PlannerConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Configuration absente ou invalide : valeurs par défaut.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> PlannerConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "config unavailable, using defaults"
            );
            PlannerConfig::default()
        }
    }
}

/// Export JSON du roster, `assigned_flight` lu dans le ledger.
pub fn export_roster_json<P: AsRef<Path>>(
    path: P,
    roster: &CrewRegistry,
    ledger: &AssignmentLedger,
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&roster.view(ledger))?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations: header `flight_id,crew_id,role,shortage`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    results: &[AssignmentResult],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["flight_id", "crew_id", "role", "shortage"])?;
    for result in results {
        let shortage = if result.shortage { "true" } else { "false" };
        if result.assigned.is_empty() {
            w.write_record([result.flight_id.as_str(), "", "", shortage])?;
        }
        for member in &result.assigned {
            w.write_record([
                result.flight_id.as_str(),
                member.crew_id().as_str(),
                member.role().as_str(),
                shortage,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

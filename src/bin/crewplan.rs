#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::Utc;
use crewroster::{
    io,
    ledger::AssignmentLedger,
    model::{CrewId, FlightId},
    planner::Planner,
    registry::CrewRegistry,
    storage::{JsonLedgerStorage, LedgerSnapshot, LedgerStorage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Affectation d'équipages aux vols (ledger persisté en JSON)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Roster équipage (JSON ou CSV)
    #[arg(long, global = true, default_value = "crew.json")]
    roster: String,

    /// Configuration JSON (défauts si absente)
    #[arg(long, global = true, default_value = "airline_config.json")]
    config: String,

    /// Fichier JSON du ledger
    #[arg(long, global = true, default_value = "ledger.json")]
    ledger: String,

    /// Ledger d'un autre jour : repart des affectations déclarées par le roster
    #[arg(long, global = true)]
    daily_reset: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Staffer un ou plusieurs vols
    Assign {
        #[arg(long = "flight", required = true)]
        flights: Vec<String>,
        /// Taille des lots de réserve proposés en cas de pénurie
        #[arg(long)]
        suggest: Option<usize>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Libérer l'équipage d'un vol annulé
    Release {
        #[arg(long)]
        flight: String,
    },

    /// Vérifier la cohérence roster / ledger d'un vol
    Audit {
        #[arg(long)]
        flight: String,
        /// Rapport JSON au lieu du texte
        #[arg(long)]
        json: bool,
    },

    /// Proposer des lots d'équipiers libres
    Suggest {
        #[arg(long, default_value_t = 3)]
        needed: usize,
    },

    /// Afficher l'affectation d'un équipier
    Schedule {
        #[arg(long)]
        crew: String,
    },

    /// Remise à zéro de toutes les affectations
    Reset,

    /// Exporter le roster avec les affectations courantes
    Export {
        #[arg(long)]
        out_json: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let roster = io::load_roster_or_empty(&cli.roster);
    let config = io::load_config_or_default(&cli.config);
    let storage = JsonLedgerStorage::open(&cli.ledger);
    let today = Utc::now().date_naive();

    let ledger = match storage.load()? {
        Some(snapshot) if cli.daily_reset && snapshot.is_stale(today) => {
            tracing::info!(day = %snapshot.day, "stale ledger, starting a new day");
            seeded_ledger(&roster)
        }
        Some(snapshot) => snapshot.into_ledger(),
        None => seeded_ledger(&roster),
    };
    let planner = Planner::new(&ledger);

    let code = match cli.cmd {
        Commands::Assign {
            flights,
            suggest,
            out_csv,
        } => {
            let mut results = Vec::new();
            for flight in flights {
                let result = planner.assign(&FlightId::new(flight), &roster, &config);
                println!("{result}");
                if result.shortage {
                    if let Some(needed) = suggest {
                        for (idx, batch) in planner
                            .suggest(&roster, needed, config.max_alternate_batches)
                            .iter()
                            .enumerate()
                        {
                            let ids: Vec<&str> =
                                batch.iter().map(|m| m.crew_id().as_str()).collect();
                            println!("  standby #{}: {}", idx + 1, ids.join(", "));
                        }
                    }
                }
                results.push(result);
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &results)?;
            }
            storage.save(&LedgerSnapshot::capture(&ledger, today))?;
            // Code 2 = WARNING/INCOMPLETE
            if results.iter().any(|r| r.shortage) {
                2
            } else {
                0
            }
        }
        Commands::Release { flight } => {
            let released = planner.release(&FlightId::new(&flight), &roster);
            println!("{flight}: released {} crew", released.len());
            storage.save(&LedgerSnapshot::capture(&ledger, today))?;
            0
        }
        Commands::Audit { flight, json } => {
            let report = planner.validate(&FlightId::new(flight), &roster);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
            if report.double_booking_found {
                2
            } else {
                0
            }
        }
        Commands::Suggest { needed } => {
            let batches = planner.suggest(&roster, needed, config.max_alternate_batches);
            if batches.is_empty() {
                println!("no standby batch of {needed} available");
            }
            for (idx, batch) in batches.iter().enumerate() {
                let ids: Vec<&str> = batch.iter().map(|m| m.crew_id().as_str()).collect();
                println!("standby #{}: {}", idx + 1, ids.join(", "));
            }
            0
        }
        Commands::Schedule { crew } => {
            let schedule = ledger.schedule(&CrewId::new(crew));
            println!("{}", serde_json::to_string_pretty(&schedule)?);
            0
        }
        Commands::Reset => {
            ledger.clear_all();
            storage.save(&LedgerSnapshot::capture(&ledger, today))?;
            println!("OK: all assignments cleared");
            0
        }
        Commands::Export { out_json } => {
            io::export_roster_json(out_json, &roster, &ledger)?;
            0
        }
    };

    std::process::exit(code);
}

/// Nouvelle journée : le ledger repart des affectations déclarées par le roster.
fn seeded_ledger(roster: &CrewRegistry) -> AssignmentLedger {
    let ledger = AssignmentLedger::new();
    roster.seed_ledger(&ledger);
    ledger
}

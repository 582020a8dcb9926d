//! Headless Bay Simulation
//!
//! Deploys a carrier, then runs seeded rounds of fighter launches,
//! recoveries and door damage, printing bay state as it goes.

use ahash::AHashMap;
use carrier_bays::bay::{Bay, BayKind, CouplingKind, CraftBayClass, Transporter, UnitBayClass};
use carrier_bays::carrier::{Carrier, CarrierSpec};
use carrier_bays::core::error::{BayError, Result};
use carrier_bays::core::types::{BayId, UnitId};
use carrier_bays::core::{set_rules, BayRules};
use carrier_bays::unit::{UnitKind, UnitProfile};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;

/// Headless Bay Simulation - launch/recovery cycles under fire
#[derive(Parser, Debug)]
#[command(name = "bay_sim")]
#[command(about = "Run a seeded launch/recovery scenario against a carrier's bays")]
struct Args {
    /// Carrier layout TOML (name + bay records); built-in layout if omitted
    #[arg(long)]
    carrier: Option<PathBuf>,

    /// Bay rules TOML
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Rounds to simulate
    #[arg(long, default_value_t = 12)]
    rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Chance per round that a bay door is hit
    #[arg(long, default_value_t = 0.15)]
    damage_chance: f64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Per-bay state at the end of the run
#[derive(Serialize)]
struct BaySnapshot {
    record: String,
    summary: String,
    unused: f64,
    loaded: usize,
    doors: u32,
    open_recovery_slots: u32,
}

/// JSON output structure
#[derive(Serialize)]
struct SimReport {
    carrier: String,
    seed: u64,
    rounds: u32,
    deployed: usize,
    launched: u32,
    recovered: u32,
    failed_recoveries: u32,
    doors_hit: u32,
    still_airborne: usize,
    bays: Vec<BaySnapshot>,
}

const DEFAULT_CARRIER: &str = r#"
name = "Leopard-class DropShip"
bays = [
    "asfbay:2.0:1:1",
    "smallcraftbay:2.0:1:2",
    "mekbay:4.0:2:3",
    "infantrybay:2.0:1:4:foot",
    "cargobay:5.0:1:5",
]
"#;

/// Most units deployed into a single bay
const MAX_DEPLOY_PER_BAY: usize = 500;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "carrier_bays=debug,bay_sim=debug"
        } else {
            "carrier_bays=info,bay_sim=info"
        })
        .init();

    if let Some(path) = &args.rules {
        let rules = BayRules::load(path)?;
        if set_rules(rules).is_err() {
            tracing::warn!("Bay rules already set, ignoring {:?}", path);
        }
    }

    let spec = match &args.carrier {
        Some(path) => CarrierSpec::load(path)?,
        None => CarrierSpec::from_toml_str(DEFAULT_CARRIER)?,
    };
    let mut carrier = Carrier::from_spec(&spec)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Simulating {} for {} rounds (seed {})", carrier.name, args.rounds, seed);

    let roster = deploy(&mut carrier);
    let deployed = roster.len();
    if args.format != "json" {
        println!("{}", carrier.summary());
    }

    let mut airborne: Vec<UnitId> = Vec::new();
    let mut launched = 0;
    let mut recovered = 0;
    let mut failed_recoveries = 0;
    let mut doors_hit = 0;

    for _ in 0..args.rounds {
        // Launch roughly half of what is aboard each launch bay
        let launch_bays: Vec<BayId> = carrier
            .bays()
            .iter()
            .filter(|b| matches!(b.kind(), BayKind::LaunchRecovery(_)))
            .map(|b| b.id())
            .collect();
        for bay_id in launch_bays {
            let aboard = carrier.bay(bay_id).map(|b| b.loaded_units()).unwrap_or_default();
            for unit in aboard {
                if !rng.gen_bool(0.5) {
                    continue;
                }
                match carrier.launch(unit) {
                    Ok(_) => {
                        launched += 1;
                        airborne.push(unit);
                    }
                    Err(BayError::LaunchLimitReached { .. }) => break,
                    Err(e) => tracing::debug!("Launch of {} failed: {}", unit, e),
                }
            }
        }

        // Some of the airborne craft try to come home
        let mut still_out = Vec::new();
        for unit in airborne.drain(..) {
            if !rng.gen_bool(0.4) {
                still_out.push(unit);
                continue;
            }
            let Some(profile) = roster.get(&unit) else {
                continue;
            };
            match carrier.recover(profile) {
                Ok(bay) => {
                    recovered += 1;
                    tracing::debug!("Recovered {} into bay {}", unit, bay);
                }
                Err(e) => {
                    failed_recoveries += 1;
                    tracing::debug!("Recovery of {} failed: {}", unit, e);
                    still_out.push(unit);
                }
            }
        }
        airborne = still_out;

        if !carrier.bays().is_empty() && rng.gen_bool(args.damage_chance.clamp(0.0, 1.0)) {
            let index = rng.gen_range(0..carrier.bays().len());
            let bay_id = carrier.bays()[index].id();
            doors_hit += 1;
            if rng.gen_bool(0.5) {
                carrier.destroy_door(bay_id)?;
            } else {
                carrier.destroy_door_next(bay_id)?;
            }
        }

        carrier.end_round();
        if args.format != "json" {
            println!("\n{}", carrier.summary());
        }
    }

    let report = SimReport {
        carrier: carrier.name.clone(),
        seed,
        rounds: args.rounds,
        deployed,
        launched,
        recovered,
        failed_recoveries,
        doors_hit,
        still_airborne: airborne.len(),
        bays: carrier.bays().iter().map(snapshot).collect(),
    };

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| BayError::Config(format!("Failed to encode report: {}", e)))?;
        println!("{}", json);
    } else {
        println!(
            "\nLaunched {}, recovered {}, failed recoveries {}, doors hit {}, still airborne {}",
            report.launched,
            report.recovered,
            report.failed_recoveries,
            report.doors_hit,
            report.still_airborne
        );
    }

    Ok(())
}

/// Fill every bay with units it accepts
fn deploy(carrier: &mut Carrier) -> AHashMap<UnitId, UnitProfile> {
    let mut roster = AHashMap::new();
    let bays: Vec<(BayId, BayKind)> = carrier.bays().iter().map(|b| (b.id(), b.kind())).collect();

    for (bay_id, kind) in bays {
        for _ in 0..MAX_DEPLOY_PER_BAY {
            let unit = unit_for(kind);
            if carrier.load_into(bay_id, &unit).is_err() {
                break;
            }
            roster.insert(unit.id, unit);
        }
    }

    tracing::info!("Deployed {} units", roster.len());
    roster
}

/// A typical unit for each kind of bay
fn unit_for(kind: BayKind) -> UnitProfile {
    match kind {
        BayKind::LaunchRecovery(CraftBayClass::Fighter) => UnitProfile::fighter(45.0),
        BayKind::LaunchRecovery(CraftBayClass::SmallCraft) => UnitProfile::small_craft(100.0),
        BayKind::UnitCount(UnitBayClass::Mek) => UnitProfile::mek(55.0),
        BayKind::UnitCount(UnitBayClass::ProtoMek) => UnitProfile::new(UnitKind::ProtoMek, 5.0),
        BayKind::UnitCount(UnitBayClass::LightVehicle) => UnitProfile::vehicle(40.0),
        BayKind::UnitCount(UnitBayClass::HeavyVehicle) => UnitProfile::vehicle(80.0),
        BayKind::UnitCount(UnitBayClass::SuperHeavyVehicle) => UnitProfile::vehicle(150.0),
        BayKind::Infantry(platoon) => UnitProfile::platoon(platoon),
        BayKind::Cargo => UnitProfile::cargo(1.0),
        BayKind::Coupling(CouplingKind::DockingCollar) => UnitProfile::dropship(3000.0),
        BayKind::Coupling(CouplingKind::TrailerHitch) => UnitProfile::trailer(20.0),
    }
}

fn snapshot(bay: &Bay) -> BaySnapshot {
    BaySnapshot {
        record: bay.to_record(),
        summary: bay.to_string(),
        unused: bay.unused(),
        loaded: bay.loaded_count(),
        doors: bay.doors_available(),
        open_recovery_slots: bay.available_recovery_slots(),
    }
}

mod lotfile;
mod registry;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lotnav::assign::{best_space_id, handle_checkin_with, CheckinOutcome, Prompt};
use lotnav::lot::{Lot, Space, SpaceKind};
use lotnav::route::{superpath_to_space_with, Superpath};
use lotnav::synth::{comb_lot, CombCfg};
use lotnav::NavCfg;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::lotfile::{load_lot, save_lot, LocFile};
use crate::registry::Registry;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Multi-level parking lot navigation and space allocation")]
struct Cmd {
    /// Half-width of the no-build corridor around each path
    #[arg(long, default_value_t = NavCfg::default().path_clearance)]
    clearance: f64,
    /// Half-width of the corridor a space must touch to be reachable
    #[arg(long, default_value_t = NavCfg::default().path_accessibility)]
    accessibility: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Check a lot file against every layout rule
    Validate {
        #[arg(long)]
        lot: PathBuf,
    },
    /// Print a human-readable dump of a lot
    Show {
        #[arg(long)]
        lot: PathBuf,
    },
    /// Route from the entrance to a named space, as JSON
    Route {
        #[arg(long)]
        lot: PathBuf,
        #[arg(long)]
        space: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report the best free space for a kind without occupying it
    Assign {
        #[arg(long)]
        lot: PathBuf,
        #[arg(long)]
        kind: SpaceKind,
    },
    /// Interactive check-in/out: one plate per stdin line
    Session {
        #[arg(long)]
        lot: PathBuf,
        #[arg(long)]
        vehicles: PathBuf,
        /// Write the final occupancy back to the lot file
        #[arg(long)]
        save: bool,
    },
    /// Write a synthetic comb-shaped lot
    Demo {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = CombCfg::default().levels)]
        levels: i32,
        #[arg(long, default_value_t = CombCfg::default().aisles)]
        aisles: usize,
        #[arg(long, default_value_t = 0.0)]
        occupancy: f64,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = NavCfg {
        path_clearance: cmd.clearance,
        path_accessibility: cmd.accessibility,
        ..NavCfg::default()
    };
    match cmd.action {
        Action::Validate { lot } => validate(&lot, &cfg),
        Action::Show { lot } => show(&lot, &cfg),
        Action::Route { lot, space, out } => route(&lot, &space, out.as_deref(), &cfg),
        Action::Assign { lot, kind } => assign(&lot, kind, &cfg),
        Action::Session {
            lot,
            vehicles,
            save,
        } => session(&lot, &vehicles, save, &cfg, io::stdin().lock(), &mut io::stdout()),
        Action::Demo {
            seed,
            levels,
            aisles,
            occupancy,
            out,
        } => {
            let comb = CombCfg {
                levels,
                aisles,
                occupancy,
                ..CombCfg::default()
            };
            demo(&comb, seed, &out)
        }
    }
}

fn validate(path: &Path, cfg: &NavCfg) -> Result<()> {
    let lot = load_lot(path, cfg)?;
    println!(
        "ok: {} levels, {} paths, {} spaces ({} occupied)",
        lot.level_count,
        lot.paths.len(),
        lot.spaces.len(),
        lot.occupied_count()
    );
    Ok(())
}

fn show(path: &Path, cfg: &NavCfg) -> Result<()> {
    let lot = load_lot(path, cfg)?;
    print!("{lot}");
    Ok(())
}

fn route_json(space: &Space, route: &Superpath) -> serde_json::Value {
    let segments: Vec<_> = route
        .iter()
        .map(|p| {
            serde_json::json!({
                "start": LocFile::from(p.start),
                "end": LocFile::from(p.endpoint()),
                "length": p.length(),
            })
        })
        .collect();
    serde_json::json!({
        "space": space.name,
        "kind": space.kind.label(),
        "length": route.length(),
        "segments": segments,
    })
}

fn route(path: &Path, name: &str, out: Option<&Path>, cfg: &NavCfg) -> Result<()> {
    let lot = load_lot(path, cfg)?;
    let id = lot
        .space_by_name(name)
        .ok_or_else(|| anyhow!("no space named `{name}`"))?;
    let space = lot.space(id);
    let route = superpath_to_space_with(&lot, space, cfg)
        .ok_or_else(|| anyhow!("space `{name}` is unreachable from the entrance"))?;
    tracing::info!(space = name, segments = route.len(), length = route.length(), "route");
    let doc = serde_json::to_string_pretty(&route_json(space, &route))?;
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(out, doc).with_context(|| format!("writing {}", out.display()))?;
        }
        None => println!("{doc}"),
    }
    Ok(())
}

fn assign(path: &Path, kind: SpaceKind, cfg: &NavCfg) -> Result<()> {
    let lot = load_lot(path, cfg)?;
    match best_space_id(&lot, kind, cfg) {
        Some(id) => {
            let space = lot.space(id);
            let length = superpath_to_space_with(&lot, space, cfg).map_or(0.0, |r| r.length());
            println!("{} ({}) at {}, route length {length:.2}", space.name, space.kind, space.location);
        }
        None => println!("no free {kind} space"),
    }
    Ok(())
}

/// Writes `prompt`, then reads one answer line; end of input counts as no.
fn ask<I, W>(lines: &mut I, out: &mut W, prompt: Prompt) -> io::Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    write!(out, "{prompt} (y/n) ")?;
    out.flush()?;
    match lines.next() {
        Some(answer) => Ok(is_yes(&answer?)),
        None => Ok(false),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_route<W: Write>(out: &mut W, lot: &Lot, space: &Space, cfg: &NavCfg) -> io::Result<()> {
    let Some(route) = superpath_to_space_with(lot, space, cfg) else {
        return writeln!(out, "  (no route to {})", space.name);
    };
    for (i, seg) in route.iter().enumerate() {
        writeln!(out, "  {:>2}. {} -> {}", i + 1, seg.start, seg.endpoint())?;
    }
    writeln!(out, "  total {:.2}", route.length())
}

/// One plate per input line; y/n answers to check-in questions are read from the same input.
fn session<R, W>(
    path: &Path,
    vehicles: &Path,
    save: bool,
    cfg: &NavCfg,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lot = load_lot(path, cfg)?;
    let registry = Registry::load(vehicles)?;
    writeln!(out, "{} vehicles registered", registry.len())?;
    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let plate = line?;
        let plate = plate.trim();
        if plate.is_empty() {
            continue;
        }
        let Some((id, vehicle)) = registry.find(plate) else {
            writeln!(out, "unknown plate {plate}")?;
            continue;
        };
        let mut prompt_err = None;
        let mut confirm = |prompt: Prompt| match ask(&mut lines, &mut *out, prompt) {
            Ok(yes) => yes,
            Err(e) => {
                prompt_err.get_or_insert(e);
                false
            }
        };
        let outcome = handle_checkin_with(&mut lot, vehicle, id, &mut confirm, cfg);
        if let Some(e) = prompt_err {
            return Err(e).context("reading check-in answer");
        }
        match outcome {
            CheckinOutcome::CheckedOut(space) => {
                writeln!(out, "{} checked out of {}", vehicle.plate, lot.space(space).name)?
            }
            CheckinOutcome::CheckedIn(space) => {
                let space = lot.space(space);
                writeln!(out, "{} checked in to {} ({})", vehicle.plate, space.name, space.kind)?;
                print_route(out, &lot, space, cfg)?;
            }
            CheckinOutcome::Rejected => writeln!(out, "no space for {}", vehicle.plate)?,
        }
    }
    tracing::info!(occupied = lot.occupied_count(), spaces = lot.spaces.len(), "session done");
    if save {
        save_lot(path, &lot)?;
    }
    Ok(())
}

fn demo(comb: &CombCfg, seed: u64, out: &Path) -> Result<()> {
    let lot = comb_lot(comb, seed);
    tracing::info!(seed, levels = lot.level_count, spaces = lot.spaces.len(), "demo lot");
    save_lot(out, &lot)?;
    println!("wrote {} spaces on {} levels to {}", lot.spaces.len(), lot.level_count, out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn answers_are_case_insensitive() {
        assert!(is_yes("Y"));
        assert!(is_yes(" yes\r"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("yeah"));
    }

    #[test]
    fn ask_consumes_one_line_and_defaults_to_no() {
        let mut lines = Cursor::new("y\nno\n").lines();
        let mut out = Vec::new();
        assert!(ask(&mut lines, &mut out, Prompt::ChargingSpace).unwrap());
        assert!(!ask(&mut lines, &mut out, Prompt::ChargingSpace).unwrap());
        assert!(!ask(&mut lines, &mut out, Prompt::ChargingSpace).unwrap());
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("(y/n)").count(), 3);
    }

    /// One EV space on a 20-unit lane, and a two-vehicle registry.
    fn session_fixture(dir: &Path) -> (PathBuf, PathBuf) {
        let lot_path = dir.join("lot.json");
        let vehicles = dir.join("cars.csv");
        std::fs::write(
            &lot_path,
            r#"{
                "levels": 1,
                "entrance": {"x": 0, "y": 0, "level": 0},
                "paths": [{"start": {"x": 0, "y": 0, "level": 0}, "vector": {"x": 20, "y": 0}}],
                "spaces": [{"name": "E1", "kind": "ev", "x": 3.75, "y": 2, "level": 0}]
            }"#,
        )
        .unwrap();
        std::fs::write(&vehicles, "plate,kind\nEV1,ev\nST1,standard\n").unwrap();
        (lot_path, vehicles)
    }

    fn run_session(lot: &Path, vehicles: &Path, save: bool, input: &str) -> String {
        let mut out = Vec::new();
        session(lot, vehicles, save, &NavCfg::default(), Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn session_checks_in_then_out_and_reports_unknown_plates() {
        let dir = tempfile::tempdir().unwrap();
        let (lot_path, vehicles) = session_fixture(dir.path());
        let shown = run_session(&lot_path, &vehicles, false, "EV1\ny\nXX9\n\nEV1\n");
        assert!(shown.contains("2 vehicles registered"), "{shown}");
        assert!(shown.contains("charging space? (y/n)"), "{shown}");
        assert!(shown.contains("EV1 checked in to E1 (EV)"), "{shown}");
        assert!(shown.contains("total 7.05"), "{shown}");
        assert!(shown.contains("unknown plate XX9"), "{shown}");
        assert!(shown.contains("EV1 checked out of E1"), "{shown}");
        let lot = load_lot(&lot_path, &NavCfg::default()).unwrap();
        assert_eq!(lot.occupied_count(), 0);
    }

    #[test]
    fn session_save_writes_occupancy_back() {
        let dir = tempfile::tempdir().unwrap();
        let (lot_path, vehicles) = session_fixture(dir.path());
        let shown = run_session(&lot_path, &vehicles, true, "EV1\ny\nEV1\nev1\ny\n");
        assert_eq!(shown.matches("checked in to E1").count(), 2, "{shown}");
        let lot = load_lot(&lot_path, &NavCfg::default()).unwrap();
        let id = lot.space_by_name("E1").unwrap();
        assert_eq!(lot.space(id).occupant, Some(lotnav::lot::VehicleId(0)));
    }

    #[test]
    fn declined_charging_space_falls_back_and_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let (lot_path, vehicles) = session_fixture(dir.path());
        // Declining EV means standard; there is none, so the standard-only car is rejected too.
        let shown = run_session(&lot_path, &vehicles, true, "EV1\nn\nST1\n");
        assert!(shown.contains("no space for EV1"), "{shown}");
        assert!(shown.contains("no space for ST1"), "{shown}");
        let lot = load_lot(&lot_path, &NavCfg::default()).unwrap();
        assert_eq!(lot.occupied_count(), 0);
    }

    #[test]
    fn route_json_lists_segments_and_total() {
        let lot = comb_lot(&CombCfg::default(), 0);
        let space = &lot.spaces[0];
        let route = superpath_to_space_with(&lot, space, &NavCfg::default()).unwrap();
        let doc = route_json(space, &route);
        assert_eq!(doc["space"], space.name.as_str());
        assert_eq!(doc["segments"].as_array().unwrap().len(), route.len());
        let total: f64 = doc["segments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["length"].as_f64().unwrap())
            .sum();
        assert!((total - doc["length"].as_f64().unwrap()).abs() < 1e-9);
    }

    #[test]
    fn demo_writes_a_loadable_lot() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("demo.json");
        demo(&CombCfg::default(), 3, &out).unwrap();
        let lot = load_lot(&out, &NavCfg::default()).unwrap();
        assert_eq!(lot, comb_lot(&CombCfg::default(), 3));
    }
}

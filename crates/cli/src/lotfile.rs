//! JSON lot description: serde DTOs and conversion to and from `lotnav::lot::Lot`.

use anyhow::{anyhow, Context, Result};
use lotnav::lot::{Lot, Path as LotPath, Space, SpaceKind, VehicleId};
use lotnav::validate::validate_lot_with;
use lotnav::{Location, NavCfg, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LocFile {
    pub x: f64,
    pub y: f64,
    pub level: i32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct VecFile {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PathFile {
    pub start: LocFile,
    pub vector: VecFile,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpaceFile {
    pub name: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub level: i32,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LotFile {
    pub levels: i32,
    #[serde(default)]
    pub ramp_length: f64,
    pub entrance: LocFile,
    #[serde(default)]
    pub poi: Option<LocFile>,
    pub paths: Vec<PathFile>,
    pub spaces: Vec<SpaceFile>,
    #[serde(default)]
    pub ups: Vec<LocFile>,
    #[serde(default)]
    pub downs: Vec<LocFile>,
}

impl From<LocFile> for Location {
    fn from(l: LocFile) -> Self {
        Location::new(l.x, l.y, l.level)
    }
}

impl From<Location> for LocFile {
    fn from(l: Location) -> Self {
        Self {
            x: l.x,
            y: l.y,
            level: l.level,
        }
    }
}

impl LotFile {
    pub fn into_lot(self) -> Result<Lot> {
        let entrance = Location::from(self.entrance);
        let mut lot = Lot::new(self.levels, entrance, self.ramp_length);
        lot.poi = self.poi.map(Location::from).unwrap_or(entrance);
        lot.paths = self
            .paths
            .into_iter()
            .map(|p| LotPath::new(p.start.into(), Vec2::new(p.vector.x, p.vector.y)))
            .collect();
        lot.ups = self.ups.into_iter().map(Location::from).collect();
        lot.downs = self.downs.into_iter().map(Location::from).collect();
        lot.spaces = self
            .spaces
            .into_iter()
            .map(|s| {
                let kind: SpaceKind = s
                    .kind
                    .parse()
                    .map_err(|e: String| anyhow!("space `{}`: {e}", s.name))?;
                let mut space =
                    Space::new(s.name, kind, Location::new(s.x, s.y, s.level), s.rotation);
                space.occupant = s.occupant.map(VehicleId);
                Ok(space)
            })
            .collect::<Result<_>>()?;
        Ok(lot)
    }

    pub fn from_lot(lot: &Lot) -> Self {
        Self {
            levels: lot.level_count,
            ramp_length: lot.ramp_length,
            entrance: lot.entrance.into(),
            poi: Some(lot.poi.into()),
            paths: lot
                .paths
                .iter()
                .map(|p| PathFile {
                    start: p.start.into(),
                    vector: VecFile {
                        x: p.vector.x,
                        y: p.vector.y,
                    },
                })
                .collect(),
            spaces: lot
                .spaces
                .iter()
                .map(|s| SpaceFile {
                    name: s.name.clone(),
                    kind: s.kind.label().to_string(),
                    x: s.location.x,
                    y: s.location.y,
                    level: s.location.level,
                    rotation: s.rotation,
                    occupant: s.occupant.map(|v| v.0),
                })
                .collect(),
            ups: lot.ups.iter().copied().map(LocFile::from).collect(),
            downs: lot.downs.iter().copied().map(LocFile::from).collect(),
        }
    }
}

/// Read, convert and validate a lot file.
pub fn load_lot<P: AsRef<Path>>(path: P, cfg: &NavCfg) -> Result<Lot> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: LotFile =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    let lot = file.into_lot()?;
    validate_lot_with(&lot, cfg).with_context(|| format!("validating {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        levels = lot.level_count,
        paths = lot.paths.len(),
        spaces = lot.spaces.len(),
        "lot loaded"
    );
    Ok(lot)
}

pub fn save_lot<P: AsRef<Path>>(path: P, lot: &Lot) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating lot dir {}", parent.display()))?;
        }
    }
    let doc = serde_json::to_vec_pretty(&LotFile::from_lot(lot))?;
    fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotnav::synth::{comb_lot, CombCfg};
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_lot() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lots/comb.json");
        let cfg = CombCfg {
            occupancy: 0.3,
            ..CombCfg::default()
        };
        let lot = comb_lot(&cfg, 5);
        save_lot(&file, &lot).unwrap();
        let back = load_lot(&file, &NavCfg::default()).unwrap();
        assert_eq!(back, lot);
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let doc = r#"{
            "levels": 1,
            "entrance": {"x": 0, "y": 0, "level": 0},
            "paths": [{"start": {"x": 0, "y": 0, "level": 0}, "vector": {"x": 20, "y": 0}}],
            "spaces": [{"name": "A1", "kind": "standard", "x": 3.75, "y": 2, "level": 0}]
        }"#;
        let file: LotFile = serde_json::from_str(doc).unwrap();
        let lot = file.into_lot().unwrap();
        assert_eq!(lot.poi, lot.entrance);
        assert_eq!(lot.ramp_length, 0.0);
        assert_eq!(lot.spaces[0].kind, SpaceKind::Standard);
        assert!(lot.spaces[0].is_empty());
        assert!(lot.ups.is_empty());
    }

    #[test]
    fn unknown_kind_is_reported_with_space_name() {
        let doc = r#"{
            "levels": 1,
            "entrance": {"x": 0, "y": 0, "level": 0},
            "paths": [],
            "spaces": [{"name": "Q1", "kind": "truck", "x": 0, "y": 0, "level": 0}]
        }"#;
        let file: LotFile = serde_json::from_str(doc).unwrap();
        let err = file.into_lot().unwrap_err().to_string();
        assert!(err.contains("Q1") && err.contains("truck"), "{err}");
    }

    #[test]
    fn invalid_lot_fails_to_load() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.json");
        let mut lot = comb_lot(&CombCfg::default(), 1);
        lot.spaces[1].name = lot.spaces[0].name.clone();
        save_lot(&file, &lot).unwrap();
        let err = load_lot(&file, &NavCfg::default()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate space name"));
    }
}

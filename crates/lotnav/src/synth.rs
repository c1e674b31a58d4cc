//! Seeded synthetic lots (comb layout) for benchmarks, property tests and demos.
//!
//! Model
//! - Every level has a spine along the x-axis split at aisle junctions, and
//!   vertical aisles with a row of spaces on each side, entry edges facing the
//!   aisle.
//! - Spines alternate direction per level so ramps sit at alternating ends:
//!   even levels run +x and climb at the far end, odd levels run back and climb
//!   at x = 0. This keeps every up distinct from the down on the same level.
//! - Kinds and pre-occupancy are drawn from one `StdRng` seeded by the caller,
//!   so `(cfg, seed)` replays the same lot.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Location, Vec2};
use crate::lot::{Lot, Path, Space, SpaceKind, VehicleId};

/// Gap from aisle centerline to the entry edge of a space.
const SETBACK: f64 = 2.0;
/// Pitch between neighbouring spaces along an aisle (widest footprint + slack).
const SLOT: f64 = 3.8;
/// Distance from the spine to the first slot.
const FIRST_SLOT: f64 = 3.0;

#[derive(Clone, Copy, Debug)]
pub struct CombCfg {
    pub levels: i32,
    /// Aisles per level, clamped to [1, 26].
    pub aisles: usize,
    /// Spaces on each side of an aisle, clamped to [1, 49].
    pub per_side: usize,
    pub ramp_length: f64,
    /// Probability a generated space starts occupied.
    pub occupancy: f64,
    /// Relative weights for Standard, Handicap, Compact, EV.
    pub kind_weights: [f64; 4],
}

impl Default for CombCfg {
    fn default() -> Self {
        Self {
            levels: 2,
            aisles: 3,
            per_side: 6,
            ramp_length: 25.0,
            occupancy: 0.0,
            kind_weights: [0.7, 0.08, 0.12, 0.1],
        }
    }
}

impl CombCfg {
    /// Centre-to-centre aisle distance: two rows of the deepest footprint plus a lane.
    pub fn aisle_gap(&self) -> f64 {
        2.0 * (SETBACK + 5.0) + 2.0
    }

    fn aisle_len(&self) -> f64 {
        FIRST_SLOT + self.per_side.clamp(1, 49) as f64 * SLOT + 1.0
    }
}

fn draw_kind<R: Rng>(rng: &mut R, weights: &[f64; 4]) -> SpaceKind {
    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return SpaceKind::Standard;
    }
    let mut u = rng.gen::<f64>() * total;
    for (kind, w) in SpaceKind::ALL.into_iter().zip(weights) {
        u -= w.max(0.0);
        if u < 0.0 {
            return kind;
        }
    }
    SpaceKind::Standard
}

/// Build a comb lot. The entrance is at the origin of level 0.
pub fn comb_lot(cfg: &CombCfg, seed: u64) -> Lot {
    let mut rng = StdRng::seed_from_u64(seed);
    let levels = cfg.levels.max(1);
    let aisles = cfg.aisles.clamp(1, 26);
    let per_side = cfg.per_side.clamp(1, 49);
    let gap = cfg.aisle_gap();
    let far = gap * (aisles + 1) as f64;

    let mut lot = Lot::new(levels, Location::new(0.0, 0.0, 0), cfg.ramp_length);
    lot.poi = Location::new(far / 2.0, -5.0, 0);
    let mut next_vehicle = 0usize;

    for level in 0..levels {
        let forward = level % 2 == 0;
        let junctions: Vec<f64> = (0..=aisles + 1).map(|k| gap * k as f64).collect();
        let spine: Vec<f64> = if forward {
            junctions.clone()
        } else {
            junctions.iter().rev().copied().collect()
        };
        for w in spine.windows(2) {
            lot.paths.push(Path::new(
                Location::new(w[0], 0.0, level),
                Vec2::new(w[1] - w[0], 0.0),
            ));
        }
        if level + 1 < levels {
            let top = if forward { far } else { 0.0 };
            lot.ups.push(Location::new(top, 0.0, level));
            lot.downs.push(Location::new(top, 0.0, level + 1));
        }

        for (a, &x) in junctions[1..=aisles].iter().enumerate() {
            lot.paths.push(Path::new(
                Location::new(x, 0.0, level),
                Vec2::new(0.0, cfg.aisle_len()),
            ));
            let letter = (b'A' + a as u8) as char;
            for slot in 0..per_side {
                let y = FIRST_SLOT + slot as f64 * SLOT;
                for (side, (anchor, rotation)) in [
                    (Vec2::new(x - SETBACK, y), 90.0),
                    (Vec2::new(x + SETBACK, y), 270.0),
                ]
                .into_iter()
                .enumerate()
                {
                    let kind = draw_kind(&mut rng, &cfg.kind_weights);
                    // Right-side spaces rotate below their anchor; lift by the width.
                    let anchor = if side == 1 {
                        anchor + Vec2::new(0.0, kind.footprint().width)
                    } else {
                        anchor
                    };
                    let name = format!("{level}{letter}{:02}", slot * 2 + side + 1);
                    let mut space =
                        Space::new(name, kind, Location::at(anchor, level), rotation);
                    if rng.gen::<f64>() < cfg.occupancy {
                        space.occupant = Some(VehicleId(next_vehicle));
                        next_vehicle += 1;
                    }
                    lot.spaces.push(space);
                }
            }
        }
    }
    lot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::best_space_id;
    use crate::cfg::NavCfg;
    use crate::route::superpath_to_space;
    use crate::validate::validate_lot;
    use proptest::prelude::*;

    #[test]
    fn default_comb_is_valid_and_fully_routable() {
        let lot = comb_lot(&CombCfg::default(), 7);
        assert_eq!(validate_lot(&lot), Ok(()));
        assert_eq!(lot.spaces.len(), 2 * 3 * 6 * 2);
        assert_eq!(lot.ups.len(), 1);
        assert_eq!(lot.count_levels(), 2);
        for space in &lot.spaces {
            let route = superpath_to_space(&lot, space)
                .unwrap_or_else(|| panic!("no route to {}", space.name));
            assert!(route.start().unwrap().coincides(&lot.entrance, 1e-9));
            assert!(route.end().unwrap().coincides(&space.entry_point(), 1e-6));
        }
    }

    #[test]
    fn same_seed_same_lot() {
        let cfg = CombCfg {
            occupancy: 0.4,
            ..CombCfg::default()
        };
        assert_eq!(comb_lot(&cfg, 11), comb_lot(&cfg, 11));
        assert_ne!(comb_lot(&cfg, 11), comb_lot(&cfg, 12));
    }

    #[test]
    fn names_are_short_and_unique() {
        let cfg = CombCfg {
            levels: 3,
            aisles: 26,
            per_side: 49,
            ..CombCfg::default()
        };
        let lot = comb_lot(&cfg, 1);
        assert!(lot.spaces.iter().all(|s| s.name.len() <= 10));
        let mut names: Vec<_> = lot.spaces.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), lot.spaces.len());
    }

    #[test]
    fn nearest_space_is_on_ground_floor_first_aisle() {
        let cfg = CombCfg {
            kind_weights: [1.0, 0.0, 0.0, 0.0],
            ..CombCfg::default()
        };
        let lot = comb_lot(&cfg, 3);
        let id = best_space_id(&lot, SpaceKind::Standard, &NavCfg::default()).unwrap();
        assert_eq!(lot.space(id).name, "0A01");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn generated_lots_validate(
            levels in 1i32..4, aisles in 1usize..4, per_side in 1usize..5,
            occupancy in 0.0..1.0f64, seed in any::<u64>()
        ) {
            let cfg = CombCfg { levels, aisles, per_side, occupancy, ..CombCfg::default() };
            let lot = comb_lot(&cfg, seed);
            prop_assert_eq!(validate_lot(&lot), Ok(()));
            for kind in SpaceKind::ALL {
                if let Some(id) = best_space_id(&lot, kind, &NavCfg::default()) {
                    prop_assert!(lot.space(id).is_empty());
                    prop_assert_eq!(lot.space(id).kind, kind);
                }
            }
        }
    }
}

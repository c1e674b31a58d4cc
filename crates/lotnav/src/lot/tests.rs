use super::*;
use crate::geom::{Location, Vec2};
use nalgebra::vector;
use proptest::prelude::*;

fn two_level_lot() -> Lot {
    let mut lot = Lot::new(2, Location::new(0.0, 0.0, 0), 10.0);
    lot.paths
        .push(Path::new(Location::new(0.0, 0.0, 0), vector![10.0, 0.0]));
    lot.paths
        .push(Path::new(Location::new(10.0, 0.0, 1), vector![0.0, 8.0]));
    lot.ups.push(Location::new(10.0, 0.0, 0));
    lot.downs.push(Location::new(10.0, 0.0, 1));
    lot.spaces.push(Space::new(
        "A1",
        SpaceKind::Standard,
        Location::new(3.0, 2.0, 0),
        0.0,
    ));
    lot.spaces.push(Space::new(
        "B1",
        SpaceKind::Ev,
        Location::new(12.0, 2.0, 1),
        90.0,
    ));
    lot
}

#[test]
fn footprint_table() {
    assert_eq!(
        SpaceKind::Standard.footprint(),
        Footprint {
            width: 2.5,
            height: 5.0
        }
    );
    assert_eq!(SpaceKind::Handicap.footprint().width, 3.6);
    assert_eq!(SpaceKind::Compact.footprint().height, 4.5);
    assert_eq!(SpaceKind::Ev.footprint().width, 2.6);
}

#[test]
fn kind_parses_case_insensitively() {
    assert_eq!("EV".parse::<SpaceKind>(), Ok(SpaceKind::Ev));
    assert_eq!(" compact ".parse::<SpaceKind>(), Ok(SpaceKind::Compact));
    assert!("truck".parse::<SpaceKind>().is_err());
    for k in SpaceKind::ALL {
        assert_eq!(k.label().parse::<SpaceKind>(), Ok(k));
    }
}

#[test]
fn unrotated_rectangle_is_axis_aligned_at_anchor() {
    let s = Space::new("A1", SpaceKind::Handicap, Location::new(3.0, 2.0, 0), 0.0);
    let r = s.rectangle();
    assert_eq!(r.corners[0], vector![3.0, 2.0]);
    assert!((r.corners[1] - vector![6.6, 2.0]).norm() < 1e-12);
    assert!((r.corners[2] - vector![6.6, 7.0]).norm() < 1e-12);
    assert!((r.corners[3] - vector![3.0, 7.0]).norm() < 1e-12);
    let entry = s.entry_point();
    assert!((entry.x - 4.8).abs() < 1e-12 && (entry.y - 2.0).abs() < 1e-12);
    assert_eq!(entry.level, 0);
}

#[test]
fn rotated_rectangle_turns_about_anchor() {
    let s = Space::new("B1", SpaceKind::Standard, Location::new(0.0, 0.0, 1), 90.0);
    let r = s.rectangle();
    assert!((r.corners[1] - vector![0.0, 2.5]).norm() < 1e-12);
    assert!((r.corners[2] - vector![-5.0, 2.5]).norm() < 1e-12);
    assert!((s.entry_point().xy() - vector![0.0, 1.25]).norm() < 1e-12);
}

#[test]
fn path_between_and_length() {
    let p = Path::between(Location::new(1.0, 1.0, 2), Location::new(4.0, 5.0, 2));
    assert_eq!(p.vector, vector![3.0, 4.0]);
    assert!((p.length() - 5.0).abs() < 1e-12);
    assert_eq!(p.endpoint(), Location::new(4.0, 5.0, 2));
    let segs = [p, Path::new(p.endpoint(), vector![0.0, -2.0])];
    assert!((superpath_length(&segs) - 7.0).abs() < 1e-12);
    assert_eq!(superpath_length(&[]), 0.0);
}

#[test]
fn lookups_by_name_vehicle_and_level() {
    let mut lot = two_level_lot();
    assert_eq!(lot.space_by_name("B1"), Some(SpaceId(1)));
    assert_eq!(lot.space_by_name("Z9"), None);
    assert_eq!(lot.count_levels(), 2);
    assert_eq!(lot.occupied_count(), 0);
    lot.space_mut(SpaceId(1)).occupant = Some(VehicleId(7));
    assert_eq!(lot.space_of_vehicle(VehicleId(7)), Some(SpaceId(1)));
    assert_eq!(lot.space_of_vehicle(VehicleId(8)), None);
    assert_eq!(lot.occupied_count(), 1);
    assert!(!lot.space(SpaceId(1)).is_empty());
}

#[test]
fn waypoint_queries() {
    let lot = two_level_lot();
    let eps = 1e-9;
    assert!(lot.is_up(&Location::new(10.0, 0.0, 0), eps));
    assert!(!lot.is_up(&Location::new(10.0, 0.0, 1), eps));
    assert!(lot.is_down(&Location::new(10.0, 0.0, 1), eps));
    assert_eq!(lot.up_on_level(0), Some(Location::new(10.0, 0.0, 0)));
    assert_eq!(lot.down_on_level(0), None);
    let ending: Vec<_> = lot
        .paths_ending_at(&Location::new(10.0, 0.0, 0), eps)
        .collect();
    assert_eq!(ending.len(), 1);
    assert_eq!(
        lot.paths_ending_at(&Location::new(10.0, 0.0, 1), eps).count(),
        0
    );
}

#[test]
fn display_lists_everything() {
    let mut lot = two_level_lot();
    lot.spaces[0].occupant = Some(VehicleId(3));
    let text = lot.to_string();
    assert!(text.contains("Entrance: (0.00, 0.00, level 0)"));
    assert!(text.contains("A1 Standard"));
    assert!(text.contains("vehicle 3"));
    assert!(text.contains("B1 EV"));
    assert!(text.contains("Downs:\n  (10.00, 0.00, level 1)"));
}

proptest! {
    #[test]
    fn endpoint_is_start_plus_vector(
        x in -100i32..100, y in -100i32..100, dx in -50i32..50, dy in -50i32..50, level in 0i32..5
    ) {
        let start = Location::new(x as f64, y as f64, level);
        let v: Vec2 = vector![dx as f64, dy as f64];
        let end = Path::new(start, v).endpoint();
        prop_assert_eq!(end, Location::new((x + dx) as f64, (y + dy) as f64, level));
    }
}

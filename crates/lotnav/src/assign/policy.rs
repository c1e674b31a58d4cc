use tracing::{debug, info};

use crate::cfg::NavCfg;
use crate::lot::{Lot, Space, SpaceId, SpaceKind, Vehicle, VehicleId};
use crate::route::EntranceTracer;

/// Question put to the driver during check-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Asked of EV drivers before anything else.
    ChargingSpace,
    /// No free space of this kind; offer a standard one.
    StandardInstead(SpaceKind),
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prompt::ChargingSpace => f.write_str("Would you like to check in to an EV charging space?"),
            Prompt::StandardInstead(kind) => write!(
                f,
                "No {kind} space is available. Would you like to attempt a standard space instead?"
            ),
        }
    }
}

/// Yes/no capability used by `handle_checkin`.
pub trait Confirm {
    fn confirm(&mut self, prompt: Prompt) -> bool;
}

impl<F: FnMut(Prompt) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: Prompt) -> bool {
        self(prompt)
    }
}

/// Terminal outcome of one check-in/out request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// The vehicle was parked and has left the given space.
    CheckedOut(SpaceId),
    CheckedIn(SpaceId),
    /// Every acceptable fallback was exhausted or declined.
    Rejected,
}

/// Cheapest free, reachable space of `kind`; ties keep the first declared.
pub fn best_space_id(lot: &Lot, kind: SpaceKind, cfg: &NavCfg) -> Option<SpaceId> {
    let mut tracer = EntranceTracer::new(lot, cfg);
    let mut best: Option<(f64, SpaceId)> = None;
    for (i, space) in lot.spaces.iter().enumerate() {
        if space.kind != kind || !space.is_empty() {
            continue;
        }
        let Some(route) = tracer.superpath_to(space, cfg) else {
            continue;
        };
        let cost = route.length() + ramp_penalty(lot, space);
        if best.is_none_or(|(c, _)| cost < c) {
            best = Some((cost, SpaceId(i)));
        }
    }
    debug!(%kind, best = ?best, "best space");
    best.map(|(_, id)| id)
}

fn ramp_penalty(lot: &Lot, space: &Space) -> f64 {
    lot.ramp_length * f64::from((space.level() - lot.entrance.level).abs())
}

/// Mutable handle to the best free space of `kind`, default configuration.
pub fn best_space(lot: &mut Lot, kind: SpaceKind) -> Option<&mut Space> {
    best_space_with(lot, kind, &NavCfg::default())
}

pub fn best_space_with<'a>(lot: &'a mut Lot, kind: SpaceKind, cfg: &NavCfg) -> Option<&'a mut Space> {
    let id = best_space_id(lot, kind, cfg)?;
    Some(lot.space_mut(id))
}

/// Check `vehicle` out if it is parked, else check it in, with default configuration.
pub fn handle_checkin<C: Confirm + ?Sized>(
    lot: &mut Lot,
    vehicle: &Vehicle,
    vehicle_id: VehicleId,
    confirm: &mut C,
) -> CheckinOutcome {
    handle_checkin_with(lot, vehicle, vehicle_id, confirm, &NavCfg::default())
}

pub fn handle_checkin_with<C: Confirm + ?Sized>(
    lot: &mut Lot,
    vehicle: &Vehicle,
    vehicle_id: VehicleId,
    confirm: &mut C,
    cfg: &NavCfg,
) -> CheckinOutcome {
    if let Some(id) = lot.space_of_vehicle(vehicle_id) {
        lot.space_mut(id).occupant = None;
        info!(plate = %vehicle.plate, space = %lot.space(id).name, "checked out");
        return CheckinOutcome::CheckedOut(id);
    }
    let outcome = check_in_as(lot, vehicle, vehicle_id, vehicle.kind, confirm, cfg);
    match outcome {
        CheckinOutcome::CheckedIn(id) => {
            info!(plate = %vehicle.plate, space = %lot.space(id).name, "checked in")
        }
        _ => info!(plate = %vehicle.plate, kind = %vehicle.kind, "check-in rejected"),
    }
    outcome
}

/// Fallback tree for a vehicle treated as `kind`. At most one hop to Standard.
fn check_in_as<C: Confirm + ?Sized>(
    lot: &mut Lot,
    vehicle: &Vehicle,
    vehicle_id: VehicleId,
    kind: SpaceKind,
    confirm: &mut C,
    cfg: &NavCfg,
) -> CheckinOutcome {
    if kind == SpaceKind::Ev && !confirm.confirm(Prompt::ChargingSpace) {
        return check_in_as(lot, vehicle, vehicle_id, SpaceKind::Standard, confirm, cfg);
    }
    if let Some(id) = best_space_id(lot, kind, cfg) {
        lot.space_mut(id).occupant = Some(vehicle_id);
        return CheckinOutcome::CheckedIn(id);
    }
    match kind {
        SpaceKind::Compact => {
            debug!(plate = %vehicle.plate, "no compact space; trying standard");
            check_in_as(lot, vehicle, vehicle_id, SpaceKind::Standard, confirm, cfg)
        }
        SpaceKind::Standard => CheckinOutcome::Rejected,
        SpaceKind::Ev | SpaceKind::Handicap => {
            if confirm.confirm(Prompt::StandardInstead(kind)) {
                check_in_as(lot, vehicle, vehicle_id, SpaceKind::Standard, confirm, cfg)
            } else {
                CheckinOutcome::Rejected
            }
        }
    }
}

//! Space allocation: nearest free space of a kind, and the check-in/out policy.
//!
//! - `best_space` ranks free spaces of one kind by route length plus
//!   `ramp_length` per level away from the entrance.
//! - `handle_checkin` toggles a vehicle in or out, walking the fallback tree
//!   (Compact → Standard silently; EV/Handicap → Standard on confirmation).
//!   Questions to the driver go through the `Confirm` capability so the
//!   policy stays testable without a terminal.
//!
//! Callers must serialize check-in/out against one `Lot`: ranking reads
//! occupancy that check-in writes.

mod policy;

pub use policy::{
    best_space, best_space_id, best_space_with, handle_checkin, handle_checkin_with,
    CheckinOutcome, Confirm, Prompt,
};

//! Direction-biased scan over the request table.
//!
//! Each (position, bias) pair has a fixed priority list. The first pending
//! call on the list becomes the destination. Serving a call clears it, except
//! for a mid stop called both ways: that one is taken now but stays pending,
//! rewritten to the other direction so it is served again on the way back.

use shared_resources::call::{CallDirection, Slot};
use shared_resources::request::RequestTable;

#[derive(Debug, Clone, Copy)]
enum Candidate {
    /// Any pending call at this slot.
    Any(Slot),
    /// The mid stop called in this direction.
    Mid(CallDirection),
    /// The mid stop called both ways, deferred as the given direction.
    MidEither(CallDirection),
}

#[derive(Debug, Clone, Copy)]
struct Step {
    candidate: Candidate,
    /// New bias when this step is taken, `None` keeps the current one.
    turn: Option<bool>,
}

const fn keep(candidate: Candidate) -> Step {
    Step { candidate: candidate, turn: None }
}

const fn turn(candidate: Candidate, going_up: bool) -> Step {
    Step { candidate: candidate, turn: Some(going_up) }
}

const UP_FROM_GROUND: [Step; 5] = [
    keep(Candidate::Any(Slot::Ground)),
    keep(Candidate::Mid(CallDirection::Up)),
    keep(Candidate::MidEither(CallDirection::Down)),
    keep(Candidate::Any(Slot::Top)),
    keep(Candidate::Mid(CallDirection::Down)),
];

const UP_FROM_MID: [Step; 5] = [
    keep(Candidate::Mid(CallDirection::Up)),
    keep(Candidate::MidEither(CallDirection::Down)),
    keep(Candidate::Any(Slot::Top)),
    turn(Candidate::Mid(CallDirection::Down), false),
    turn(Candidate::Any(Slot::Ground), false),
];

const DOWN_FROM_MID: [Step; 5] = [
    keep(Candidate::Mid(CallDirection::Down)),
    keep(Candidate::MidEither(CallDirection::Up)),
    keep(Candidate::Any(Slot::Ground)),
    turn(Candidate::Mid(CallDirection::Up), true),
    turn(Candidate::Any(Slot::Top), true),
];

const DOWN_FROM_TOP: [Step; 5] = [
    keep(Candidate::Any(Slot::Top)),
    keep(Candidate::Mid(CallDirection::Down)),
    keep(Candidate::MidEither(CallDirection::Up)),
    keep(Candidate::Any(Slot::Ground)),
    keep(Candidate::Mid(CallDirection::Up)),
];

/// Outcome of a successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub slot: Slot,
    pub going_up: bool,
}

impl Step {
    fn try_serve(&self, requests: &mut RequestTable, going_up: bool) -> Option<Pick> {
        let slot = match self.candidate {
            Candidate::Any(slot) => {
                if !requests.is_requested(slot) {
                    return None;
                }
                requests.clear_request(slot);
                slot
            }
            Candidate::Mid(direction) => {
                if !requests.is_requested_in(Slot::Mid, direction) {
                    return None;
                }
                requests.clear_request(Slot::Mid);
                Slot::Mid
            }
            Candidate::MidEither(defer_as) => {
                if !requests.is_requested_in(Slot::Mid, CallDirection::Either) {
                    return None;
                }
                requests.set_direction(Slot::Mid, defer_as);
                Slot::Mid
            }
        };
        Some(Pick {
            slot: slot,
            going_up: self.turn.unwrap_or(going_up),
        })
    }
}

/// Picks the next destination for a car standing at `at` with the given bias.
/// Returns `None` when nothing on the list is pending.
pub fn scan(requests: &mut RequestTable, at: Slot, going_up: bool) -> Option<Pick> {
    let order: &[Step] = match (at, going_up) {
        (Slot::Ground, true) => &UP_FROM_GROUND,
        (Slot::Mid, true) => &UP_FROM_MID,
        (Slot::Mid, false) => &DOWN_FROM_MID,
        (Slot::Top, false) => &DOWN_FROM_TOP,
        _ => return None,
    };
    order.iter().find_map(|step| step.try_serve(requests, going_up))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(calls: &[(Slot, CallDirection)]) -> RequestTable {
        let mut table = RequestTable::new();
        for (slot, direction) in calls {
            table.add_request(*slot, *direction);
        }
        table
    }

    #[test]
    fn nothing_pending_finds_nothing() {
        let mut table = RequestTable::new();
        assert_eq!(scan(&mut table, Slot::Ground, true), None);
        assert_eq!(scan(&mut table, Slot::Mid, false), None);
        assert_eq!(scan(&mut table, Slot::Top, false), None);
    }

    #[test]
    fn ground_call_at_ground_is_served_in_place() {
        let mut table = table_with(&[(Slot::Ground, CallDirection::Up), (Slot::Top, CallDirection::Down)]);
        let pick = scan(&mut table, Slot::Ground, true);
        assert_eq!(pick, Some(Pick { slot: Slot::Ground, going_up: true }));
        assert!(!table.is_requested(Slot::Ground));
        assert!(table.is_requested(Slot::Top));
    }

    #[test]
    fn upward_scan_prefers_mid_up_over_top() {
        let mut table = table_with(&[(Slot::Top, CallDirection::Down), (Slot::Mid, CallDirection::Up)]);
        let pick = scan(&mut table, Slot::Ground, true);
        assert_eq!(pick, Some(Pick { slot: Slot::Mid, going_up: true }));
        assert!(!table.is_requested(Slot::Mid));
    }

    #[test]
    fn upward_scan_passes_mid_down_for_top() {
        let mut table = table_with(&[(Slot::Mid, CallDirection::Down), (Slot::Top, CallDirection::Down)]);
        let pick = scan(&mut table, Slot::Ground, true);
        assert_eq!(pick, Some(Pick { slot: Slot::Top, going_up: true }));
        assert!(table.is_requested_in(Slot::Mid, CallDirection::Down));
    }

    #[test]
    fn mid_down_from_ground_keeps_heading_up() {
        let mut table = table_with(&[(Slot::Mid, CallDirection::Down)]);
        let pick = scan(&mut table, Slot::Ground, true);
        assert_eq!(pick, Some(Pick { slot: Slot::Mid, going_up: true }));
        assert!(!table.is_requested(Slot::Mid));
    }

    #[test]
    fn either_call_is_deferred_not_cleared() {
        let mut table = table_with(&[(Slot::Mid, CallDirection::Up), (Slot::Mid, CallDirection::Down)]);
        let pick = scan(&mut table, Slot::Ground, true);
        assert_eq!(pick, Some(Pick { slot: Slot::Mid, going_up: true }));
        assert!(table.is_requested_in(Slot::Mid, CallDirection::Down));

        let mut table = table_with(&[(Slot::Mid, CallDirection::Down), (Slot::Mid, CallDirection::Up)]);
        let pick = scan(&mut table, Slot::Top, false);
        assert_eq!(pick, Some(Pick { slot: Slot::Mid, going_up: false }));
        assert!(table.is_requested_in(Slot::Mid, CallDirection::Up));
    }

    #[test]
    fn resuming_up_from_mid_skips_ground_until_last() {
        let mut table = table_with(&[(Slot::Ground, CallDirection::Up), (Slot::Top, CallDirection::Down)]);
        assert_eq!(scan(&mut table, Slot::Mid, true), Some(Pick { slot: Slot::Top, going_up: true }));
        assert_eq!(scan(&mut table, Slot::Mid, true), Some(Pick { slot: Slot::Ground, going_up: false }));
        assert_eq!(scan(&mut table, Slot::Mid, true), None);
    }

    #[test]
    fn mid_down_while_heading_up_turns_around() {
        let mut table = table_with(&[(Slot::Mid, CallDirection::Down)]);
        assert_eq!(scan(&mut table, Slot::Mid, true), Some(Pick { slot: Slot::Mid, going_up: false }));
    }

    #[test]
    fn downward_scan_from_mid_turns_up_for_top() {
        let mut table = table_with(&[(Slot::Top, CallDirection::Down)]);
        assert_eq!(scan(&mut table, Slot::Mid, false), Some(Pick { slot: Slot::Top, going_up: true }));

        let mut table = table_with(&[(Slot::Ground, CallDirection::Up), (Slot::Mid, CallDirection::Up)]);
        assert_eq!(scan(&mut table, Slot::Mid, false), Some(Pick { slot: Slot::Ground, going_up: false }));
        assert_eq!(scan(&mut table, Slot::Mid, false), Some(Pick { slot: Slot::Mid, going_up: true }));
    }

    #[test]
    fn downward_scan_from_top() {
        let mut table = table_with(&[(Slot::Ground, CallDirection::Up), (Slot::Mid, CallDirection::Down)]);
        assert_eq!(scan(&mut table, Slot::Top, false), Some(Pick { slot: Slot::Mid, going_up: false }));
        assert_eq!(scan(&mut table, Slot::Top, false), Some(Pick { slot: Slot::Ground, going_up: false }));
    }

    #[test]
    fn never_picks_an_unrequested_record() {
        let stops = [Slot::Ground, Slot::Mid, Slot::Top];
        let directions = [CallDirection::Up, CallDirection::Down];
        for at in stops {
            for going_up in [true, false] {
                for called in stops {
                    for direction in directions {
                        let mut table = table_with(&[(called, direction)]);
                        if let Some(pick) = scan(&mut table, at, going_up) {
                            assert_eq!(pick.slot, called);
                            assert!(!table.is_requested(called));
                        }
                    }
                }
            }
        }
    }
}

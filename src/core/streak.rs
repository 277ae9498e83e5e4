//! Attendance streak tracking.
//!
//! The hot path uses a single-record lookback: given the student's most
//! recent earlier enrolled lecture, the update is O(1). `replay` recomputes
//! both counters from the full chronological history and must agree with
//! applying the lookback rule at every attended lecture in order; the
//! `repair` maintenance command relies on that equivalence.

/// Streak counters as stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    pub current: i64,
    pub longest: i64,
}

/// Apply the lookback rule for a lecture just verified as attended.
///
/// `previous_attended` is the attended flag of the student's most recent
/// earlier enrolled lecture (by start time), or `None` if this is their
/// first-ever enrolled lecture.
pub fn update(state: StreakState, previous_attended: Option<bool>) -> StreakState {
    let current = match previous_attended {
        None | Some(true) => state.current + 1,
        Some(false) => 1,
    };
    StreakState {
        current,
        longest: state.longest.max(current),
    }
}

/// Recompute both counters from scratch over a chronological enrollment
/// history (`true` = attended). Missed lectures never trigger an update;
/// they only reset the run when the next attended lecture looks back at
/// them.
pub fn replay(history: &[bool]) -> StreakState {
    let mut state = StreakState::default();
    let mut previous: Option<bool> = None;

    for &attended in history {
        if attended {
            state = update(state, previous);
        }
        previous = Some(attended);
    }
    state
}

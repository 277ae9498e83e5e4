use serde::Serialize;

/// A user row with its streak counters.
///
/// Invariant: `longest_streak >= current_streak` after any update.
/// The counters are mutated only by the streak tracker, inside the same
/// transaction that flips the attendance flag.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub student_id: String,  // ⇔ users.student_id
    pub username: String,    // ⇔ users.username
    pub is_staff: bool,      // ⇔ users.is_staff (0|1)
    pub current_streak: i64, // ⇔ users.current_streak
    pub longest_streak: i64, // ⇔ users.longest_streak
}

use serde::Serialize;

/// One enrollment row per (student, lecture) pair.
///
/// `attended` only ever moves false → true, and only through the
/// verification flow; the core never resets it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: String, // ⇔ lecture_attendance.user_id
    pub lecture_id: i64,    // ⇔ lecture_attendance.lecture_id
    pub attended: bool,     // ⇔ lecture_attendance.is_attended (0|1)
}

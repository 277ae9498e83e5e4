use chrono::{DateTime, Utc};
use serde::Serialize;

/// A scheduled lecture. Created by scheduling tooling, immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Lecture {
    pub id: i64,                      // ⇔ lectures.id (INTEGER PK)
    pub module_id: i64,               // ⇔ lectures.module_id
    pub lecturer_id: String,          // ⇔ lectures.lecturer_id
    pub start_time: DateTime<Utc>,    // ⇔ lectures.start_time (TEXT, UTC)
    pub end_time: DateTime<Utc>,      // ⇔ lectures.end_time (TEXT, UTC)
}

impl Lecture {
    /// "In session" ⇔ start ≤ now ≤ end (both bounds inclusive).
    pub fn in_session(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }
}

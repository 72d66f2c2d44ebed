use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to microseconds, the precision PostgreSQL keeps,
/// so values compare equal after a round trip through the database.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

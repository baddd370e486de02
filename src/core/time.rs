use chrono::{DateTime, Utc};

pub const FIXED_TIME_VAR: &str = "SC_FIXED_TIME";

/// Current time, or the RFC 3339 instant in `SC_FIXED_TIME` when set.
pub fn now_utc() -> DateTime<Utc> {
    if let Ok(value) = std::env::var(FIXED_TIME_VAR) {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return dt.with_timezone(&Utc);
        }
    }
    Utc::now()
}

pub fn now_millis() -> i64 {
    now_utc().timestamp_millis()
}

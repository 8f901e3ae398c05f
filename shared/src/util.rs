use chrono::{NaiveDateTime, Utc};

/// Timestamp layout used for `created_at` columns and for the ledger payload.
///
/// Fixed width (always six fractional digits), so lexicographic order equals
/// chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC time formatted with [`TIMESTAMP_FORMAT`] (no offset suffix).
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now().naive_utc())
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp produced by [`format_timestamp`].
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

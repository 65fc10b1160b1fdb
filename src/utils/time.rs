use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Bogota has been fixed at UTC-5 with no daylight saving since 1993.
const BOGOTA_OFFSET_SECS: i32 = -5 * 3600;

pub fn bogota_offset() -> FixedOffset {
    FixedOffset::east_opt(BOGOTA_OFFSET_SECS).expect("valid fixed offset")
}

/// Format a stored UTC timestamp as Bogota wall time, `YYYY-MM-DD HH:MM:SS`.
///
/// Timestamps are persisted as naive UTC and only converted on read; the
/// stored value itself is never rewritten.
pub fn format_bogota(ts: NaiveDateTime) -> String {
    let utc: DateTime<Utc> = Utc.from_utc_datetime(&ts);
    utc.with_timezone(&bogota_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

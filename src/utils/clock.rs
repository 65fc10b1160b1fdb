use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of the current time for insert timestamps.
///
/// Production code uses [`SystemClock`]; tests substitute a fixed clock so
/// stored `fecha_creacion` values are deterministic.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

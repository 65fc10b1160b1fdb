pub mod clock;
pub mod time;

pub use clock::{Clock, SharedClock, SystemClock};
pub use time::format_bogota;

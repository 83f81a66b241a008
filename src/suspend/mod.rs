pub mod extractor;
pub mod pairing;

pub use extractor::SuspendLog;
pub use pairing::{format_elapsed, DurationRecord, Pairer, Pairing};

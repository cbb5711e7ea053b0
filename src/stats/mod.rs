//! Statistics about a recognition run: how many frames were seen, how many
//! gestures were accepted and what they did to the text.

pub mod log;

pub use log::{create_shared_stats, SessionStats, SharedStats, StatsSnapshot};

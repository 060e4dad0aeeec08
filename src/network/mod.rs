pub mod stats_client;
pub mod summary;

pub use stats_client::StatsClient;
pub use summary::{decode_summary, PodStats, StatsSummary, VolumeStats};

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Collection
    pub const DEFAULT_WORKERS: usize = 3;
    pub const STATS_SUMMARY_PATH: &'static str = "stats/summary";
    pub const ROW_CHANNEL_CAPACITY: usize = 64;

    // Progress spinner
    pub const SPINNER_TICK_MS: u64 = 100;
    pub const SPINNER_FRAMES: &'static [char] = &['|', '/', '-', '\\'];

    // Row color thresholds (percent)
    pub const CRITICAL_THRESHOLD: f64 = 75.0;
    pub const WARNING_THRESHOLD: f64 = 50.0;
    pub const NORMAL_THRESHOLD: f64 = 25.0;
}

/// Environment-specific configuration
pub struct EnvConfig;

impl EnvConfig {
    /// Worker pool size for a run over `node_count` nodes.
    ///
    /// Never zero, and never larger than the number of nodes so no worker
    /// starts with an empty queue.
    pub fn worker_count(requested: usize, node_count: usize) -> usize {
        requested.max(1).min(node_count.max(1))
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(verbosity: u8) -> &'static str {
        match verbosity {
            0 => "df_pv=warn",
            1 => "df_pv=debug",
            _ => "df_pv=trace",
        }
    }
}

/// UI Theme configuration
pub struct ThemeConfig;

impl ThemeConfig {
    /// Row color for a usage percentage; `None` keeps the terminal default.
    pub fn usage_color(percent: f64) -> Option<crossterm::style::Color> {
        use crossterm::style::Color;

        if percent > AppConfig::CRITICAL_THRESHOLD {
            Some(Color::Red)
        } else if percent > AppConfig::WARNING_THRESHOLD {
            Some(Color::Magenta)
        } else if percent > AppConfig::NORMAL_THRESHOLD {
            Some(Color::Yellow)
        } else {
            None
        }
    }
}

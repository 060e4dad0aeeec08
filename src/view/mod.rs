pub mod runner;

pub use runner::{run_df, run_report, ReportOptions};

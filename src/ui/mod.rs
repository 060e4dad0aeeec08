pub mod progress;
pub mod table;
pub mod text;

pub use progress::Spinner;
pub use table::{empty_message, render_table, sort_rows, TableOptions};

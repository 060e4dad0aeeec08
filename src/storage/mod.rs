pub mod extractor;
pub mod pv_resolver;
pub mod usage;

pub use extractor::VolumeRowExtractor;
pub use pv_resolver::PvResolver;
pub use usage::{percentage, PvcUsage};

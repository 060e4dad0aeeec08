pub mod units;

pub use units::{to_decimal_si, to_fixed_unit, to_iec, ByteUnit};

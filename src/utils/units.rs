//! Unit conversion utilities
//!
//! All conversions floor-divide: 1.9 GiB renders as `1Gi`.

use std::fmt;
use std::str::FromStr;

const IEC_UNITS: [(u64, &str); 4] = [
    (1 << 40, "Ti"),
    (1 << 30, "Gi"),
    (1 << 20, "Mi"),
    (1 << 10, "Ki"),
];

const SI_UNITS: [(u64, &str); 4] = [
    (1_000_000_000_000, "TB"),
    (1_000_000_000, "GB"),
    (1_000_000, "MB"),
    (1_000, "KB"),
];

fn scale(value: u64, units: &[(u64, &str)]) -> String {
    for (factor, suffix) in units {
        let converted = value / factor;
        if converted >= 1 {
            return format!("{converted}{suffix}");
        }
    }
    value.to_string()
}

/// Convert a byte count to the largest binary unit that keeps it at least 1
#[inline]
pub fn to_iec(bytes: u64) -> String {
    scale(bytes, &IEC_UNITS)
}

/// Convert a byte count to the largest decimal unit that keeps it at least 1
#[inline]
pub fn to_decimal_si(bytes: u64) -> String {
    scale(bytes, &SI_UNITS)
}

/// Convert a byte count to a fixed binary unit, e.g. `to_fixed_unit(5 << 30, "Gi")` is `5Gi`
pub fn to_fixed_unit(bytes: u64, suffix: &str) -> String {
    let factor = IEC_UNITS
        .iter()
        .find(|(_, s)| *s == suffix)
        .map(|(f, _)| *f)
        .unwrap_or(1);
    format!("{}{suffix}", bytes / factor)
}

/// How byte columns are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteUnit {
    /// Largest fitting binary unit
    #[default]
    Iec,
    /// Largest fitting decimal unit
    Si,
    /// Plain byte count
    Bytes,
    Ki,
    Mi,
    Gi,
    Ti,
}

impl ByteUnit {
    pub fn format(self, bytes: u64) -> String {
        match self {
            ByteUnit::Iec => to_iec(bytes),
            ByteUnit::Si => to_decimal_si(bytes),
            ByteUnit::Bytes => bytes.to_string(),
            ByteUnit::Ki => to_fixed_unit(bytes, "Ki"),
            ByteUnit::Mi => to_fixed_unit(bytes, "Mi"),
            ByteUnit::Gi => to_fixed_unit(bytes, "Gi"),
            ByteUnit::Ti => to_fixed_unit(bytes, "Ti"),
        }
    }
}

impl FromStr for ByteUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iec" | "auto" => Ok(ByteUnit::Iec),
            "si" => Ok(ByteUnit::Si),
            "bytes" | "b" => Ok(ByteUnit::Bytes),
            "ki" => Ok(ByteUnit::Ki),
            "mi" => Ok(ByteUnit::Mi),
            "gi" => Ok(ByteUnit::Gi),
            "ti" => Ok(ByteUnit::Ti),
            other => Err(format!(
                "unknown output unit '{other}', expected one of: iec, si, bytes, Ki, Mi, Gi, Ti"
            )),
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ByteUnit::Iec => "iec",
            ByteUnit::Si => "si",
            ByteUnit::Bytes => "bytes",
            ByteUnit::Ki => "Ki",
            ByteUnit::Mi => "Mi",
            ByteUnit::Gi => "Gi",
            ByteUnit::Ti => "Ti",
        };
        f.write_str(name)
    }
}

/// Lowest tabulated photon energy (keV).
pub const MIN_ENERGY_KEV: f64 = 3.0;

/// Highest tabulated photon energy (keV).
pub const MAX_ENERGY_KEV: f64 = 200.0;

/// Decimals kept when rounding a requested energy.
pub const ENERGY_DECIMALS: i32 = 1;

/// Decimals kept in a transmission percentage.
pub const TRANSMISSION_DECIMALS: i32 = 2;

/// Identifiers up to this many characters are treated as element symbols.
pub const SYMBOL_MAX_CHARS: usize = 2;

/// Placeholder identifier requesting interactive material selection.
pub const SELECT_PLACEHOLDER: &str = "-";

/// Name of the join column shared by all coefficient tables.
pub const ENERGY_COLUMN: &str = "Energy";

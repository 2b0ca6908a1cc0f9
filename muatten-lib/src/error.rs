use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AttenuationError {
    EnergyOutOfRange { energy: f64, min: f64, max: f64 },
    UnknownSymbol(String),
    MaterialNotFound(String),
    EnergyNotFound { material: String, energy: f64 },
    IndexOutOfRange { index: i64, len: usize },
    DataError(String),
    Io { path: PathBuf, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, AttenuationError>;

impl AttenuationError {
    /// True for failures caused by the query rather than the data or the system.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::EnergyOutOfRange { .. }
                | Self::UnknownSymbol(_)
                | Self::MaterialNotFound(_)
                | Self::EnergyNotFound { .. }
                | Self::IndexOutOfRange { .. }
        )
    }
}

impl fmt::Display for AttenuationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnergyOutOfRange { energy, min, max } => {
                write!(f, "energy {energy} keV out of range [{min}, {max}]")
            }
            Self::UnknownSymbol(sym) => write!(f, "unknown element symbol: {sym}"),
            Self::MaterialNotFound(name) => write!(f, "material not found: {name}"),
            Self::EnergyNotFound { material, energy } => {
                write!(f, "no coefficient for '{material}' at {energy} keV")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "material index {index} out of range [0, {len})")
            }
            Self::DataError(msg) => write!(f, "data error: {msg}"),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for AttenuationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

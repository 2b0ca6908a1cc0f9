pub mod attenuation;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod resolve;
pub mod snapshot;

pub use attenuation::{round_half_even, transmission_percent};
pub use catalog::{Catalog, CatalogEntry};
pub use error::{AttenuationError, Result};
pub use loader::DataFiles;
pub use lookup::{EnergyKey, LookupMiss, MaterialClass};
pub use resolve::{Coefficient, Identification, Query, Selection, Transmission, validate_energy};
pub use muatten_data;

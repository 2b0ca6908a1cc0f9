#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// The complete attenuation database: coefficient tables plus name indexes.
///
/// Produced by the tab-separated loader, stored in snapshots, and indexed
/// by `muatten::Catalog`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttenuationDatabase {
    pub elements: CoefficientTable,
    pub compounds: CoefficientTable,
    pub element_names: Vec<ElementRecord>,
    pub compound_names: Vec<CompoundRecord>,
}

/// Mass attenuation coefficients (cm²/g) for one material class.
///
/// Row `i` of every column belongs to `energies[i]` (keV).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoefficientTable {
    pub energies: Vec<f64>,
    pub columns: Vec<CoefficientColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientColumn {
    pub material: String,
    /// `None` marks a cell with no tabulated value.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub name: String,
}

impl CoefficientTable {
    pub fn column(&self, material: &str) -> Option<&CoefficientColumn> {
        self.columns.iter().find(|c| c.material == material)
    }
}

use std::collections::HashMap;

use muatten_data::CoefficientTable;
use tracing::trace;

use crate::attenuation::round_energy;
use crate::catalog::Catalog;
use crate::error::{AttenuationError, Result};

/// Hash key of a photon energy.
///
/// Two energies share a key only when they are the same `f64`; `-0.0` and
/// `0.0` are the same key. No rounding happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnergyKey(u64);

impl EnergyKey {
    /// Returns `None` for non-finite energies.
    pub fn from_kev(energy_kev: f64) -> Option<Self> {
        if !energy_kev.is_finite() {
            return None;
        }
        let normalized = if energy_kev == 0.0 { 0.0 } else { energy_kev };
        Some(Self(normalized.to_bits()))
    }
}

/// Which coefficient table a material lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    Element,
    Compound,
}

/// Why a table had no coefficient for a `(material, energy)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    /// The material is not a column of the table.
    ColumnNotFound,
    /// The material is a column, but the energy is not a row or the cell is empty.
    EnergyNotFound,
}

/// Column and row positions of one coefficient table.
#[derive(Debug)]
pub(crate) struct TableIndex {
    columns: HashMap<String, usize>,
    rows: HashMap<EnergyKey, usize>,
}

impl TableIndex {
    pub(crate) fn build(table: &CoefficientTable, label: &str) -> Result<Self> {
        let mut rows = HashMap::with_capacity(table.energies.len());
        for (i, &energy) in table.energies.iter().enumerate() {
            let key = EnergyKey::from_kev(energy).ok_or_else(|| {
                AttenuationError::DataError(format!("{label}: invalid energy {energy}"))
            })?;
            if rows.insert(key, i).is_some() {
                return Err(AttenuationError::DataError(format!(
                    "{label}: energy {energy} keV appears more than once"
                )));
            }
        }

        let mut columns = HashMap::with_capacity(table.columns.len());
        for (i, column) in table.columns.iter().enumerate() {
            if column.values.len() != table.energies.len() {
                return Err(AttenuationError::DataError(format!(
                    "{label}: column '{}' has {} values for {} energies",
                    column.material,
                    column.values.len(),
                    table.energies.len()
                )));
            }
            if columns.insert(column.material.clone(), i).is_some() {
                return Err(AttenuationError::DataError(format!(
                    "{label}: duplicate column '{}'",
                    column.material
                )));
            }
        }

        Ok(TableIndex { columns, rows })
    }

    pub(crate) fn has_column(&self, material: &str) -> bool {
        self.columns.contains_key(material)
    }

    fn lookup(
        &self,
        table: &CoefficientTable,
        material: &str,
        energy_kev: f64,
    ) -> std::result::Result<f64, LookupMiss> {
        let &col = self
            .columns
            .get(material)
            .ok_or(LookupMiss::ColumnNotFound)?;
        let &row = EnergyKey::from_kev(round_energy(energy_kev))
            .and_then(|key| self.rows.get(&key))
            .ok_or(LookupMiss::EnergyNotFound)?;
        table.columns[col].values[row].ok_or(LookupMiss::EnergyNotFound)
    }
}

impl Catalog {
    /// Mass attenuation coefficient (cm²/g) of `material` at `energy_kev`
    /// in the table of the given class.
    ///
    /// The query is rounded to 0.1 keV and must then equal a tabulated
    /// energy exactly. Nothing is interpolated, and rows between grid
    /// points (such as absorption edges) are never snapped to.
    pub fn lookup(
        &self,
        class: MaterialClass,
        material: &str,
        energy_kev: f64,
    ) -> std::result::Result<f64, LookupMiss> {
        let (table, index) = match class {
            MaterialClass::Element => (&self.data.elements, &self.element_index),
            MaterialClass::Compound => (&self.data.compounds, &self.compound_index),
        };
        let result = index.lookup(table, material, energy_kev);
        trace!(?class, material, energy_kev, ?result, "coefficient lookup");
        result
    }

    /// Tabulated energies (keV) of a class, in table order.
    pub fn energies(&self, class: MaterialClass) -> &[f64] {
        match class {
            MaterialClass::Element => &self.data.elements.energies,
            MaterialClass::Compound => &self.data.compounds.energies,
        }
    }
}

//! Reading the tab-separated reference tables.
//!
//! A data directory holds three element partitions (split by atomic-number
//! range), one compound table and two name indexes. Every coefficient table
//! has a header row with an `Energy` column followed by one column per
//! material. The partitions are left-joined on `Energy`: the first
//! partition decides which energies exist, and materials from later
//! partitions get an empty cell wherever their file has no such row.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use muatten_data::{
    AttenuationDatabase, CoefficientColumn, CoefficientTable, CompoundRecord, ElementRecord,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::constants::ENERGY_COLUMN;
use crate::error::{AttenuationError, Result};
use crate::lookup::EnergyKey;

/// File names of the tables inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataFiles {
    /// Element partitions; the first one is the left side of the join.
    pub element_tables: Vec<String>,
    pub compound_table: String,
    pub element_names: String,
    pub compound_names: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        DataFiles {
            element_tables: vec![
                "1-19.dat".to_string(),
                "20-69.dat".to_string(),
                "70-92.dat".to_string(),
            ],
            compound_table: "compounds.dat".to_string(),
            element_names: "names_elements.txt".to_string(),
            compound_names: "names_compounds.txt".to_string(),
        }
    }
}

impl Catalog {
    /// Load and index every table of a data directory.
    pub fn from_dir(dir: &Path, files: &DataFiles) -> Result<Self> {
        Catalog::from_database(load_dir(dir, files)?)
    }
}

/// Load every table of a data directory into one database.
pub fn load_dir(dir: &Path, files: &DataFiles) -> Result<AttenuationDatabase> {
    let (first, rest) = files.element_tables.split_first().ok_or_else(|| {
        AttenuationError::DataError("at least one element table is required".to_string())
    })?;

    let mut elements = read_table(&dir.join(first))?;
    for name in rest {
        let partition = read_table(&dir.join(name))?;
        elements = left_join(elements, partition, name)?;
    }

    let compounds = read_table(&dir.join(&files.compound_table))?;
    let element_names = with_file(&dir.join(&files.element_names), parse_element_names)?;
    let compound_names = with_file(&dir.join(&files.compound_names), parse_compound_names)?;

    debug!(
        dir = %dir.display(),
        elements = elements.columns.len(),
        compounds = compounds.columns.len(),
        energies = elements.energies.len(),
        "loaded data directory"
    );

    Ok(AttenuationDatabase {
        elements,
        compounds,
        element_names,
        compound_names,
    })
}

/// Read one coefficient table from disk.
pub fn read_table(path: &Path) -> Result<CoefficientTable> {
    with_file(path, parse_table)
}

fn with_file<T>(path: &Path, parse: impl FnOnce(File, &str) -> Result<T>) -> Result<T> {
    let file = File::open(path).map_err(|source| AttenuationError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    parse(file, &path.display().to_string())
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn csv_error(label: &str, e: csv::Error) -> AttenuationError {
    AttenuationError::DataError(format!("{label}: {e}"))
}

/// Parse a coefficient table: an `Energy` column plus one column per material.
pub fn parse_table<R: Read>(reader: R, label: &str) -> Result<CoefficientTable> {
    let mut rdr = tsv_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(label, e))?.clone();

    let energy_col = headers
        .iter()
        .position(|h| h == ENERGY_COLUMN)
        .ok_or_else(|| {
            AttenuationError::DataError(format!("{label}: missing '{ENERGY_COLUMN}' column"))
        })?;

    let mut columns: Vec<CoefficientColumn> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != energy_col)
        .map(|(_, h)| CoefficientColumn {
            material: h.to_string(),
            values: Vec::new(),
        })
        .collect();
    let mut energies = Vec::new();

    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(label, e))?;
        let line = record.position().map_or(0, |p| p.line());

        let energy = parse_cell(&record[energy_col], label, line, ENERGY_COLUMN)?.ok_or_else(
            || AttenuationError::DataError(format!("{label}: line {line}: empty energy")),
        )?;
        energies.push(energy);

        let cells = record
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != energy_col)
            .map(|(_, cell)| cell);
        for (column, cell) in columns.iter_mut().zip(cells) {
            let value = parse_cell(cell, label, line, &column.material)?;
            column.values.push(value);
        }
    }

    debug!(
        table = label,
        rows = energies.len(),
        columns = columns.len(),
        "parsed coefficient table"
    );
    Ok(CoefficientTable { energies, columns })
}

/// Empty cells and `null` are absent values.
fn parse_cell(cell: &str, label: &str, line: u64, column: &str) -> Result<Option<f64>> {
    if cell.is_empty() || cell == "null" {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| {
        AttenuationError::DataError(format!(
            "{label}: line {line}, column '{column}': invalid number '{cell}'"
        ))
    })
}

/// Left-join `right` onto `left` by energy.
///
/// Rows of `left` are kept in order; a `right` material gets the value of
/// the `right` row with exactly the same energy, or an empty cell. Energies found
/// only in `right` are dropped.
pub fn left_join(
    mut left: CoefficientTable,
    right: CoefficientTable,
    label: &str,
) -> Result<CoefficientTable> {
    let mut right_rows = HashMap::with_capacity(right.energies.len());
    for (i, &energy) in right.energies.iter().enumerate() {
        let key = EnergyKey::from_kev(energy).ok_or_else(|| {
            AttenuationError::DataError(format!("{label}: invalid energy {energy}"))
        })?;
        if right_rows.insert(key, i).is_some() {
            return Err(AttenuationError::DataError(format!(
                "{label}: energy {energy} keV appears more than once"
            )));
        }
    }

    let row_map: Vec<Option<usize>> = left
        .energies
        .iter()
        .map(|&e| EnergyKey::from_kev(e).and_then(|key| right_rows.get(&key).copied()))
        .collect();

    for column in right.columns {
        if left.columns.iter().any(|c| c.material == column.material) {
            return Err(AttenuationError::DataError(format!(
                "{label}: column '{}' already defined by an earlier table",
                column.material
            )));
        }
        let values = row_map
            .iter()
            .map(|row| row.and_then(|r| column.values.get(r).copied().flatten()))
            .collect();
        left.columns.push(CoefficientColumn {
            material: column.material,
            values,
        });
    }

    Ok(left)
}

/// Parse the element index; needs `Symbol` and `Element` columns.
pub fn parse_element_names<R: Read>(reader: R, label: &str) -> Result<Vec<ElementRecord>> {
    let mut rdr = tsv_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(label, e))?.clone();
    let find = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            AttenuationError::DataError(format!("{label}: missing '{name}' column"))
        })
    };
    let symbol_col = find("Symbol")?;
    let name_col = find("Element")?;

    let mut records = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(label, e))?;
        records.push(ElementRecord {
            symbol: record[symbol_col].to_string(),
            name: record[name_col].to_string(),
        });
    }
    Ok(records)
}

/// Parse the compound index; the first column holds the canonical name.
pub fn parse_compound_names<R: Read>(reader: R, label: &str) -> Result<Vec<CompoundRecord>> {
    let mut rdr = tsv_reader(reader);
    rdr.headers().map_err(|e| csv_error(label, e))?;

    let mut records = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(label, e))?;
        if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
            records.push(CompoundRecord {
                name: name.to_string(),
            });
        }
    }
    Ok(records)
}

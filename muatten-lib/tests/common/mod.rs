#![allow(dead_code)]

use std::path::PathBuf;

use muatten::muatten_data::{
    AttenuationDatabase, CoefficientColumn, CoefficientTable, CompoundRecord, ElementRecord,
};
use muatten::{Catalog, DataFiles};

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

/// Catalog loaded from the fixture tables in `tests/data`.
pub fn catalog() -> Catalog {
    Catalog::from_dir(&data_dir(), &DataFiles::default()).unwrap()
}

pub fn column(material: &str, values: &[Option<f64>]) -> CoefficientColumn {
    CoefficientColumn {
        material: material.to_string(),
        values: values.to_vec(),
    }
}

pub fn element(symbol: &str, name: &str) -> ElementRecord {
    ElementRecord {
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
}

pub fn compound(name: &str) -> CompoundRecord {
    CompoundRecord {
        name: name.to_string(),
    }
}

/// Small in-memory database where "Graphite" is defined in both tables.
pub fn overlapping_database() -> AttenuationDatabase {
    AttenuationDatabase {
        elements: CoefficientTable {
            energies: vec![10.0, 20.0],
            columns: vec![
                column("Carbon", &[Some(2.373), Some(0.442)]),
                column("Graphite", &[Some(2.0), Some(0.4)]),
            ],
        },
        compounds: CoefficientTable {
            energies: vec![10.0, 20.0],
            columns: vec![
                column("Graphite", &[Some(9.0), Some(9.0)]),
                column("Water", &[Some(5.329), Some(0.8096)]),
            ],
        },
        element_names: vec![element("C", "Carbon"), element("Gr", "Graphite")],
        compound_names: vec![compound("Graphite"), compound("Water")],
    }
}

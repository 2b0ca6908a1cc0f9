mod common;

use std::fs;

use muatten::loader::{load_dir, read_table};
use muatten::{AttenuationError, Catalog, DataFiles, MaterialClass};

#[test]
fn test_load_fixture_directory() {
    let data = load_dir(&common::data_dir(), &DataFiles::default()).unwrap();
    assert_eq!(data.elements.columns.len(), 10);
    assert_eq!(data.compounds.columns.len(), 3);
    assert_eq!(data.element_names.len(), 10);
    assert_eq!(data.compound_names.len(), 3);

    // Columns keep file order, partition after partition.
    let names: Vec<&str> = data
        .elements
        .columns
        .iter()
        .map(|c| c.material.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "Hydrogen", "Carbon", "Nitrogen", "Oxygen", "Aluminum", "Iron", "Copper", "Tin",
            "Tungsten", "Lead"
        ]
    );

    let lead = data.elements.column("Lead").unwrap();
    assert_eq!(lead.values[3], Some(25.5));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dir(&dir.path().join("nowhere"), &DataFiles::default()).unwrap_err();
    assert!(matches!(err, AttenuationError::Io { .. }), "{err}");
}

#[test]
fn test_custom_file_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("light.tsv"),
        "Energy\tCarbon\n10\t2.373\n20\t0.442\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("heavy.tsv"),
        "Energy\tLead\n20\t86.36\n10\t130.6\n",
    )
    .unwrap();
    fs::write(dir.path().join("mix.tsv"), "Energy\tWater\n10\t5.329\n").unwrap();
    fs::write(
        dir.path().join("symbols.tsv"),
        "Symbol\tElement\nC\tCarbon\nPb\tLead\n",
    )
    .unwrap();
    fs::write(dir.path().join("mixes.tsv"), "Name\nWater\n").unwrap();

    let files = DataFiles {
        element_tables: vec!["light.tsv".into(), "heavy.tsv".into()],
        compound_table: "mix.tsv".into(),
        element_names: "symbols.tsv".into(),
        compound_names: "mixes.tsv".into(),
    };
    let catalog = Catalog::from_dir(dir.path(), &files).unwrap();

    assert_eq!(catalog.len(), 3);
    // Rows of the second partition are matched by energy, not position.
    assert_eq!(catalog.lookup(MaterialClass::Element, "Lead", 10.0), Ok(130.6));
    assert_eq!(catalog.lookup(MaterialClass::Element, "Lead", 20.0), Ok(86.36));
    assert_eq!(catalog.transmission("Water", 0.0, 10.0).unwrap().percent, 100.0);
}

#[test]
fn test_no_element_tables_is_data_error() {
    let files = DataFiles {
        element_tables: Vec::new(),
        ..DataFiles::default()
    };
    assert!(matches!(
        load_dir(&common::data_dir(), &files),
        Err(AttenuationError::DataError(_))
    ));
}

#[test]
fn test_duplicate_energy_in_joined_partition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.tsv");
    fs::write(&path, "Energy\tLead\n10\t1.0\n10.0\t2.0\n").unwrap();
    let table = read_table(&path).unwrap();
    let base = read_table(&common::data_dir().join("1-19.dat")).unwrap();
    assert!(matches!(
        muatten::loader::left_join(base, table, "dup.tsv"),
        Err(AttenuationError::DataError(_))
    ));
}

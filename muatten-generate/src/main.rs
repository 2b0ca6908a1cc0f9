use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use muatten::loader::load_dir;
use muatten::snapshot::{decode_snapshot, encode_database};
use muatten::{AttenuationError, Catalog, DataFiles, MaterialClass};
use serde::Deserialize;

/// Pack the tab-separated attenuation tables into a single compressed snapshot.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the element partitions, compound table and name indexes
    /// [default: config `data_dir`, else "data"]
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// TOML file with a `[files]` table naming the tables (same format as muatten.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output snapshot path
    #[arg(short, long, value_name = "PATH", default_value = "muatten.bin.zst")]
    output: PathBuf,

    /// zstd compression level
    #[arg(long, default_value_t = 19)]
    level: i32,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// The parts of a `muatten.toml` the generator reads; other keys are ignored.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
struct PackConfig {
    data_dir: Option<PathBuf>,
    files: DataFiles,
}

impl PackConfig {
    fn load(path: Option<&Path>) -> muatten::Result<Self> {
        let Some(path) = path else {
            return Ok(PackConfig::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        toml::from_str(&content).map_err(|e| {
            AttenuationError::DataError(format!("invalid config {}: {e}", path.display()))
        })
    }
}

fn io_error(path: &Path, source: std::io::Error) -> AttenuationError {
    AttenuationError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn run(args: &Args) -> muatten::Result<()> {
    let config = PackConfig::load(args.config.as_deref())?;
    let data_dir = args
        .data_dir
        .clone()
        .or(config.data_dir)
        .unwrap_or_else(|| PathBuf::from("data"));
    if !data_dir.is_dir() {
        return Err(AttenuationError::DataError(format!(
            "data directory not found at {data_dir:?}"
        )));
    }

    println!("Parsing tables from {data_dir:?}...");
    let db = load_dir(&data_dir, &config.files)?;

    // Index once so malformed data is rejected before anything is written.
    let catalog = Catalog::from_database(db)?;
    let energies = catalog.energies(MaterialClass::Element);
    println!(
        "  Elements: {} names, {} columns",
        catalog.element_count(),
        catalog.raw().elements.columns.len()
    );
    println!(
        "  Compounds: {} names, {} columns",
        catalog.compound_count(),
        catalog.raw().compounds.columns.len()
    );
    if let (Some(first), Some(last)) = (energies.first(), energies.last()) {
        println!("  Energies: {} rows, {first} - {last} keV", energies.len());
    }

    println!("\nSerializing with postcard...");
    let serialized = encode_database(catalog.raw())?;
    println!("  Serialized size: {} bytes", serialized.len());

    println!("Compressing with zstd (level {})...", args.level);
    let compressed =
        zstd::encode_all(&serialized[..], args.level).map_err(|e| io_error(&args.output, e))?;
    println!(
        "  Compressed size: {} bytes ({:.1}x)",
        compressed.len(),
        serialized.len() as f64 / compressed.len() as f64
    );

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    std::fs::write(&args.output, &compressed).map_err(|e| io_error(&args.output, e))?;
    println!("\nWrote {:?}", args.output);

    println!("Verifying round-trip deserialization...");
    let decoded = decode_snapshot(&compressed)?;
    if &decoded != catalog.raw() {
        return Err(AttenuationError::DataError(
            "snapshot does not round-trip".to_string(),
        ));
    }
    println!("  Round-trip OK!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../muatten-lib/tests/data")
    }

    #[test]
    fn test_config_reads_files_table_and_ignores_cli_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muatten.toml");
        fs::write(
            &path,
            "snapshot = \"db.bin.zst\"\n[files]\ncompound_table = \"mix.dat\"\n",
        )
        .unwrap();
        let config = PackConfig::load(Some(&path)).unwrap();
        assert_eq!(config.files.compound_table, "mix.dat");
        assert_eq!(config.files.element_names, "names_elements.txt");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_packs_directory_with_custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("tables");
        fs::create_dir(&data).unwrap();
        for (from, to) in [
            ("1-19.dat", "light.tsv"),
            ("20-69.dat", "medium.tsv"),
            ("70-92.dat", "heavy.tsv"),
            ("compounds.dat", "mixtures.tsv"),
            ("names_elements.txt", "elements.idx"),
            ("names_compounds.txt", "mixtures.idx"),
        ] {
            fs::copy(fixture_dir().join(from), data.join(to)).unwrap();
        }
        let config = dir.path().join("muatten.toml");
        fs::write(
            &config,
            format!(
                "data_dir = {:?}\n\n[files]\n\
                 element_tables = [\"light.tsv\", \"medium.tsv\", \"heavy.tsv\"]\n\
                 compound_table = \"mixtures.tsv\"\n\
                 element_names = \"elements.idx\"\n\
                 compound_names = \"mixtures.idx\"\n",
                data.display().to_string()
            ),
        )
        .unwrap();

        let output = dir.path().join("out").join("muatten.bin.zst");
        let args = Args {
            data_dir: None,
            config: Some(config),
            output: output.clone(),
            level: 3,
        };
        run(&args).unwrap();

        let decoded = decode_snapshot(&fs::read(&output).unwrap()).unwrap();
        let expected = load_dir(&fixture_dir(), &DataFiles::default()).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_default_file_names_fail_on_renamed_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("light.tsv"), "Energy\tHydrogen\n10\t0.385\n").unwrap();
        let args = Args {
            data_dir: Some(dir.path().to_path_buf()),
            config: None,
            output: dir.path().join("muatten.bin.zst"),
            level: 3,
        };
        assert!(matches!(run(&args), Err(AttenuationError::Io { .. })));
        assert!(!args.output.exists());
    }
}

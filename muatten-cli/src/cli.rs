use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "X-ray mass attenuation calculator for NIST elements and compounds",
    help_template = HELP_TEMPLATE,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Material name or element symbol ("-" to show the material list)
    #[arg(value_name = "MATERIAL")]
    pub material: Option<String>,

    /// Thickness of material [cm]; prompted for when omitted
    #[arg(value_name = "THICKNESS")]
    pub thickness: Option<f64>,

    /// Photon energy [keV] (3 keV - 200 keV); prompted for when omitted
    #[arg(value_name = "ENERGY")]
    pub energy: Option<f64>,

    /// Directory with the tab-separated coefficient tables and name indexes
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Compressed database snapshot to load instead of the data directory
    #[arg(long, value_name = "PATH", conflicts_with = "data_dir")]
    pub snapshot: Option<PathBuf>,

    /// Configuration file (defaults to ./muatten.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_are_optional() {
        let cli = Cli::try_parse_from(["muatten"]).unwrap();
        assert!(cli.material.is_none());
        assert!(cli.thickness.is_none());
        assert!(cli.energy.is_none());
    }

    #[test]
    fn parses_full_query() {
        let cli = Cli::try_parse_from(["muatten", "Pb", "0.1", "32"]).unwrap();
        assert_eq!(cli.material.as_deref(), Some("Pb"));
        assert_eq!(cli.thickness, Some(0.1));
        assert_eq!(cli.energy, Some(32.0));
    }

    #[test]
    fn accepts_placeholder_and_negative_thickness() {
        let cli = Cli::try_parse_from(["muatten", "-", "-1", "50"]).unwrap();
        assert_eq!(cli.material.as_deref(), Some("-"));
        assert_eq!(cli.thickness, Some(-1.0));
    }

    #[test]
    fn rejects_non_numeric_thickness() {
        assert!(Cli::try_parse_from(["muatten", "Water", "thick", "50"]).is_err());
    }

    #[test]
    fn snapshot_conflicts_with_data_dir() {
        assert!(
            Cli::try_parse_from(["muatten", "--data-dir", "d", "--snapshot", "s.bin.zst"])
                .is_err()
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["muatten", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["muatten", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}

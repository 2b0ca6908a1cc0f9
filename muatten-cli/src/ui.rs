use crate::error::{CliError, Result};
use muatten::{AttenuationError, Catalog, MaterialClass, Selection, Transmission};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Line-oriented prompts: questions go to `output`, answers come from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_number(&mut self, prompt: &str, what: &'static str) -> Result<f64> {
        let answer = self.ask(prompt)?;
        parse_number(&answer, what)
    }

    /// Show the catalog and ask until the answer names a material.
    ///
    /// Only out-of-range indexes are asked again; other resolution failures
    /// end the run. A blank answer is taken as an (empty) material name.
    pub fn choose_material(&mut self, catalog: &Catalog) -> Result<String> {
        print_catalog(&mut self.output, catalog)?;
        loop {
            let answer = self.ask("--- Enter material index or full name: ")?;
            match catalog.resolve_selection(&Selection::parse(&answer)) {
                Ok(name) => {
                    debug!(answer = %answer, name = %name, "material selected");
                    return Ok(name);
                }
                Err(AttenuationError::IndexOutOfRange { .. }) => {
                    writeln!(self.output, "--- Invalid index!")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

pub fn parse_number(input: &str, what: &'static str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::InvalidNumber {
            what,
            input: input.to_string(),
        })
}

pub fn print_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "\n--- Available Materials:")?;
    writeln!(out, "\n--- Elements (Symbol):")?;
    let entries = catalog.list_catalog();
    for entry in entries.iter().filter(|e| e.class == MaterialClass::Element) {
        writeln!(
            out,
            "--- {:2}: {:20} ({:2})",
            entry.index,
            entry.name,
            entry.symbol.unwrap_or("")
        )?;
    }
    writeln!(out, "\n--- Compounds:")?;
    for entry in entries.iter().filter(|e| e.class == MaterialClass::Compound) {
        writeln!(out, "--- {:2}: {:20}", entry.index, entry.name)?;
    }
    Ok(())
}

pub fn format_report(result: &Transmission) -> String {
    format!(
        "For {:?} cm of '{}' the transmission of photons, with energy {:?} keV, is around {:?} %",
        result.thickness_cm, result.material, result.energy_kev, result.percent
    )
}

/// One-line message for a failure caused by the query itself.
pub fn query_failure_message(error: &AttenuationError) -> String {
    match error {
        AttenuationError::EnergyOutOfRange { min, max, .. } => {
            format!("Error: Energy not in the database ({min} keV - {max} keV)")
        }
        AttenuationError::UnknownSymbol(symbol) => {
            format!("Symbol {symbol} not in the data base")
        }
        AttenuationError::MaterialNotFound(name) => {
            format!("Warning: '{name}' column not in data")
        }
        AttenuationError::EnergyNotFound { material, energy } => {
            format!("Warning: no coefficient for '{material}' at {energy:?} keV")
        }
        other => format!("Error: {other}"),
    }
}

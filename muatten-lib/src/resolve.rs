use tracing::debug;

use crate::attenuation::{round_energy, transmission_percent};
use crate::catalog::Catalog;
use crate::constants::{MAX_ENERGY_KEV, MIN_ENERGY_KEV, SELECT_PLACEHOLDER, SYMBOL_MAX_CHARS};
use crate::error::{AttenuationError, Result};
use crate::lookup::{LookupMiss, MaterialClass};

/// Outcome of reading a material identifier from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    /// No identifier (or the `-` placeholder): the user must pick from the catalog.
    NeedsSelection,
    /// Canonical name candidate.
    Material(String),
}

/// A material picked from the interactive catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(i64),
    Name(String),
}

impl Selection {
    /// Integers select by display index; anything else is a name or symbol.
    ///
    /// Integers too large for `i64` saturate, so they are still out of range
    /// rather than names.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(index) = input.parse::<i64>() {
            return Selection::Index(index);
        }
        let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let index = if input.starts_with('-') { i64::MIN } else { i64::MAX };
            return Selection::Index(index);
        }
        Selection::Name(input.to_string())
    }
}

/// A single transmission request.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub material: Selection,
    pub thickness_cm: f64,
    pub energy_kev: f64,
}

/// A coefficient together with the table it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    pub class: MaterialClass,
    /// Mass attenuation coefficient in cm²/g.
    pub value: f64,
}

/// Result of a successful query, with everything needed to report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    pub material: String,
    pub class: MaterialClass,
    pub thickness_cm: f64,
    /// Energy after rounding to 0.1 keV.
    pub energy_kev: f64,
    pub coefficient: f64,
    /// Transmitted fraction in percent, rounded to two decimals.
    pub percent: f64,
}

/// Round `energy_kev` to 0.1 keV and check it lies in the tabulated range.
///
/// NaN is rejected along with energies below 3 keV or above 200 keV.
pub fn validate_energy(energy_kev: f64) -> Result<f64> {
    let energy = round_energy(energy_kev);
    if (MIN_ENERGY_KEV..=MAX_ENERGY_KEV).contains(&energy) {
        Ok(energy)
    } else {
        Err(AttenuationError::EnergyOutOfRange {
            energy: energy_kev,
            min: MIN_ENERGY_KEV,
            max: MAX_ENERGY_KEV,
        })
    }
}

impl Catalog {
    /// Classify a raw command-line identifier.
    ///
    /// `None`, an empty string and `-` call for interactive selection.
    /// Other identifiers go through [`Catalog::resolve_identifier`].
    pub fn identify(&self, raw: Option<&str>) -> Result<Identification> {
        match raw {
            None => Ok(Identification::NeedsSelection),
            Some(s) if s.is_empty() || s == SELECT_PLACEHOLDER => {
                Ok(Identification::NeedsSelection)
            }
            Some(s) => self.resolve_identifier(s).map(Identification::Material),
        }
    }

    /// Turn a symbol or full name into a canonical name candidate.
    ///
    /// Identifiers of one or two characters are element symbols and must
    /// match one exactly. Anything else, the empty string included, is
    /// returned unchanged; whether it names a material is decided by the
    /// coefficient lookup.
    pub fn resolve_identifier(&self, identifier: &str) -> Result<String> {
        if !identifier.is_empty() && identifier.chars().count() <= SYMBOL_MAX_CHARS {
            let name = self.resolve_by_symbol(identifier)?;
            debug!(symbol = identifier, name, "resolved element symbol");
            Ok(name.to_string())
        } else {
            Ok(identifier.to_string())
        }
    }

    /// Canonical name for an interactive selection.
    pub fn resolve_selection(&self, selection: &Selection) -> Result<String> {
        match selection {
            Selection::Index(index) => self.resolve_by_index(*index).map(str::to_string),
            Selection::Name(name) => self.resolve_identifier(name),
        }
    }

    /// Coefficient of `material` at `energy_kev`, trying the element table
    /// first and the compound table only when the element table has no
    /// such column.
    pub fn coefficient(&self, material: &str, energy_kev: f64) -> Result<Coefficient> {
        for class in [MaterialClass::Element, MaterialClass::Compound] {
            match self.lookup(class, material, energy_kev) {
                Ok(value) => return Ok(Coefficient { class, value }),
                Err(LookupMiss::ColumnNotFound) => continue,
                Err(LookupMiss::EnergyNotFound) => {
                    return Err(AttenuationError::EnergyNotFound {
                        material: material.to_string(),
                        energy: energy_kev,
                    });
                }
            }
        }
        Err(AttenuationError::MaterialNotFound(material.to_string()))
    }

    /// Transmission through `thickness_cm` of a named material.
    ///
    /// The energy is validated before any coefficient table is consulted.
    pub fn transmission(
        &self,
        material: &str,
        thickness_cm: f64,
        energy_kev: f64,
    ) -> Result<Transmission> {
        let energy_kev = validate_energy(energy_kev)?;
        let Coefficient { class, value } = self.coefficient(material, energy_kev)?;
        let percent = transmission_percent(value, thickness_cm);
        debug!(
            material,
            ?class,
            coefficient = value,
            thickness_cm,
            energy_kev,
            percent,
            "computed transmission"
        );
        Ok(Transmission {
            material: material.to_string(),
            class,
            thickness_cm,
            energy_kev,
            coefficient: value,
            percent,
        })
    }

    /// Resolve the query's material and compute its transmission.
    pub fn evaluate(&self, query: &Query) -> Result<Transmission> {
        let material = self.resolve_selection(&query.material)?;
        self.transmission(&material, query.thickness_cm, query.energy_kev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_energy_bounds_inclusive() {
        assert_eq!(validate_energy(3.0).unwrap(), 3.0);
        assert_eq!(validate_energy(200.0).unwrap(), 200.0);
        assert_eq!(validate_energy(32.04).unwrap(), 32.0);
    }

    #[test]
    fn test_validate_energy_rounds_before_checking() {
        assert_eq!(validate_energy(2.96).unwrap(), 3.0);
        assert!(validate_energy(2.94).is_err());
        assert_eq!(validate_energy(200.04).unwrap(), 200.0);
    }

    #[test]
    fn test_validate_energy_rejects_outside_and_nan() {
        for e in [0.0, 2.9, -5.0, 200.1, 250.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    validate_energy(e),
                    Err(AttenuationError::EnergyOutOfRange { .. })
                ),
                "energy {e} accepted"
            );
        }
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("12"), Selection::Index(12));
        assert_eq!(Selection::parse(" -1 "), Selection::Index(-1));
        assert_eq!(Selection::parse("Water"), Selection::Name("Water".into()));
        assert_eq!(Selection::parse("Pb\n"), Selection::Name("Pb".into()));
        assert_eq!(
            Selection::parse("99999999999999999999"),
            Selection::Index(i64::MAX)
        );
        assert_eq!(
            Selection::parse("-99999999999999999999"),
            Selection::Index(i64::MIN)
        );
        assert_eq!(Selection::parse("+7"), Selection::Index(7));
        assert_eq!(Selection::parse("12a"), Selection::Name("12a".into()));
        assert_eq!(Selection::parse(""), Selection::Name(String::new()));
    }
}

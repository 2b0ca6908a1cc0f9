use std::collections::{HashMap, HashSet};

use muatten_data::AttenuationDatabase;
use tracing::{debug, warn};

use crate::error::{AttenuationError, Result};
use crate::lookup::{MaterialClass, TableIndex};

/// One line of the human-readable material list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub index: usize,
    pub name: &'a str,
    /// Element symbol; `None` for compounds.
    pub symbol: Option<&'a str>,
    pub class: MaterialClass,
}

/// Immutable, indexed view of an [`AttenuationDatabase`].
///
/// Build it once at startup and pass it by reference; it never changes
/// afterwards. Display indexes enumerate all elements in table order,
/// followed by all compounds.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) data: AttenuationDatabase,
    pub(crate) element_index: TableIndex,
    pub(crate) compound_index: TableIndex,
    symbol_to_element: HashMap<String, usize>,
}

impl Catalog {
    /// Index a database, rejecting duplicated energies, columns, names or
    /// symbols within a material class.
    pub fn from_database(data: AttenuationDatabase) -> Result<Self> {
        let element_index = TableIndex::build(&data.elements, "element table")?;
        let compound_index = TableIndex::build(&data.compounds, "compound table")?;

        let symbol_to_element = index_names(&data, &element_index, &compound_index)?;

        debug!(
            elements = data.element_names.len(),
            compounds = data.compound_names.len(),
            element_energies = data.elements.energies.len(),
            compound_energies = data.compounds.energies.len(),
            "catalog indexed"
        );

        Ok(Catalog {
            data,
            element_index,
            compound_index,
            symbol_to_element,
        })
    }

    /// Access the raw database.
    pub fn raw(&self) -> &AttenuationDatabase {
        &self.data
    }

    pub fn element_count(&self) -> usize {
        self.data.element_names.len()
    }

    pub fn compound_count(&self) -> usize {
        self.data.compound_names.len()
    }

    /// Total number of display indexes (elements plus compounds).
    pub fn len(&self) -> usize {
        self.element_count() + self.compound_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical element name for an exact, case-sensitive symbol.
    pub fn resolve_by_symbol(&self, symbol: &str) -> Result<&str> {
        self.symbol_to_element
            .get(symbol)
            .map(|&i| self.data.element_names[i].name.as_str())
            .ok_or_else(|| AttenuationError::UnknownSymbol(symbol.to_string()))
    }

    /// Canonical name at a display index.
    pub fn resolve_by_index(&self, index: i64) -> Result<&str> {
        let out_of_range = || AttenuationError::IndexOutOfRange {
            index,
            len: self.len(),
        };
        let i = usize::try_from(index).map_err(|_| out_of_range())?;
        let n_elements = self.element_count();
        if i < n_elements {
            Ok(self.data.element_names[i].name.as_str())
        } else {
            self.data
                .compound_names
                .get(i - n_elements)
                .map(|c| c.name.as_str())
                .ok_or_else(out_of_range)
        }
    }

    /// Every material in display order: elements with their symbols, then
    /// compounds.
    pub fn list_catalog(&self) -> Vec<CatalogEntry<'_>> {
        let elements = self
            .data
            .element_names
            .iter()
            .map(|e| (e.name.as_str(), Some(e.symbol.as_str()), MaterialClass::Element));
        let compounds = self
            .data
            .compound_names
            .iter()
            .map(|c| (c.name.as_str(), None, MaterialClass::Compound));

        elements
            .chain(compounds)
            .enumerate()
            .map(|(index, (name, symbol, class))| CatalogEntry {
                index,
                name,
                symbol,
                class,
            })
            .collect()
    }
}

/// Check name and symbol uniqueness and map each symbol to its element position.
fn index_names(
    data: &AttenuationDatabase,
    element_index: &TableIndex,
    compound_index: &TableIndex,
) -> Result<HashMap<String, usize>> {
    let mut symbol_to_element = HashMap::with_capacity(data.element_names.len());
    let mut element_names = HashSet::with_capacity(data.element_names.len());
    for (i, elem) in data.element_names.iter().enumerate() {
        if symbol_to_element.insert(elem.symbol.clone(), i).is_some() {
            return Err(AttenuationError::DataError(format!(
                "duplicate element symbol '{}'",
                elem.symbol
            )));
        }
        if !element_names.insert(elem.name.as_str()) {
            return Err(AttenuationError::DataError(format!(
                "duplicate element name '{}'",
                elem.name
            )));
        }
        if !element_index.has_column(&elem.name) {
            warn!(element = %elem.name, "element has no coefficient column");
        }
    }

    let mut compound_names = HashSet::with_capacity(data.compound_names.len());
    for comp in &data.compound_names {
        if !compound_names.insert(comp.name.as_str()) {
            return Err(AttenuationError::DataError(format!(
                "duplicate compound name '{}'",
                comp.name
            )));
        }
        if !compound_index.has_column(&comp.name) {
            warn!(compound = %comp.name, "compound has no coefficient column");
        }
    }

    Ok(symbol_to_element)
}

// Reference-data catalog: the immutable driver and constructor lists.
//
// Reads two CSV files (drivers with a constructor affiliation column,
// constructors on their own) into an in-memory catalog. Prices are parsed
// through Decimal and must carry at most one decimal place. The catalog is
// loaded once and never mutated; selection code only ever borrows it.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::money::Amount;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A driver available for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub price: Amount,
    /// Constructor affiliation, for display grouping only.
    pub constructor: String,
}

/// A constructor available for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub id: String,
    pub name: String,
    pub price: Amount,
}

/// The full reference catalog handed to the selection operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    drivers: Vec<Driver>,
    constructors: Vec<Constructor>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Driver CSV row. Extra columns (nationality, car number, ...) are absorbed
/// via `#[serde(flatten)]` and ignored.
#[derive(Debug, Deserialize)]
struct RawDriverRow {
    id: String,
    name: String,
    price: Decimal,
    #[serde(alias = "team")]
    constructor: String,
    #[serde(flatten)]
    _extra: std::collections::HashMap<String, serde_json::Value>,
}

/// Constructor CSV row.
#[derive(Debug, Deserialize)]
struct RawConstructorRow {
    id: String,
    name: String,
    price: Decimal,
    #[serde(flatten)]
    _extra: std::collections::HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl Catalog {
    /// Build a catalog from already-constructed entries, validating the
    /// reference-data contract: non-empty unique ids and non-negative prices.
    pub fn new(drivers: Vec<Driver>, constructors: Vec<Constructor>) -> Result<Self, CatalogError> {
        let mut driver_ids = HashSet::new();
        for driver in &drivers {
            if driver.id.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "driver '{}' has an empty id",
                    driver.name
                )));
            }
            if !driver_ids.insert(driver.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate driver id: {}",
                    driver.id
                )));
            }
            if driver.price.is_negative() {
                return Err(CatalogError::Validation(format!(
                    "driver {} has negative price {}",
                    driver.id, driver.price
                )));
            }
        }

        let mut constructor_ids = HashSet::new();
        for constructor in &constructors {
            if constructor.id.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "constructor '{}' has an empty id",
                    constructor.name
                )));
            }
            if !constructor_ids.insert(constructor.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate constructor id: {}",
                    constructor.id
                )));
            }
            if constructor.price.is_negative() {
                return Err(CatalogError::Validation(format!(
                    "constructor {} has negative price {}",
                    constructor.id, constructor.price
                )));
            }
        }

        // Affiliation is display-only, so an unknown constructor id on a
        // driver is tolerated rather than rejected.
        for driver in &drivers {
            if !constructor_ids.contains(driver.constructor.as_str()) {
                warn!(
                    "driver {} references unknown constructor '{}'",
                    driver.id, driver.constructor
                );
            }
        }

        Ok(Catalog {
            drivers,
            constructors,
        })
    }

    /// Load the catalog from the drivers and constructors CSV files.
    pub fn load(
        drivers_path: impl AsRef<Path>,
        constructors_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let drivers = read_drivers(drivers_path.as_ref())?;
        let constructors = read_constructors(constructors_path.as_ref())?;
        Catalog::new(drivers, constructors)
    }

    /// Look up a driver by id.
    pub fn driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// Look up a constructor by id.
    pub fn constructor(&self, id: &str) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.id == id)
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

fn read_drivers(path: &Path) -> Result<Vec<Driver>, CatalogError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: display.clone(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut drivers = Vec::new();
    for row in reader.deserialize::<RawDriverRow>() {
        let row = row.map_err(|e| CatalogError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let price = Amount::try_from(row.price)
            .map_err(|e| CatalogError::Validation(format!("driver {}: {e}", row.id)))?;
        drivers.push(Driver {
            id: row.id,
            name: row.name,
            price,
            constructor: row.constructor,
        });
    }
    Ok(drivers)
}

fn read_constructors(path: &Path) -> Result<Vec<Constructor>, CatalogError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: display.clone(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut constructors = Vec::new();
    for row in reader.deserialize::<RawConstructorRow>() {
        let row = row.map_err(|e| CatalogError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let price = Amount::try_from(row.price)
            .map_err(|e| CatalogError::Validation(format!("constructor {}: {e}", row.id)))?;
        constructors.push(Constructor {
            id: row.id,
            name: row.name,
            price,
        });
    }
    Ok(constructors)
}

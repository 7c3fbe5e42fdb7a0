//! Load revised parameter sets from JSON
//!
//! Any field left out of the file keeps its published default, so a revision
//! file only needs the figures that changed:
//!
//! ```json
//! { "capu": { "death": 39000000 },
//!   "great_invalidity": [ { "period": "Agosto 2025", "amount": 670000.0 } ] }
//! ```

use super::LegalParameters;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl LegalParameters {
    /// Load and validate a parameter set from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let params = Self::from_reader(BufReader::new(file))?;
        info!("Loaded legal parameters from {}", path.as_ref().display());
        Ok(params)
    }

    /// Load and validate a parameter set from any JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let params: LegalParameters = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }
}

/// Parameters from an optional file, falling back to the published defaults
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<LegalParameters> {
    match path {
        Some(p) => LegalParameters::from_json_file(p),
        None => Ok(LegalParameters::default()),
    }
}

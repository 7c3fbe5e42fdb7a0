//! Load claim batches from CSV
//!
//! Expected header:
//! `contingency,base_wage_index,age,disability_percent,in_itinere[,reference_date]`
//! with an empty `disability_percent` for contingencies that take none.
//!
//! Rows are parsed one by one: a row that does not deserialize is returned as
//! an error in its slot and the rest of the batch is still loaded.

use super::CalculationRequest;
use crate::error::{CalcError, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One data row (1-based) and what it parsed to
pub type LoadedClaim = (usize, Result<CalculationRequest>);

/// Load claims from a CSV file
pub fn load_claims<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedClaim>> {
    let file = File::open(path.as_ref())?;
    debug!("Loading claims from {}", path.as_ref().display());
    load_claims_from_reader(file)
}

/// Load claims from any CSV reader.
///
/// Fails as a whole only when the header or the underlying reader fails.
pub fn load_claims_from_reader<R: Read>(reader: R) -> Result<Vec<LoadedClaim>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut claims = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                claims.push((i + 1, Err(e.into())));
                continue;
            }
        };
        let parsed = record
            .deserialize::<CalculationRequest>(Some(&headers))
            .map_err(CalcError::from);
        claims.push((i + 1, parsed));
    }

    let rejected = claims.iter().filter(|(_, c)| c.is_err()).count();
    if rejected > 0 {
        warn!("{} of {} claim rows could not be parsed", rejected, claims.len());
    }
    debug!("Loaded {} claim rows", claims.len());
    Ok(claims)
}

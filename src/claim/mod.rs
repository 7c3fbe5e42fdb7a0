//! Claim data structures, request validation and batch loading

mod data;
pub mod request;
pub mod loader;

pub use data::{CalculationInput, Contingency, ContingencyType};
pub use request::{CalculationRequest, MAX_AGE, MAX_DISABILITY_PERCENT, MIN_AGE, MIN_DISABILITY_PERCENT};
pub use loader::{load_claims, load_claims_from_reader, LoadedClaim};

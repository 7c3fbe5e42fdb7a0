//! SRT Calculator - Compensation estimates for workplace-injury contingencies
//!
//! This library provides:
//! - Typed claim inputs with variant-specific disability percentages
//! - Revisable legal parameters (floor, CAPU table, great invalidity schedule)
//! - The compensation calculator (capital, floor, CAPU, IAPU, total)
//! - Reference index (RIPTE) retrieval with explicit fallback reasons
//! - Plain-text report rendering and the contact link

pub mod error;
pub mod claim;
pub mod parameters;
pub mod calculator;
pub mod index;
pub mod presentation;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use claim::{CalculationInput, CalculationRequest, Contingency, ContingencyType};
pub use parameters::LegalParameters;
pub use calculator::{CalculationResult, CompensationCalculator, FormulaBreakdown};
pub use index::{ResolvedIndex, RipteClient, DEFAULT_REFERENCE_INDEX};

//! Compensation calculator: formula selection and arithmetic per contingency

mod engine;
mod result;

pub use engine::CompensationCalculator;
pub use result::{CalculationResult, FormulaBreakdown, GuidanceNotice, InformationalNotice};

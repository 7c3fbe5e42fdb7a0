//! Claimant-facing request and the range checks applied before calculation
//!
//! The calculator itself only rejects inputs that would break its arithmetic.
//! The narrower ranges a claimant may enter (age 16-100, disability 1-100%)
//! are enforced here, once, for every surface (CLI, batch, HTTP).

use super::{CalculationInput, Contingency, ContingencyType};
use crate::error::{CalcError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Youngest age accepted from a claimant
pub const MIN_AGE: u32 = 16;
/// Oldest age accepted from a claimant
pub const MAX_AGE: u32 = 100;
/// Smallest disability percentage accepted from a claimant
pub const MIN_DISABILITY_PERCENT: f64 = 1.0;
/// Largest disability percentage accepted from a claimant
pub const MAX_DISABILITY_PERCENT: f64 = 100.0;

/// Flat request as entered in a form, a CSV row or a JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub contingency: ContingencyType,

    pub base_wage_index: f64,

    pub age: u32,

    /// Only read for the partial/total contingencies
    #[serde(default)]
    pub disability_percent: Option<f64>,

    #[serde(default)]
    pub in_itinere: bool,

    /// Date of the event (defaults to the day of the calculation)
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

impl CalculationRequest {
    /// Check claimant-entered ranges
    pub fn validate(&self) -> Result<()> {
        if !self.base_wage_index.is_finite() || self.base_wage_index < 0.0 {
            return Err(CalcError::invalid(format!(
                "base wage index must be a non-negative amount, got {}",
                self.base_wage_index
            )));
        }

        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CalcError::invalid(format!(
                "age must be between {} and {}, got {}",
                MIN_AGE, MAX_AGE, self.age
            )));
        }

        if self.contingency.requires_disability() {
            match self.disability_percent {
                None => {
                    return Err(CalcError::invalid(format!(
                        "a disability percentage is required for {}",
                        self.contingency
                    )));
                }
                Some(pct) if !(MIN_DISABILITY_PERCENT..=MAX_DISABILITY_PERCENT).contains(&pct) => {
                    return Err(CalcError::invalid(format!(
                        "disability percentage must be between {} and {}, got {}",
                        MIN_DISABILITY_PERCENT, MAX_DISABILITY_PERCENT, pct
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Validate and turn into a calculator input
    pub fn into_input(self, reference_index: f64, today: NaiveDate) -> Result<CalculationInput> {
        self.validate()?;

        let contingency = Contingency::from_parts(self.contingency, self.disability_percent)
            .ok_or_else(|| CalcError::invalid("missing disability percentage"))?;

        Ok(CalculationInput {
            contingency,
            base_wage_index: self.base_wage_index,
            age: self.age,
            in_itinere: self.in_itinere,
            reference_index,
            reference_date: self.reference_date.unwrap_or(today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn partial_request(pct: Option<f64>) -> CalculationRequest {
        CalculationRequest {
            contingency: ContingencyType::PartialHigh,
            base_wage_index: 100_000.0,
            age: 65,
            disability_percent: pct,
            in_itinere: false,
            reference_date: None,
        }
    }

    #[test]
    fn test_valid_partial_request() {
        let input = partial_request(Some(60.0)).into_input(1.0, today()).unwrap();
        assert_eq!(input.contingency, Contingency::PartialHigh { disability_percent: 60.0 });
        assert_eq!(input.reference_date, today());
        assert_eq!(input.reference_index, 1.0);
    }

    #[test]
    fn test_disability_required_for_partial() {
        let err = partial_request(None).into_input(1.0, today()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
        assert!(format!("{err}").contains("required"));
    }

    #[test]
    fn test_disability_range() {
        assert!(partial_request(Some(0.5)).validate().is_err());
        assert!(partial_request(Some(100.5)).validate().is_err());
        assert!(partial_request(Some(1.0)).validate().is_ok());
        assert!(partial_request(Some(100.0)).validate().is_ok());
    }

    #[test]
    fn test_age_range() {
        let mut req = partial_request(Some(30.0));
        req.age = 15;
        assert!(req.validate().is_err());
        req.age = 101;
        assert!(req.validate().is_err());
        req.age = 16;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_negative_wage_rejected() {
        let mut req = partial_request(Some(30.0));
        req.base_wage_index = -1.0;
        assert!(req.validate().is_err());
        req.base_wage_index = f64::NAN;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_disability_ignored_for_death() {
        let req = CalculationRequest {
            contingency: ContingencyType::Death,
            base_wage_index: 50_000.0,
            age: 40,
            disability_percent: Some(250.0),
            in_itinere: true,
            reference_date: NaiveDate::from_ymd_opt(2025, 5, 2),
        };
        let input = req.into_input(2.0, today()).unwrap();
        assert_eq!(input.contingency, Contingency::Death);
        assert_eq!(input.reference_date, NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
    }

    #[test]
    fn test_request_from_json_defaults() {
        let req: CalculationRequest = serde_json::from_str(
            r#"{"contingency":"ilt","base_wage_index":120000,"age":30}"#,
        )
        .unwrap();
        assert_eq!(req.contingency, ContingencyType::TemporaryIncapacity);
        assert!(!req.in_itinere);
        assert!(req.disability_percent.is_none());
        assert!(req.reference_date.is_none());
    }
}

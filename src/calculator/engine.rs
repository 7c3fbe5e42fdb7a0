//! Formula selection and arithmetic per contingency

use super::result::{CalculationResult, FormulaBreakdown, GuidanceNotice, InformationalNotice};
use crate::claim::{CalculationInput, Contingency, ContingencyType};
use crate::error::{CalcError, Result};
use crate::parameters::LegalParameters;
use log::debug;

/// Stateless calculator over a parameter set.
///
/// `compute` holds no mutable state and may be called from any number of
/// threads at once.
#[derive(Debug, Clone, Default)]
pub struct CompensationCalculator {
    params: LegalParameters,
}

impl CompensationCalculator {
    pub fn new(params: LegalParameters) -> Self {
        Self { params }
    }

    /// Compute the estimate for one claim.
    ///
    /// Great invalidity and temporary incapacity return their notices without
    /// looking at the rest of the input. For formula contingencies the input
    /// must have a non-zero age, a non-negative wage, a positive reference index
    /// and a disability percentage within [0, 100].
    pub fn compute(&self, input: &CalculationInput) -> Result<CalculationResult> {
        let result = match input.contingency {
            Contingency::GreatInvalidity => CalculationResult::Informational(InformationalNotice {
                monthly_table: self.params.great_invalidity.entries().to_vec(),
                guidance: self.params.guidance.great_invalidity.clone(),
            }),
            Contingency::TemporaryIncapacity => CalculationResult::Guidance(GuidanceNotice {
                guidance: self.params.guidance.temporary_incapacity.clone(),
            }),
            Contingency::Death => {
                check_formula_input(input)?;
                CalculationResult::Formula(self.death(input))
            }
            Contingency::PartialLow { disability_percent }
            | Contingency::PartialHigh { disability_percent }
            | Contingency::Total { disability_percent } => {
                check_formula_input(input)?;
                check_disability(disability_percent)?;
                CalculationResult::Formula(self.incapacity(input, disability_percent))
            }
        };

        debug!(
            "{} (age {}, in itinere {}): total {:?}",
            input.contingency.kind().key(),
            input.age,
            input.in_itinere,
            result.total()
        );
        Ok(result)
    }

    fn age_factor(&self, age: u32) -> f64 {
        self.params.reference_age / f64::from(age)
    }

    /// Partial and total permanent incapacity, everything scaled by the percentage
    fn incapacity(&self, input: &CalculationInput, disability_percent: f64) -> FormulaBreakdown {
        let fraction = disability_percent / 100.0;
        let kind = input.contingency.kind();

        let capital = self.params.capital_multiplier
            * input.base_wage_index
            * fraction
            * self.age_factor(input.age);
        let floor_amount = self.params.floor_amount(input.reference_index) * fraction;
        let supplementary_capital = self.params.capu_amount(kind) * fraction;

        self.assemble(capital, floor_amount, supplementary_capital, input.in_itinere)
    }

    /// Death: same shape, no percentage factor
    fn death(&self, input: &CalculationInput) -> FormulaBreakdown {
        let capital = self.params.capital_multiplier * input.base_wage_index * self.age_factor(input.age);
        let floor_amount = self.params.floor_amount(input.reference_index);
        let supplementary_capital = self.params.capu_amount(ContingencyType::Death);

        self.assemble(capital, floor_amount, supplementary_capital, input.in_itinere)
    }

    fn assemble(
        &self,
        capital: f64,
        floor_amount: f64,
        supplementary_capital: f64,
        in_itinere: bool,
    ) -> FormulaBreakdown {
        let base = capital.max(floor_amount);
        let additional_percentage_amount = if in_itinere {
            0.0
        } else {
            self.params.iapu_rate * base
        };

        FormulaBreakdown {
            capital,
            floor_amount,
            supplementary_capital,
            additional_percentage_amount,
            total: base + supplementary_capital + additional_percentage_amount,
        }
    }
}

fn check_formula_input(input: &CalculationInput) -> Result<()> {
    if input.age == 0 {
        return Err(CalcError::invalid("age must be greater than zero"));
    }
    if !input.base_wage_index.is_finite() || input.base_wage_index < 0.0 {
        return Err(CalcError::invalid(format!(
            "base wage index must be non-negative, got {}",
            input.base_wage_index
        )));
    }
    if !input.reference_index.is_finite() || input.reference_index <= 0.0 {
        return Err(CalcError::invalid(format!(
            "reference index must be positive, got {}",
            input.reference_index
        )));
    }
    Ok(())
}

// Zero is accepted and yields a zero capital and floor.
fn check_disability(disability_percent: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&disability_percent) {
        return Err(CalcError::invalid(format!(
            "disability percentage must be within [0, 100], got {}",
            disability_percent
        )));
    }
    Ok(())
}

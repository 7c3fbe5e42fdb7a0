//! Calculation results

use crate::parameters::MonthlyBenefit;
use serde::{Deserialize, Serialize};

/// Monetary breakdown for contingencies with a closed-form amount
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FormulaBreakdown {
    /// Capital from the wage formula (53 x VIB x % x 65/age)
    pub capital: f64,
    /// Legal minimum, scaled by the reference index
    pub floor_amount: f64,
    /// Fixed supplementary capital (CAPU)
    pub supplementary_capital: f64,
    /// Additional percentage amount (IAPU); zero in itinere
    pub additional_percentage_amount: f64,
    pub total: f64,
}

impl FormulaBreakdown {
    /// The greater of capital and floor, which IAPU and the total build on
    pub fn base_amount(&self) -> f64 {
        self.capital.max(self.floor_amount)
    }

    /// Whether the legal floor displaced the formula capital
    pub fn floor_applied(&self) -> bool {
        self.floor_amount > self.capital
    }
}

/// Great invalidity: the curated monthly schedule plus guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationalNotice {
    pub monthly_table: Vec<MonthlyBenefit>,
    pub guidance: String,
}

/// Temporary incapacity: guidance only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceNotice {
    pub guidance: String,
}

/// Outcome of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationResult {
    Formula(FormulaBreakdown),
    Informational(InformationalNotice),
    Guidance(GuidanceNotice),
}

impl CalculationResult {
    pub fn breakdown(&self) -> Option<&FormulaBreakdown> {
        match self {
            CalculationResult::Formula(b) => Some(b),
            _ => None,
        }
    }

    /// Total for formula results
    pub fn total(&self) -> Option<f64> {
        self.breakdown().map(|b| b.total)
    }
}

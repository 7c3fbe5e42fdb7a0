//! Legal and economic parameters of the SRT regime
//!
//! These values are revised periodically by the regulator. The defaults carry
//! the last published figures; a revised set can be loaded from JSON without
//! recompiling.

mod schedule;
pub mod loader;

pub use schedule::{CapuTable, GreatInvalidityTable, Guidance, MonthlyBenefit};

use crate::claim::ContingencyType;
use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

/// Complete parameter set used by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalParameters {
    /// Minimum floor before index scaling (pesos)
    #[serde(default = "default_floor_base")]
    pub floor_base: f64,

    /// Divisor applied together with the reference index to the floor base
    #[serde(default = "default_index_divisor")]
    pub index_divisor: f64,

    /// Multiplier on the base wage index in the capital formula
    #[serde(default = "default_capital_multiplier")]
    pub capital_multiplier: f64,

    /// Age numerator of the age factor (reference_age / age)
    #[serde(default = "default_reference_age")]
    pub reference_age: f64,

    /// Additional percentage (IAPU) on the greater of capital and floor
    #[serde(default = "default_iapu_rate")]
    pub iapu_rate: f64,

    /// Fixed supplementary capital (CAPU) by contingency
    #[serde(default)]
    pub capu: CapuTable,

    /// Curated monthly great invalidity benefit
    #[serde(default)]
    pub great_invalidity: GreatInvalidityTable,

    #[serde(default)]
    pub guidance: Guidance,
}

fn default_floor_base() -> f64 { 55_699_217.0 }
fn default_index_divisor() -> f64 { 100_000.0 }
fn default_capital_multiplier() -> f64 { 53.0 }
fn default_reference_age() -> f64 { 65.0 }
fn default_iapu_rate() -> f64 { 0.20 }

impl Default for LegalParameters {
    fn default() -> Self {
        Self {
            floor_base: default_floor_base(),
            index_divisor: default_index_divisor(),
            capital_multiplier: default_capital_multiplier(),
            reference_age: default_reference_age(),
            iapu_rate: default_iapu_rate(),
            capu: CapuTable::default(),
            great_invalidity: GreatInvalidityTable::default(),
            guidance: Guidance::default(),
        }
    }
}

impl LegalParameters {
    /// Floor scaled by the reference index: floor_base * index / divisor
    pub fn floor_amount(&self, reference_index: f64) -> f64 {
        self.floor_base * reference_index / self.index_divisor
    }

    /// CAPU for a contingency (zero where none applies)
    pub fn capu_amount(&self, contingency: ContingencyType) -> f64 {
        self.capu.amount(contingency)
    }

    /// Reject parameter sets the calculator cannot use
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("floor_base", self.floor_base),
            ("capital_multiplier", self.capital_multiplier),
            ("capu.total", self.capu.total),
            ("capu.partial_high", self.capu.partial_high),
            ("capu.death", self.capu.death),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::parameters(format!("{} must be non-negative, got {}", name, value)));
            }
        }

        if !self.index_divisor.is_finite() || self.index_divisor <= 0.0 {
            return Err(CalcError::parameters(format!(
                "index_divisor must be positive, got {}",
                self.index_divisor
            )));
        }
        if !self.reference_age.is_finite() || self.reference_age <= 0.0 {
            return Err(CalcError::parameters(format!(
                "reference_age must be positive, got {}",
                self.reference_age
            )));
        }
        if !(0.0..=1.0).contains(&self.iapu_rate) {
            return Err(CalcError::parameters(format!(
                "iapu_rate must be within [0, 1], got {}",
                self.iapu_rate
            )));
        }

        self.great_invalidity.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let p = LegalParameters::default();
        assert_eq!(p.floor_base, 55_699_217.0);
        assert_eq!(p.index_divisor, 100_000.0);
        assert_eq!(p.capital_multiplier, 53.0);
        assert_eq!(p.reference_age, 65.0);
        assert_eq!(p.iapu_rate, 0.20);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_floor_amount() {
        let p = LegalParameters::default();
        assert!((p.floor_amount(1.0) - 556.99217).abs() < 1e-9);
        assert!((p.floor_amount(2.0) - 1_113.98434).abs() < 1e-9);
    }

    #[test]
    fn test_capu_amount() {
        let p = LegalParameters::default();
        assert_eq!(p.capu_amount(ContingencyType::Total), 30_944_014.0);
        assert_eq!(p.capu_amount(ContingencyType::PartialHigh), 24_755_211.0);
        assert_eq!(p.capu_amount(ContingencyType::Death), 37_132_805.0);
        assert_eq!(p.capu_amount(ContingencyType::PartialLow), 0.0);
        assert_eq!(p.capu_amount(ContingencyType::GreatInvalidity), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut p = LegalParameters::default();
        p.index_divisor = 0.0;
        assert!(p.validate().is_err());

        let mut p = LegalParameters::default();
        p.iapu_rate = 1.5;
        assert!(p.validate().is_err());

        let mut p = LegalParameters::default();
        p.capu.death = -1.0;
        assert!(p.validate().is_err());
    }
}

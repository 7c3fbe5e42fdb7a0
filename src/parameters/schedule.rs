//! Fixed amounts and curated tables: CAPU, great invalidity, guidance

use crate::claim::ContingencyType;
use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

/// Supplementary capital (CAPU) by contingency, before disability scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapuTable {
    /// Total incapacity (66% and above)
    pub total: f64,
    /// Partial incapacity 51-65%
    pub partial_high: f64,
    pub death: f64,
}

impl Default for CapuTable {
    fn default() -> Self {
        Self {
            total: 30_944_014.0,
            partial_high: 24_755_211.0,
            death: 37_132_805.0,
        }
    }
}

impl CapuTable {
    /// Amount for a contingency; zero for contingencies without CAPU
    pub fn amount(&self, contingency: ContingencyType) -> f64 {
        match contingency {
            ContingencyType::Total => self.total,
            ContingencyType::PartialHigh => self.partial_high,
            ContingencyType::Death => self.death,
            _ => 0.0,
        }
    }
}

/// One row of the great invalidity schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBenefit {
    /// Period label, e.g. "Mayo 2025"
    pub period: String,
    /// Monthly amount in pesos
    pub amount: f64,
}

impl MonthlyBenefit {
    pub fn new(period: impl Into<String>, amount: f64) -> Self {
        Self { period: period.into(), amount }
    }
}

/// Monthly great invalidity benefit by period, in publication order.
///
/// There is no formula behind these figures; they are copied from the
/// regulator's updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GreatInvalidityTable {
    entries: Vec<MonthlyBenefit>,
}

impl Default for GreatInvalidityTable {
    fn default() -> Self {
        Self {
            entries: vec![
                MonthlyBenefit::new("Mayo 2025", 631_286.10),
                MonthlyBenefit::new("Junio 2025", 648_835.85),
                MonthlyBenefit::new("Julio 2025", 658_568.39),
            ],
        }
    }
}

impl GreatInvalidityTable {
    pub fn from_entries(entries: Vec<MonthlyBenefit>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MonthlyBenefit] {
        &self.entries
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if entry.period.trim().is_empty() {
                return Err(CalcError::parameters("great invalidity period label is empty"));
            }
            if !entry.amount.is_finite() || entry.amount < 0.0 {
                return Err(CalcError::parameters(format!(
                    "great invalidity amount for {} must be non-negative, got {}",
                    entry.period, entry.amount
                )));
            }
        }
        Ok(())
    }
}

/// Guidance shown for contingencies without a closed-form amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guidance {
    pub great_invalidity: String,
    pub temporary_incapacity: String,
}

impl Default for Guidance {
    fn default() -> Self {
        Self {
            great_invalidity: "La prestación es mensual y se actualiza periódicamente. No hay fórmula única."
                .to_string(),
            temporary_incapacity: "La ART debe abonar el salario completo conforme Art. 208 LCT + aumentos \
                según convenios o aumentos generales.\nUsar promedio de salarios últimos 6 meses si son variables."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_great_invalidity_order() {
        let table = GreatInvalidityTable::default();
        let periods: Vec<&str> = table.entries().iter().map(|e| e.period.as_str()).collect();
        assert_eq!(periods, vec!["Mayo 2025", "Junio 2025", "Julio 2025"]);
        assert_eq!(table.entries().last().map(|e| e.amount), Some(658_568.39));
    }

    #[test]
    fn test_great_invalidity_validation() {
        let bad = GreatInvalidityTable::from_entries(vec![MonthlyBenefit::new(" ", 1.0)]);
        assert!(bad.validate().is_err());
        let negative = GreatInvalidityTable::from_entries(vec![MonthlyBenefit::new("Agosto 2025", -5.0)]);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_temporary_guidance_mentions_lct() {
        let guidance = Guidance::default();
        assert!(guidance.temporary_incapacity.contains("Art. 208 LCT"));
        assert!(guidance.temporary_incapacity.contains("6 meses"));
    }
}

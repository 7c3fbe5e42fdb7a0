//! Claim inputs for a single compensation estimate

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contingency recognised by the SRT regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContingencyType {
    /// Permanent partial incapacity up to 50%
    PartialLow,
    /// Permanent partial incapacity between 51% and 65%
    PartialHigh,
    /// Permanent total incapacity (66% and above)
    Total,
    /// Great invalidity, paid as a monthly benefit
    GreatInvalidity,
    /// Death of the worker
    Death,
    /// Temporary incapacity (ILT), paid as salary by the insurer
    #[serde(alias = "ilt")]
    TemporaryIncapacity,
}

impl ContingencyType {
    pub const ALL: [ContingencyType; 6] = [
        ContingencyType::PartialLow,
        ContingencyType::PartialHigh,
        ContingencyType::Total,
        ContingencyType::GreatInvalidity,
        ContingencyType::Death,
        ContingencyType::TemporaryIncapacity,
    ];

    /// Whether this contingency takes a disability percentage
    pub fn requires_disability(&self) -> bool {
        matches!(
            self,
            ContingencyType::PartialLow | ContingencyType::PartialHigh | ContingencyType::Total
        )
    }

    /// Whether the reference index enters the amount (formula contingencies)
    pub fn uses_reference_index(&self) -> bool {
        self.requires_disability() || *self == ContingencyType::Death
    }

    /// Machine name, as accepted by [`FromStr`] and the CSV/JSON loaders
    pub fn key(&self) -> &'static str {
        match self {
            ContingencyType::PartialLow => "partial_low",
            ContingencyType::PartialHigh => "partial_high",
            ContingencyType::Total => "total",
            ContingencyType::GreatInvalidity => "great_invalidity",
            ContingencyType::Death => "death",
            ContingencyType::TemporaryIncapacity => "temporary_incapacity",
        }
    }

    /// Label shown to claimants
    pub fn as_str(&self) -> &'static str {
        match self {
            ContingencyType::PartialLow => "ILP parcial (≤ 50%)",
            ContingencyType::PartialHigh => "ILP parcial (51–65%)",
            ContingencyType::Total => "ILP total (≥ 66%)",
            ContingencyType::GreatInvalidity => "Gran invalidez",
            ContingencyType::Death => "Fallecimiento",
            ContingencyType::TemporaryIncapacity => "Incapacidad Laboral Temporaria (ILT)",
        }
    }
}

impl fmt::Display for ContingencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContingencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "ilt" {
            return Ok(ContingencyType::TemporaryIncapacity);
        }
        ContingencyType::ALL
            .iter()
            .find(|c| c.key() == normalized)
            .copied()
            .ok_or_else(|| {
                let keys: Vec<&str> = ContingencyType::ALL.iter().map(|c| c.key()).collect();
                format!("unknown contingency '{}', expected one of: {}", s, keys.join(", "))
            })
    }
}

/// Contingency with the data only some variants carry.
///
/// The disability percentage lives on the partial/total variants so a death or
/// great invalidity claim cannot be built with one, and a partial claim cannot
/// be built without one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Contingency {
    PartialLow { disability_percent: f64 },
    PartialHigh { disability_percent: f64 },
    Total { disability_percent: f64 },
    GreatInvalidity,
    Death,
    TemporaryIncapacity,
}

impl Contingency {
    /// Build from a contingency kind and an optional percentage.
    ///
    /// Returns `None` when a partial/total kind is given no percentage. A
    /// percentage supplied for any other kind is dropped.
    pub fn from_parts(kind: ContingencyType, disability_percent: Option<f64>) -> Option<Self> {
        match kind {
            ContingencyType::PartialLow => {
                disability_percent.map(|disability_percent| Contingency::PartialLow { disability_percent })
            }
            ContingencyType::PartialHigh => {
                disability_percent.map(|disability_percent| Contingency::PartialHigh { disability_percent })
            }
            ContingencyType::Total => {
                disability_percent.map(|disability_percent| Contingency::Total { disability_percent })
            }
            ContingencyType::GreatInvalidity => Some(Contingency::GreatInvalidity),
            ContingencyType::Death => Some(Contingency::Death),
            ContingencyType::TemporaryIncapacity => Some(Contingency::TemporaryIncapacity),
        }
    }

    pub fn kind(&self) -> ContingencyType {
        match self {
            Contingency::PartialLow { .. } => ContingencyType::PartialLow,
            Contingency::PartialHigh { .. } => ContingencyType::PartialHigh,
            Contingency::Total { .. } => ContingencyType::Total,
            Contingency::GreatInvalidity => ContingencyType::GreatInvalidity,
            Contingency::Death => ContingencyType::Death,
            Contingency::TemporaryIncapacity => ContingencyType::TemporaryIncapacity,
        }
    }

    pub fn disability_percent(&self) -> Option<f64> {
        match self {
            Contingency::PartialLow { disability_percent }
            | Contingency::PartialHigh { disability_percent }
            | Contingency::Total { disability_percent } => Some(*disability_percent),
            _ => None,
        }
    }
}

/// Everything the calculator needs for one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub contingency: Contingency,

    /// Base wage index (VIB, RIPTE-adjusted), in pesos
    pub base_wage_index: f64,

    /// Age at the first disabling manifestation
    pub age: u32,

    /// Accident during the commute; disqualifies the IAPU
    pub in_itinere: bool,

    /// Reference index (RIPTE) used to scale the legal floor
    pub reference_index: f64,

    /// Date of the event. Informational only.
    pub reference_date: NaiveDate,
}

impl CalculationInput {
    /// Create an input dated today, not in itinere, with the default reference index
    pub fn new(contingency: Contingency, base_wage_index: f64, age: u32) -> Self {
        Self {
            contingency,
            base_wage_index,
            age,
            in_itinere: false,
            reference_index: crate::index::DEFAULT_REFERENCE_INDEX,
            reference_date: Local::now().date_naive(),
        }
    }

    pub fn in_itinere(mut self, in_itinere: bool) -> Self {
        self.in_itinere = in_itinere;
        self
    }

    pub fn with_reference_index(mut self, reference_index: f64) -> Self {
        self.reference_index = reference_index;
        self
    }

    pub fn on(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }
}

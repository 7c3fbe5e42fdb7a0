//! Plain-text rendering of calculation results

use crate::calculator::{CalculationResult, FormulaBreakdown};
use crate::claim::ContingencyType;
use crate::index::ResolvedIndex;
use std::fmt;

/// Format an amount as `$1,234,567.89`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, dec_part)
}

fn heading(contingency: ContingencyType) -> &'static str {
    match contingency {
        ContingencyType::PartialLow | ContingencyType::PartialHigh | ContingencyType::Total => "Resultado ILP",
        ContingencyType::Death => "Resultado Fallecimiento",
        ContingencyType::GreatInvalidity => "Gran Invalidez",
        ContingencyType::TemporaryIncapacity => "ILT (Incapacidad Temporaria)",
    }
}

/// Claimant-facing report for one result
pub struct Report<'a> {
    pub contingency: ContingencyType,
    pub result: &'a CalculationResult,
    pub index: &'a ResolvedIndex,
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, b: &FormulaBreakdown) -> fmt::Result {
    writeln!(f, "Capital SRT: {}", format_currency(b.capital))?;
    writeln!(f, "Piso mínimo: {}", format_currency(b.floor_amount))?;
    writeln!(f, "CAPU: {}", format_currency(b.supplementary_capital))?;
    writeln!(f, "IAPU: {}", format_currency(b.additional_percentage_amount))?;
    writeln!(f, "Total estimado: {}", format_currency(b.total))
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", heading(self.contingency))?;

        match self.result {
            CalculationResult::Formula(b) => write_breakdown(f, b)?,
            CalculationResult::Informational(notice) => {
                for row in &notice.monthly_table {
                    writeln!(f, "{}: {} por mes", row.period, format_currency(row.amount))?;
                }
                writeln!(f, "{}", notice.guidance)?;
            }
            CalculationResult::Guidance(notice) => writeln!(f, "{}", notice.guidance)?,
        }

        if let Some(note) = self.index.fallback_note() {
            writeln!(f, "Nota: {}", note)?;
        }
        Ok(())
    }
}

/// Render a result the way it is shown to the claimant
pub fn render_report(contingency: ContingencyType, result: &CalculationResult, index: &ResolvedIndex) -> String {
    Report { contingency, result, index }.to_string()
}

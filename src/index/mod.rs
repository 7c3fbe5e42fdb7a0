//! Reference index (RIPTE) lookup
//!
//! The calculator only ever sees a plain number. This module fetches it and,
//! on any failure, substitutes [`DEFAULT_REFERENCE_INDEX`] while keeping the
//! reason so callers can tell the claimant the default was used.

mod client;

pub use client::{parse_latest, IndexConfig, IndexFetchError, RipteClient, DEFAULT_INDEX_URL};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index used whenever the live value cannot be obtained
pub const DEFAULT_REFERENCE_INDEX: f64 = 1.0;

/// Why the default index was used. `Display` is claimant-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No API token configured, lookup not attempted
    NotConfigured,
    Timeout,
    /// Service answered with a non-success status
    Status { code: u16 },
    /// Connection or transport failure
    Network,
    /// Body was not a usable series
    Malformed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "sin token de API configurado"),
            FallbackReason::Timeout => write!(f, "la consulta excedió el tiempo de espera"),
            FallbackReason::Status { code } => write!(f, "el servicio respondió HTTP {}", code),
            FallbackReason::Network => write!(f, "error de red"),
            FallbackReason::Malformed => write!(f, "respuesta con formato inesperado"),
        }
    }
}

/// Where the index value came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum IndexSource {
    Live,
    /// Supplied by the caller, lookup skipped
    Manual,
    /// The contingency has no formula, lookup skipped
    NotApplicable,
    Fallback(FallbackReason),
}

/// Reference index ready to hand to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIndex {
    pub value: f64,
    pub source: IndexSource,
}

impl ResolvedIndex {
    pub fn live(value: f64) -> Self {
        Self { value, source: IndexSource::Live }
    }

    pub fn manual(value: f64) -> Self {
        Self { value, source: IndexSource::Manual }
    }

    /// Placeholder for contingencies whose result does not depend on the index
    pub fn not_applicable() -> Self {
        Self { value: DEFAULT_REFERENCE_INDEX, source: IndexSource::NotApplicable }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self { value: DEFAULT_REFERENCE_INDEX, source: IndexSource::Fallback(reason) }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, IndexSource::Fallback(_))
    }

    /// Note for the claimant when the default index was used
    pub fn fallback_note(&self) -> Option<String> {
        match self.source {
            IndexSource::Fallback(reason) => Some(format!(
                "Se usa el índice RIPTE por defecto {:.1} ({}).",
                DEFAULT_REFERENCE_INDEX, reason
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_default_value() {
        let idx = ResolvedIndex::fallback(FallbackReason::Timeout);
        assert_eq!(idx.value, DEFAULT_REFERENCE_INDEX);
        assert!(idx.is_fallback());
        let note = idx.fallback_note().unwrap();
        assert!(note.contains("por defecto"));
        assert!(note.contains("tiempo de espera"));
    }

    #[test]
    fn test_live_and_manual_have_no_note() {
        assert!(ResolvedIndex::live(1234.5).fallback_note().is_none());
        assert!(ResolvedIndex::manual(2.0).fallback_note().is_none());
        assert!(ResolvedIndex::not_applicable().fallback_note().is_none());
        assert!(!ResolvedIndex::not_applicable().is_fallback());
    }

    #[test]
    fn test_status_reason_display() {
        let reason = FallbackReason::Status { code: 401 };
        assert_eq!(reason.to_string(), "el servicio respondió HTTP 401");
    }

    #[test]
    fn test_source_json_shape() {
        let json = serde_json::to_value(ResolvedIndex::fallback(FallbackReason::Status { code: 503 })).unwrap();
        assert_eq!(json["value"], 1.0);
        assert_eq!(json["source"]["source"], "fallback");
        assert_eq!(json["source"]["reason"], "status");
        assert_eq!(json["source"]["code"], 503);
    }
}

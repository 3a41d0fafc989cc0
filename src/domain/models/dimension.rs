/// The six decision-quality dimensions and the per-session coverage map.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the six aspects a coaching message is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Is the decision being framed well — the right problem, the right scope?
    Framing,
    /// Are genuinely different alternatives on the table?
    Alternatives,
    /// Is relevant, reliable information being gathered?
    Information,
    /// Are the decider's values and trade-offs explicit?
    Values,
    /// Is the reasoning from information to choice sound?
    Reasoning,
    /// Is there commitment to act on the choice?
    Commitment,
}

impl Dimension {
    /// All six dimensions in canonical order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Framing,
        Dimension::Alternatives,
        Dimension::Information,
        Dimension::Values,
        Dimension::Reasoning,
        Dimension::Commitment,
    ];

    /// Stable lowercase key used in wire payloads and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Framing => "framing",
            Dimension::Alternatives => "alternatives",
            Dimension::Information => "information",
            Dimension::Values => "values",
            Dimension::Reasoning => "reasoning",
            Dimension::Commitment => "commitment",
        }
    }

    /// Parses a dimension from its wire key, case-insensitively.
    ///
    /// Returns `None` for unrecognized keys; callers treat those as
    /// untrusted input to be discarded, not as errors.
    pub fn from_key(key: &str) -> Option<Dimension> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(key.trim()))
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sticky per-session record of which dimensions have been adequately
/// addressed. Flags only ever move false -> true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageMap {
    flags: HashMap<Dimension, bool>,
}

impl CoverageMap {
    /// Creates a coverage map with all six dimensions unaddressed.
    pub fn new() -> Self {
        Self {
            flags: Dimension::ALL.into_iter().map(|d| (d, false)).collect(),
        }
    }

    /// Marks a dimension as addressed for the remainder of the session.
    pub fn mark(&mut self, dimension: Dimension) {
        self.flags.insert(dimension, true);
    }

    /// Returns whether a dimension has ever been addressed.
    pub fn is_covered(&self, dimension: Dimension) -> bool {
        self.flags.get(&dimension).copied().unwrap_or(false)
    }

    /// Returns whether all six dimensions have been addressed.
    pub fn all_covered(&self) -> bool {
        Dimension::ALL.into_iter().all(|d| self.is_covered(d))
    }

    /// Dimensions addressed so far, in canonical order.
    pub fn completed(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.is_covered(*d))
            .collect()
    }

    /// Dimensions never addressed, in canonical order.
    pub fn missed(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| !self.is_covered(*d))
            .collect()
    }
}

impl Default for CoverageMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_round_trip() {
        for dimension in Dimension::ALL {
            assert_eq!(Dimension::from_key(dimension.as_str()), Some(dimension));
        }
    }

    #[test]
    fn test_from_key_case_insensitive() {
        assert_eq!(Dimension::from_key("Framing"), Some(Dimension::Framing));
        assert_eq!(Dimension::from_key("  REASONING "), Some(Dimension::Reasoning));
        assert_eq!(Dimension::from_key("vibes"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Dimension::Alternatives).unwrap();
        assert_eq!(json, "\"alternatives\"");
        let parsed: Dimension = serde_json::from_str("\"commitment\"").unwrap();
        assert_eq!(parsed, Dimension::Commitment);
    }

    #[test]
    fn test_coverage_starts_empty() {
        let coverage = CoverageMap::new();
        assert!(!coverage.all_covered());
        assert_eq!(coverage.completed(), vec![]);
        assert_eq!(coverage.missed().len(), 6);
    }

    #[test]
    fn test_coverage_is_sticky() {
        let mut coverage = CoverageMap::new();
        coverage.mark(Dimension::Framing);
        coverage.mark(Dimension::Framing);
        assert!(coverage.is_covered(Dimension::Framing));
        assert_eq!(coverage.completed(), vec![Dimension::Framing]);
        assert_eq!(coverage.missed().len(), 5);
    }

    #[test]
    fn test_all_covered() {
        let mut coverage = CoverageMap::new();
        for dimension in Dimension::ALL {
            assert!(!coverage.all_covered());
            coverage.mark(dimension);
        }
        assert!(coverage.all_covered());
    }
}

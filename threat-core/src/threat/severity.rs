//! Threat Severity
//!
//! Four ordered impact levels plus the fixed presentation mapping
//! (color, display text) consumed by display layers.

use serde::{Deserialize, Serialize};

/// Threat severity levels, ordered Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Testing environments (emulators)
    Low,
    /// Risky configuration, default for unknown codes
    Medium,
    /// Active interception or tampering risk
    High,
    /// App can no longer be trusted
    Critical,
}

impl Severity {
    /// All levels in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "#28a745",      // Green
            Severity::Medium => "#ffc107",   // Yellow
            Severity::High => "#fd7e14",     // Orange
            Severity::Critical => "#dc3545", // Red
        }
    }

    /// Capitalized label for display
    pub fn display_text(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn test_presentation_mapping() {
        assert_eq!(Severity::Low.color(), "#28a745");
        assert_eq!(Severity::Critical.color(), "#dc3545");
        assert_eq!(Severity::High.display_text(), "High");
        assert_eq!(Severity::Medium.to_string(), "medium");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: Severity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Severity::Low);
    }
}

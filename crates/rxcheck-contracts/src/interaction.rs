//! Interaction record and severity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal interaction risk classification.
///
/// Variants are declared from lowest to highest risk so the derived `Ord`
/// matches clinical ordering: `None < Mild < Moderate < Severe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Lowercase identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    /// Badge label shown on a result card.
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "NO KNOWN INTERACTION",
            Severity::Mild => "MILD",
            Severity::Moderate => "MODERATE",
            Severity::Severe => "SEVERE",
        }
    }

    /// Single-glyph marker shown beside the label.
    pub fn icon(self) -> &'static str {
        match self {
            Severity::None => "✓",
            Severity::Mild => "●",
            Severity::Moderate => "◆",
            Severity::Severe => "⚠",
        }
    }

    /// Number of filled indicator bars out of [`Severity::MAX_LEVEL`].
    ///
    /// `None` still lights one bar so the card never renders empty.
    pub fn level(self) -> u8 {
        match self {
            Severity::None | Severity::Mild => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
        }
    }

    pub const MAX_LEVEL: u8 = 3;
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One known interaction between two drugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub severity: Severity,
    /// Mechanism and clinical effect of the interaction.
    pub description: String,
    /// What the prescriber or patient should do about it.
    pub recommendation: String,
}

/// Text shown when a searched pair has no record.
pub const NO_INTERACTION_TEXT: &str = "No known significant interaction between these \
medications. However, always consult with your healthcare provider or pharmacist before \
combining medications.";

/// Disclaimer shown beneath every result card.
pub const DISCLAIMER_TEXT: &str = "This information is for educational purposes only and \
should not replace professional medical advice. Always consult your healthcare provider.";

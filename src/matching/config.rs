//! Matching calibration: similarity weights and acceptance thresholds.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Complete calibration for the entity matcher and the body-based detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingConfig {
    pub weights: SimilarityWeights,
    pub thresholds: MatchThresholds,
}

/// Named weights of every score component.
///
/// Weights within one declaration kind are normalized at scoring time, so
/// they need not sum to 1.0. A component whose comparison is empty on both
/// sides (two empty bodies, two classes without members) is left out of
/// the weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SimilarityWeights {
    /// Method: identifier similarity
    pub method_name: f64,
    /// Method: parameter-type sequence and return type
    pub method_signature: f64,
    /// Method: body token similarity
    pub method_body: f64,
    /// Share of the signature score given by return-type equality
    #[schemars(range(min = 0.0, max = 1.0))]
    pub return_type_bonus: f64,

    /// Class: Jaccard similarity of member names
    pub class_members: f64,
    /// Class: identifier similarity
    pub class_name: f64,
    /// Class: overlap of declared super types
    pub class_hierarchy: f64,
    /// Multiplier applied when the class kinds differ
    #[schemars(range(min = 0.0, max = 1.0))]
    pub kind_mismatch_factor: f64,

    /// Field: identifier similarity
    pub field_name: f64,
    /// Field: type signature equality
    pub field_type: f64,
    /// Field: initializer token similarity
    pub field_initializer: f64,
}

/// Acceptance thresholds. Similarity matches need a score strictly above
/// the class/method/field threshold; extract/inline overlap is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchThresholds {
    #[schemars(range(min = 0.0, max = 1.0))]
    pub class: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub method: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub field: f64,
    /// Minimum body overlap for extract/inline method and supertype extraction
    #[schemars(range(min = 0.0, max = 1.0))]
    pub extract_overlap: f64,
}

impl SimilarityWeights {
    /// Body similarity dominates methods, member sets dominate classes.
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            method_name: 0.25,
            method_signature: 0.15,
            method_body: 0.60,
            return_type_bonus: 0.20,
            class_members: 0.55,
            class_name: 0.25,
            class_hierarchy: 0.20,
            kind_mismatch_factor: 0.5,
            field_name: 0.50,
            field_type: 0.25,
            field_initializer: 0.25,
        }
    }

    /// Weights that lean harder on names, for codebases with short bodies.
    #[must_use]
    pub const fn name_focused() -> Self {
        Self {
            method_name: 0.40,
            method_signature: 0.20,
            method_body: 0.40,
            return_type_bonus: 0.20,
            class_members: 0.45,
            class_name: 0.40,
            class_hierarchy: 0.15,
            kind_mismatch_factor: 0.5,
            field_name: 0.60,
            field_type: 0.25,
            field_initializer: 0.15,
        }
    }

    /// Sum of the method component weights.
    #[must_use]
    pub fn method_total(&self) -> f64 {
        self.method_name + self.method_signature + self.method_body
    }

    #[must_use]
    pub fn class_total(&self) -> f64 {
        self.class_members + self.class_name + self.class_hierarchy
    }

    #[must_use]
    pub fn field_total(&self) -> f64 {
        self.field_name + self.field_type + self.field_initializer
    }

    /// All weights with their names, for validation messages.
    #[must_use]
    pub fn named(&self) -> [(&'static str, f64); 11] {
        [
            ("method_name", self.method_name),
            ("method_signature", self.method_signature),
            ("method_body", self.method_body),
            ("return_type_bonus", self.return_type_bonus),
            ("class_members", self.class_members),
            ("class_name", self.class_name),
            ("class_hierarchy", self.class_hierarchy),
            ("kind_mismatch_factor", self.kind_mismatch_factor),
            ("field_name", self.field_name),
            ("field_type", self.field_type),
            ("field_initializer", self.field_initializer),
        ]
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

impl MatchThresholds {
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            class: 0.5,
            method: 0.6,
            field: 0.6,
            extract_overlap: 0.8,
        }
    }

    #[must_use]
    pub const fn strict() -> Self {
        Self {
            class: 0.7,
            method: 0.75,
            field: 0.75,
            extract_overlap: 0.9,
        }
    }

    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            class: 0.4,
            method: 0.5,
            field: 0.5,
            extract_overlap: 0.7,
        }
    }

    /// All thresholds with their names, for validation messages.
    #[must_use]
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("class", self.class),
            ("method", self.method),
            ("field", self.field),
            ("extract_overlap", self.extract_overlap),
        ]
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self::balanced()
    }
}

impl MatchingConfig {
    /// Fewer, higher-confidence matches
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            weights: SimilarityWeights::balanced(),
            thresholds: MatchThresholds::strict(),
        }
    }

    /// Default calibration
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            weights: SimilarityWeights::balanced(),
            thresholds: MatchThresholds::balanced(),
        }
    }

    /// More matches at lower confidence, useful for heavily rewritten code
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            weights: SimilarityWeights::name_focused(),
            thresholds: MatchThresholds::permissive(),
        }
    }

    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Create config from a preset name.
    ///
    /// Supported presets: "strict", "balanced", "permissive".
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "strict" => Some(Self::strict()),
            "balanced" | "default" => Some(Self::balanced()),
            "permissive" => Some(Self::permissive()),
            _ => None,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

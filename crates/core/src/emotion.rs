//! Fixed emotion vocabulary for the annotation dataset.
//!
//! Every label in the source files is drawn from seven categories. The
//! declaration order of [`Emotion`] is the canonical vocabulary order; it
//! drives tie-breaking during label resolution and the stable category
//! ordering of aggregated counts.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of categories in the fixed emotion vocabulary.
pub const VOCABULARY_SIZE: usize = 7;

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

/// One of the seven annotation categories.
///
/// Declared in canonical vocabulary order: `angry, sad, happy, disgust,
/// fear, surprise, neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Angry,
    Sad,
    Happy,
    Disgust,
    Fear,
    Surprise,
    Neutral,
}

impl Emotion {
    /// All emotions in canonical vocabulary order.
    pub const ALL: [Emotion; VOCABULARY_SIZE] = [
        Self::Angry,
        Self::Sad,
        Self::Happy,
        Self::Disgust,
        Self::Fear,
        Self::Surprise,
        Self::Neutral,
    ];

    /// Return the emotion as its lowercase label token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Disgust => "disgust",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }

    /// Parse a label token. Returns `None` for tokens outside the vocabulary.
    ///
    /// Matching is exact; the source files carry lowercase tokens and any
    /// other casing is a data error.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "angry" => Some(Self::Angry),
            "sad" => Some(Self::Sad),
            "happy" => Some(Self::Happy),
            "disgust" => Some(Self::Disgust),
            "fear" => Some(Self::Fear),
            "surprise" => Some(Self::Surprise),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Position in the canonical vocabulary order (0-based).
    ///
    /// The lower rank wins when label resolution breaks a frequency tie.
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

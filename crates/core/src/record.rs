//! Row types for per-segment annotations.
//!
//! A [`RawAnnotationRow`] is the pre-resolution form read straight out of a
//! label file; its emotion field may still hold several tied tokens. An
//! [`AnnotationRecord`] is the resolved form with exactly one label, and is
//! the only form the aggregation and filtering operations accept. Raw rows
//! are produced once per load and never mutated; records are derived from
//! them, not rewritten in place.

use crate::emotion::Emotion;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest valid arousal / valence rating.
pub const SCALE_MIN: i16 = 1;

/// Highest valid arousal / valence rating.
pub const SCALE_MAX: i16 = 5;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One row of a label file before multi-label resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawAnnotationRow {
    /// 1-based line number in the source text; the header is line 1.
    pub line: usize,
    pub segment_id: String,
    pub arousal: i16,
    pub valence: i16,
    /// Tied top-voted emotion tokens, in file order. Split from the
    /// semicolon-joined source field; not yet checked against the vocabulary.
    pub emotion_raw: Vec<String>,
}

/// One resolved annotation: a segment with exactly one emotion label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Unique segment identifier, `SessNN_<context>_<subjectcode>` form.
    pub segment_id: String,
    /// Arousal rating in `SCALE_MIN..=SCALE_MAX`.
    pub arousal: i16,
    /// Valence rating in `SCALE_MIN..=SCALE_MAX`.
    pub valence: i16,
    pub emotion: Emotion,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Whether a rating lies on the 1..=5 annotation scale.
pub fn scale_in_range(value: i16) -> bool {
    (SCALE_MIN..=SCALE_MAX).contains(&value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

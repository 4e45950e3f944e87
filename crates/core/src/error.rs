//! Error types for dataset loading and per-row rejection accounting.
//!
//! Failures split into two severities, mirroring how the analysis views must
//! behave: a [`LoadError`] is fatal to the whole load (missing file, broken
//! header), while a [`RowIssue`] records one rejected row so the rest of the
//! dataset stays usable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Load errors (fatal)
// ---------------------------------------------------------------------------

/// Fatal failure while loading an annotation table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read annotation file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input had no header line.
    #[error("Annotation table is empty")]
    Empty,

    /// A required column is absent from the header.
    #[error("Required column '{0}' is missing from the header")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Row issues (recoverable)
// ---------------------------------------------------------------------------

/// Why a single row was excluded from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIssueKind {
    /// An emotion token outside the fixed vocabulary.
    UnknownLabel,
    /// The emotion field held no tokens at all.
    EmptyLabel,
    /// Arousal or valence parsed as an integer but fell outside 1..=5.
    ScaleOutOfRange,
    /// Arousal or valence was not an integer.
    BadScaleValue,
    /// The segment id already appeared on an earlier row.
    DuplicateSegment,
}

impl RowIssueKind {
    /// Return the issue kind as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownLabel => "unknown_label",
            Self::EmptyLabel => "empty_label",
            Self::ScaleOutOfRange => "scale_out_of_range",
            Self::BadScaleValue => "bad_scale_value",
            Self::DuplicateSegment => "duplicate_segment",
        }
    }

    /// Parse an issue kind string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unknown_label" => Some(Self::UnknownLabel),
            "empty_label" => Some(Self::EmptyLabel),
            "scale_out_of_range" => Some(Self::ScaleOutOfRange),
            "bad_scale_value" => Some(Self::BadScaleValue),
            "duplicate_segment" => Some(Self::DuplicateSegment),
            _ => None,
        }
    }

    /// All valid issue kind values.
    pub const ALL: &'static [&'static str] = &[
        "unknown_label",
        "empty_label",
        "scale_out_of_range",
        "bad_scale_value",
        "duplicate_segment",
    ];
}

impl std::fmt::Display for RowIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected row, kept as data so callers can report exclusion totals
/// without aborting the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based line number in the source text; the header is line 1.
    pub line: usize,
    /// Segment id as it appeared on the row (may be empty if the cell was).
    pub segment_id: String,
    pub kind: RowIssueKind,
    /// The offending value, for display.
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

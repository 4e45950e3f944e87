//! Label resolution and aggregation for a multimodal emotion-annotation
//! corpus.
//!
//! This crate owns the data path between raw per-segment label files and
//! whatever renders them:
//!
//! - [`AnnotationDataset`] — load a delimited label file, validate rows,
//!   resolve tied emotion votes, and keep the exclusion report.
//! - [`Emotion`] — the fixed 7-category vocabulary in canonical order.
//! - [`segment`] — session / subject code extraction and substring
//!   filtering over segment ids.
//! - [`resolve`] — the two-pass, frequency-based tie-break for tied votes.
//! - [`aggregate`] — per-category counts for chart rendering.
//!
//! Everything is synchronous; a loaded dataset is immutable and can be
//! shared as-is across concurrent viewer sessions.

pub mod aggregate;
pub mod dataset;
pub mod emotion;
pub mod error;
pub mod record;
pub mod resolve;
pub mod segment;
pub mod table;

pub use aggregate::{emotion_counts, CategoryCount};
pub use dataset::{AnnotationDataset, LoadReport, SliceView};
pub use emotion::Emotion;
pub use error::{LoadError, RowIssue, RowIssueKind};
pub use record::{AnnotationRecord, RawAnnotationRow};
pub use resolve::{resolve_label, FrequencyTable, LabelError};
pub use segment::{filter_by_code, session_code, session_codes, subject_code, subject_codes};

//! Dataset loading, exclusion accounting, and view assembly.
//!
//! One [`AnnotationDataset`] is produced per label file: the loader parses
//! the table, validates ratings and segment uniqueness, tallies the corpus
//! frequency table, resolves every label, and records each rejected row in
//! a [`LoadReport`]. The dataset is immutable after load and freely
//! shareable across viewer sessions; filtering and view assembly never
//! mutate it. A failure in one view cannot affect another.

use crate::aggregate::{self, CategoryCount};
use crate::error::{LoadError, RowIssue, RowIssueKind};
use crate::record::{scale_in_range, AnnotationRecord, RawAnnotationRow};
use crate::resolve::{resolve_row, split_label_field, FrequencyTable};
use crate::segment;
use crate::table::{self, TableRow};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Report and view types
// ---------------------------------------------------------------------------

/// Row accounting for one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows in the source (header and blank lines not counted).
    pub total_rows: usize,
    /// Rows that became records.
    pub loaded: usize,
    /// Rows rejected; always equals `issues.len()`.
    pub excluded: usize,
    /// One entry per rejected row, ordered by line.
    pub issues: Vec<RowIssue>,
}

impl LoadReport {
    /// Number of rejected rows of one kind, for data-quality display.
    pub fn count_of(&self, kind: RowIssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

/// The data behind one rendered view: a selection of records together with
/// their category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceView {
    /// The code this view was filtered by; `None` for the whole dataset.
    pub selection: Option<String>,
    pub records: Vec<AnnotationRecord>,
    pub emotion_counts: Vec<CategoryCount>,
    /// Always `records.len()`; the "N samples" figure shown with the view.
    pub sample_count: usize,
}

impl SliceView {
    fn assemble(selection: Option<String>, records: Vec<AnnotationRecord>) -> Self {
        let emotion_counts = aggregate::emotion_counts(&records);
        let sample_count = records.len();
        Self {
            selection,
            records,
            emotion_counts,
            sample_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// One loaded label file: resolved records plus the frequency table and
/// load report produced on the way.
#[derive(Debug, Clone)]
pub struct AnnotationDataset {
    records: Vec<AnnotationRecord>,
    frequencies: FrequencyTable,
    report: LoadReport,
}

impl AnnotationDataset {
    /// Load a label file from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        tracing::info!(path = %path.display(), "Loading annotation file");
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Run the load pipeline over already-read text.
    ///
    /// Identical to [`AnnotationDataset::load`] minus the file read: parse
    /// the table, validate ratings and segment uniqueness, tally the vote
    /// frequencies, resolve every label, and account for rejected rows.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let rows = table::parse_table(text)?;
        let total_rows = rows.len();

        // Load-stage validation: ratings on scale, segment ids unique.
        // The first loadable occurrence of a segment id wins.
        let mut raw_rows = Vec::with_capacity(rows.len());
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for row in rows {
            let arousal = match parse_scale(&row.arousal) {
                Ok(v) => v,
                Err(kind) => {
                    let detail = format!("arousal '{}'", row.arousal.trim());
                    issues.push(issue_for(&row, kind, detail));
                    continue;
                }
            };
            let valence = match parse_scale(&row.valence) {
                Ok(v) => v,
                Err(kind) => {
                    let detail = format!("valence '{}'", row.valence.trim());
                    issues.push(issue_for(&row, kind, detail));
                    continue;
                }
            };
            if !seen.insert(row.segment_id.clone()) {
                let detail = row.segment_id.clone();
                issues.push(issue_for(&row, RowIssueKind::DuplicateSegment, detail));
                continue;
            }
            raw_rows.push(RawAnnotationRow {
                line: row.line,
                segment_id: row.segment_id,
                arousal,
                valence,
                emotion_raw: split_label_field(&row.emotion),
            });
        }

        // Pass one: corpus-wide vote counts over the surviving rows.
        let frequencies = FrequencyTable::tally(&raw_rows);
        tracing::debug!(votes = frequencies.total_votes(), "Tallied label votes");

        // Pass two: resolve every row against the table.
        let mut records = Vec::with_capacity(raw_rows.len());
        for row in &raw_rows {
            match resolve_row(row, &frequencies) {
                Ok(record) => records.push(record),
                Err(err) => issues.push(RowIssue {
                    line: row.line,
                    segment_id: row.segment_id.clone(),
                    kind: err.issue_kind(),
                    detail: err.to_string(),
                }),
            }
        }

        issues.sort_by_key(|i| i.line);

        let report = LoadReport {
            total_rows,
            loaded: records.len(),
            excluded: issues.len(),
            issues,
        };
        if report.excluded > 0 {
            tracing::warn!(
                excluded = report.excluded,
                total_rows = report.total_rows,
                "Excluded rows from annotation table"
            );
        }
        tracing::info!(
            total_rows = report.total_rows,
            loaded = report.loaded,
            excluded = report.excluded,
            "Parsed annotation table"
        );

        Ok(Self {
            records,
            frequencies,
            report,
        })
    }

    /// Resolved records in file order.
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Number of resolved records; the "annotation file has N samples" figure.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exclusion accounting for this load.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Corpus-wide vote counts used for tie resolution.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Distinct subject codes present in the dataset, sorted.
    pub fn subject_codes(&self) -> Vec<String> {
        segment::subject_codes(&self.records)
    }

    /// Records whose segment id contains `code`, in dataset order.
    pub fn filter_by_code(&self, code: &str) -> Vec<&AnnotationRecord> {
        segment::filter_by_code(&self.records, code)
    }

    /// Assemble the view for one session or subject selection.
    pub fn slice(&self, code: &str) -> SliceView {
        let records: Vec<AnnotationRecord> =
            self.filter_by_code(code).into_iter().cloned().collect();
        SliceView::assemble(Some(code.to_string()), records)
    }

    /// Assemble the view over the whole dataset.
    pub fn overview(&self) -> SliceView {
        SliceView::assemble(None, self.records.clone())
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

/// Parse a rating cell, classifying the failure.
fn parse_scale(cell: &str) -> Result<i16, RowIssueKind> {
    let value: i16 = cell
        .trim()
        .parse()
        .map_err(|_| RowIssueKind::BadScaleValue)?;
    if !scale_in_range(value) {
        return Err(RowIssueKind::ScaleOutOfRange);
    }
    Ok(value)
}

fn issue_for(row: &TableRow, kind: RowIssueKind, detail: String) -> RowIssue {
    RowIssue {
        line: row.line,
        segment_id: row.segment_id.clone(),
        kind,
        detail,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

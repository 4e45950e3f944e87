//! Delimited-text parsing for annotation label files.
//!
//! Label files are comma-separated with a header row naming each column.
//! This module slices the text into per-row cells for the four required
//! columns; it knows nothing about vocabularies or rating scales. Basic
//! quoting (`""` escapes) is handled, extra columns are tolerated, and
//! blank lines are skipped.

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Column holding the unique segment identifier.
pub const COLUMN_SEGMENT_ID: &str = "segment_id";

/// Column holding the arousal rating.
pub const COLUMN_AROUSAL: &str = "arousal";

/// Column holding the valence rating.
pub const COLUMN_VALENCE: &str = "valence";

/// Column holding the (possibly semicolon-joined) emotion labels.
pub const COLUMN_EMOTION: &str = "emotion";

/// Columns a label file must provide, by exact name.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COLUMN_SEGMENT_ID,
    COLUMN_AROUSAL,
    COLUMN_VALENCE,
    COLUMN_EMOTION,
];

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// One data row sliced into the four required cells, still as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based line number in the source text; the header is line 1.
    pub line: usize,
    pub segment_id: String,
    pub arousal: String,
    pub valence: String,
    pub emotion: String,
}

/// Positions of the required columns within the header.
struct ColumnLayout {
    segment_id: usize,
    arousal: usize,
    valence: usize,
    emotion: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Result<Self, LoadError> {
        Ok(Self {
            segment_id: column_index(headers, COLUMN_SEGMENT_ID)?,
            arousal: column_index(headers, COLUMN_AROUSAL)?,
            valence: column_index(headers, COLUMN_VALENCE)?,
            emotion: column_index(headers, COLUMN_EMOTION)?,
        })
    }
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse delimited text into the required cells of every data row.
///
/// The first line must be the header; column names are matched exactly
/// (no renaming flexibility) but their order is free. Rows shorter than
/// the header are padded with empty cells.
pub fn parse_table(text: &str) -> Result<Vec<TableRow>, LoadError> {
    let mut lines = text.lines().enumerate();

    let (_, header_line) = lines.next().ok_or(LoadError::Empty)?;
    let header_line = normalize_line(header_line);
    // A leading byte-order mark is not part of the first column name.
    let header_line = header_line.strip_prefix('\u{feff}').unwrap_or(header_line);
    if header_line.trim().is_empty() {
        return Err(LoadError::Empty);
    }

    let headers = split_cells(header_line);
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (index, line) in lines {
        let line = normalize_line(line);
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_cells(line);
        rows.push(TableRow {
            line: index + 1,
            segment_id: cell_at(&cells, layout.segment_id),
            arousal: cell_at(&cells, layout.arousal),
            valence: cell_at(&cells, layout.valence),
            emotion: cell_at(&cells, layout.emotion),
        });
    }

    Ok(rows)
}

/// Strip the carriage return that `str::lines` leaves behind on CRLF input.
fn normalize_line(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn cell_at(cells: &[String], index: usize) -> String {
    cells.get(index).cloned().unwrap_or_default()
}

/// Split a single line into cells, honoring double-quoted fields.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote.
                    cell.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' => quoted = true,
            ',' if !quoted => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(ch),
        }
    }
    cells.push(cell);
    cells
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

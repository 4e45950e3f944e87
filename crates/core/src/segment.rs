//! Segment identifier parsing and code-based filtering.
//!
//! Segment ids follow the upstream convention `SessNN_<context>_<subjectcode>`:
//! a session code `Sess01`..`Sess40` embedded somewhere in the id, and an
//! 8-character subject code sitting at a fixed offset from the end, with no
//! delimiter of its own. Both extractors reproduce that convention exactly;
//! filtering matches codes by substring because that is how the upstream ids
//! embed them.

use crate::record::AnnotationRecord;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix of every session code.
pub const SESSION_PREFIX: &str = "Sess";

/// Number of recording sessions in the corpus.
pub const SESSION_COUNT: u8 = 40;

/// Length of the subject code embedded near the end of a segment id.
pub const SUBJECT_CODE_LENGTH: usize = 8;

/// Length of the fixed suffix that follows the subject code.
pub const SEGMENT_SUFFIX_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Code extraction
// ---------------------------------------------------------------------------

/// Extract the first session code (`Sess01`..`Sess40`) embedded in a
/// segment id.
///
/// Scans for `Sess` followed by exactly two digits whose value lies in
/// 1..=40; occurrences with an out-of-range number are skipped and the scan
/// continues. Returns `None` when no such code is present.
pub fn session_code(segment_id: &str) -> Option<&str> {
    let bytes = segment_id.as_bytes();
    for (start, _) in segment_id.match_indices(SESSION_PREFIX) {
        let digits = &bytes[start + SESSION_PREFIX.len()..];
        if digits.len() < 2 || !digits[0].is_ascii_digit() || !digits[1].is_ascii_digit() {
            continue;
        }
        let number = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        if (1..=SESSION_COUNT).contains(&number) {
            let end = start + SESSION_PREFIX.len() + 2;
            return Some(&segment_id[start..end]);
        }
    }
    None
}

/// Extract the subject code: the 8 characters ending 4 characters before
/// the end of the id.
///
/// This is a fixed-offset slice, not a semantic split; the upstream ids
/// place the code there without any delimiter. Ids shorter than 12 bytes,
/// or ids where the offsets would split a multi-byte character, yield
/// `None` and are simply absent from subject enumeration.
pub fn subject_code(segment_id: &str) -> Option<&str> {
    let tail = SUBJECT_CODE_LENGTH + SEGMENT_SUFFIX_LENGTH;
    if segment_id.len() < tail {
        return None;
    }
    let start = segment_id.len() - tail;
    let end = segment_id.len() - SEGMENT_SUFFIX_LENGTH;
    if !segment_id.is_char_boundary(start) || !segment_id.is_char_boundary(end) {
        return None;
    }
    Some(&segment_id[start..end])
}

// ---------------------------------------------------------------------------
// Selection enumeration
// ---------------------------------------------------------------------------

/// The full list of session codes, `Sess01` through `Sess40`.
///
/// Codes are all width-2 zero-padded, so no session code is a substring of
/// another and the substring filter cannot cross-match sessions.
pub fn session_codes() -> Vec<String> {
    (1..=SESSION_COUNT)
        .map(|n| format!("{SESSION_PREFIX}{n:02}"))
        .collect()
}

/// Distinct subject codes present in `records`, sorted lexicographically.
///
/// Records whose id is too short to carry a subject code are skipped.
pub fn subject_codes(records: &[AnnotationRecord]) -> Vec<String> {
    let mut codes: Vec<String> = records
        .iter()
        .filter_map(|r| subject_code(&r.segment_id))
        .map(str::to_string)
        .collect();
    codes.sort();
    codes.dedup();
    codes
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records whose segment id contains `code`, in dataset order.
///
/// Substring match, not equality: session and subject codes are embedded in
/// longer ids without clean delimiters. An empty code matches every record.
pub fn filter_by_code<'a>(
    records: &'a [AnnotationRecord],
    code: &str,
) -> Vec<&'a AnnotationRecord> {
    records
        .iter()
        .filter(|r| r.segment_id.contains(code))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Per-category aggregation of resolved records.
//!
//! Turns a (possibly filtered) record sequence into the category counts
//! that drive chart rendering. Ordering is the canonical vocabulary order
//! so repeated renders of the same slice are identical.

use crate::emotion::{Emotion, VOCABULARY_SIZE};
use crate::record::AnnotationRecord;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Occurrence count for one emotion category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub emotion: Emotion,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Count records per emotion category, in canonical vocabulary order.
///
/// Categories absent from the input are omitted rather than reported as
/// zero; session and subject slices rarely cover all seven.
pub fn emotion_counts<'a, I>(records: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a AnnotationRecord>,
{
    let mut counts = [0usize; VOCABULARY_SIZE];
    for record in records {
        counts[record.emotion.rank()] += 1;
    }
    Emotion::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&emotion, count)| CategoryCount { emotion, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

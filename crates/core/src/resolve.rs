//! Multi-label resolution: collapsing tied emotion votes to one label.
//!
//! Annotators' tied top votes arrive as semicolon-joined tokens. Resolution
//! runs in two passes: pass one tallies every pre-resolution occurrence
//! across the corpus into a [`FrequencyTable`]; pass two resolves each tie
//! by picking the candidate with the fewest total occurrences (the
//! documented upstream policy; ties in the source data skew heavily toward
//! `neutral`), falling back to canonical vocabulary order when counts are
//! equal. Resolution is a pure function of the candidate set and the table,
//! so it is deterministic and idempotent.

use crate::emotion::{Emotion, VOCABULARY_SIZE};
use crate::error::RowIssueKind;
use crate::record::{AnnotationRecord, RawAnnotationRow};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Delimiter joining tied labels in the source emotion field.
pub const LABEL_DELIMITER: char = ';';

// ---------------------------------------------------------------------------
// Label parsing
// ---------------------------------------------------------------------------

/// Split a raw emotion field into its tokens: split on `;`, trim
/// whitespace, drop empty pieces. No vocabulary check happens here.
pub fn split_label_field(field: &str) -> Vec<String> {
    field
        .split(LABEL_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Why an emotion field failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    /// The field held no tokens after splitting.
    #[error("Emotion field holds no tokens")]
    Empty,

    /// A token outside the fixed vocabulary.
    #[error("Unknown emotion token '{0}'")]
    Unknown(String),
}

impl LabelError {
    /// The row-issue kind this failure is reported as.
    pub fn issue_kind(&self) -> RowIssueKind {
        match self {
            Self::Empty => RowIssueKind::EmptyLabel,
            Self::Unknown(_) => RowIssueKind::UnknownLabel,
        }
    }
}

/// Map label tokens onto the vocabulary, in order.
///
/// Fails on an empty token list and on the first token outside the
/// vocabulary; a row either parses completely or not at all.
pub fn parse_labels(tokens: &[String]) -> Result<Vec<Emotion>, LabelError> {
    if tokens.is_empty() {
        return Err(LabelError::Empty);
    }
    tokens
        .iter()
        .map(|t| Emotion::from_str(t).ok_or_else(|| LabelError::Unknown(t.clone())))
        .collect()
}

// ---------------------------------------------------------------------------
// Frequency table (pass one)
// ---------------------------------------------------------------------------

/// Corpus-wide vote counts per emotion category.
///
/// Built once per dataset load and passed explicitly into resolution, never
/// held as ambient state. Every pre-resolution occurrence counts as one
/// vote, whether the label appeared alone or tied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; VOCABULARY_SIZE],
}

impl FrequencyTable {
    /// Tally votes across `rows`.
    ///
    /// Rows whose label field does not parse against the vocabulary are
    /// excluded from the dataset, so they do not vote either.
    pub fn tally<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawAnnotationRow>,
    {
        let mut counts = [0u64; VOCABULARY_SIZE];
        for row in rows {
            let Ok(candidates) = parse_labels(&row.emotion_raw) else {
                continue;
            };
            for emotion in candidates {
                counts[emotion.rank()] += 1;
            }
        }
        Self { counts }
    }

    /// Vote count for one category.
    pub fn count(&self, emotion: Emotion) -> u64 {
        self.counts[emotion.rank()]
    }

    /// Total votes across all categories.
    pub fn total_votes(&self) -> u64 {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Resolution (pass two)
// ---------------------------------------------------------------------------

/// Resolve a candidate set to a single label.
///
/// Picks the candidate with the smallest corpus-wide vote count; equal
/// counts resolve to the candidate earliest in vocabulary order. A single
/// candidate resolves to itself regardless of the table. Returns `None`
/// only for an empty slice.
pub fn resolve_label(candidates: &[Emotion], frequencies: &FrequencyTable) -> Option<Emotion> {
    candidates
        .iter()
        .copied()
        .min_by_key(|e| (frequencies.count(*e), e.rank()))
}

/// Resolve one raw row into an [`AnnotationRecord`].
pub fn resolve_row(
    row: &RawAnnotationRow,
    frequencies: &FrequencyTable,
) -> Result<AnnotationRecord, LabelError> {
    let candidates = parse_labels(&row.emotion_raw)?;
    // parse_labels guarantees at least one candidate.
    let emotion = resolve_label(&candidates, frequencies).ok_or(LabelError::Empty)?;
    Ok(AnnotationRecord {
        segment_id: row.segment_id.clone(),
        arousal: row.arousal,
        valence: row.valence,
        emotion,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(segment_id: &str, tokens: &[&str]) -> RawAnnotationRow {
        RawAnnotationRow {
            line: 2,
            segment_id: segment_id.to_string(),
            arousal: 3,
            valence: 3,
            emotion_raw: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Build a table with the given per-category counts via single-vote rows.
    fn table_with(counts: &[(Emotion, u64)]) -> FrequencyTable {
        let mut rows = Vec::new();
        for (emotion, n) in counts {
            for i in 0..*n {
                rows.push(raw(&format!("{emotion}_{i}"), &[emotion.as_str()]));
            }
        }
        FrequencyTable::tally(&rows)
    }

    // -- split_label_field -------------------------------------------------

    #[test]
    fn single_token_field() {
        assert_eq!(split_label_field("happy"), vec!["happy".to_string()]);
    }

    #[test]
    fn tied_tokens_split_in_order() {
        assert_eq!(
            split_label_field("angry;neutral"),
            vec!["angry".to_string(), "neutral".to_string()]
        );
    }

    #[test]
    fn tokens_trimmed() {
        assert_eq!(
            split_label_field(" angry ; neutral "),
            vec!["angry".to_string(), "neutral".to_string()]
        );
    }

    #[test]
    fn empty_pieces_dropped() {
        assert_eq!(split_label_field("happy;"), vec!["happy".to_string()]);
        assert_eq!(split_label_field(";;happy"), vec!["happy".to_string()]);
    }

    #[test]
    fn blank_field_yields_no_tokens() {
        assert!(split_label_field("").is_empty());
        assert!(split_label_field(" ; ").is_empty());
    }

    // -- parse_labels ------------------------------------------------------

    #[test]
    fn valid_tokens_parsed_in_order() {
        let tokens = vec!["fear".to_string(), "surprise".to_string()];
        assert_eq!(
            parse_labels(&tokens).unwrap(),
            vec![Emotion::Fear, Emotion::Surprise]
        );
    }

    #[test]
    fn no_tokens_is_empty_error() {
        assert_eq!(parse_labels(&[]), Err(LabelError::Empty));
    }

    #[test]
    fn first_unknown_token_reported() {
        let tokens = vec![
            "angry".to_string(),
            "bored".to_string(),
            "sleepy".to_string(),
        ];
        assert_eq!(
            parse_labels(&tokens),
            Err(LabelError::Unknown("bored".to_string()))
        );
    }

    #[test]
    fn label_error_maps_to_issue_kind() {
        assert_eq!(LabelError::Empty.issue_kind(), RowIssueKind::EmptyLabel);
        assert_eq!(
            LabelError::Unknown("x".to_string()).issue_kind(),
            RowIssueKind::UnknownLabel
        );
    }

    // -- FrequencyTable::tally ---------------------------------------------

    #[test]
    fn tally_counts_single_votes() {
        let rows = vec![raw("a", &["happy"]), raw("b", &["happy"]), raw("c", &["sad"])];
        let table = FrequencyTable::tally(&rows);
        assert_eq!(table.count(Emotion::Happy), 2);
        assert_eq!(table.count(Emotion::Sad), 1);
        assert_eq!(table.count(Emotion::Angry), 0);
    }

    #[test]
    fn tied_row_votes_once_per_candidate() {
        let rows = vec![raw("a", &["angry", "neutral"])];
        let table = FrequencyTable::tally(&rows);
        assert_eq!(table.count(Emotion::Angry), 1);
        assert_eq!(table.count(Emotion::Neutral), 1);
        assert_eq!(table.total_votes(), 2);
    }

    #[test]
    fn unparseable_rows_do_not_vote() {
        let rows = vec![raw("a", &["happy"]), raw("b", &["bored"]), raw("c", &[])];
        let table = FrequencyTable::tally(&rows);
        assert_eq!(table.total_votes(), 1);
    }

    #[test]
    fn empty_corpus_tallies_to_zero() {
        let table = FrequencyTable::tally(&[]);
        assert_eq!(table.total_votes(), 0);
        assert_eq!(table, FrequencyTable::default());
    }

    // -- resolve_label -----------------------------------------------------

    #[test]
    fn single_candidate_resolves_to_itself() {
        let table = table_with(&[(Emotion::Neutral, 500)]);
        assert_eq!(
            resolve_label(&[Emotion::Neutral], &table),
            Some(Emotion::Neutral)
        );
    }

    #[test]
    fn lower_global_frequency_wins() {
        let table = table_with(&[
            (Emotion::Angry, 10),
            (Emotion::Neutral, 500),
            (Emotion::Happy, 50),
        ]);
        assert_eq!(
            resolve_label(&[Emotion::Angry, Emotion::Neutral], &table),
            Some(Emotion::Angry)
        );
    }

    #[test]
    fn equal_frequency_falls_back_to_vocabulary_order() {
        let table = table_with(&[(Emotion::Fear, 20), (Emotion::Surprise, 20)]);
        assert_eq!(
            resolve_label(&[Emotion::Surprise, Emotion::Fear], &table),
            Some(Emotion::Fear)
        );
    }

    #[test]
    fn empty_candidates_resolve_to_none() {
        let table = FrequencyTable::default();
        assert_eq!(resolve_label(&[], &table), None);
    }

    #[test]
    fn resolution_is_deterministic_across_tallies() {
        let rows = vec![
            raw("a", &["angry", "neutral"]),
            raw("b", &["neutral"]),
            raw("c", &["happy"]),
        ];
        let first = FrequencyTable::tally(&rows);
        let second = FrequencyTable::tally(&rows);
        assert_eq!(first, second);
        assert_eq!(
            resolve_label(&[Emotion::Angry, Emotion::Neutral], &first),
            resolve_label(&[Emotion::Angry, Emotion::Neutral], &second)
        );
    }

    // -- resolve_row -------------------------------------------------------

    #[test]
    fn resolve_row_copies_scalar_fields() {
        let row = RawAnnotationRow {
            line: 5,
            segment_id: "Sess01_impro01_User001M_001".to_string(),
            arousal: 4,
            valence: 5,
            emotion_raw: vec!["happy".to_string()],
        };
        let record = resolve_row(&row, &FrequencyTable::default()).unwrap();
        assert_eq!(record.segment_id, "Sess01_impro01_User001M_001");
        assert_eq!(record.arousal, 4);
        assert_eq!(record.valence, 5);
        assert_eq!(record.emotion, Emotion::Happy);
    }

    #[test]
    fn resolve_row_breaks_tie_with_table() {
        let table = table_with(&[(Emotion::Sad, 3), (Emotion::Neutral, 30)]);
        let row = raw("a", &["neutral", "sad"]);
        let record = resolve_row(&row, &table).unwrap();
        assert_eq!(record.emotion, Emotion::Sad);
    }

    #[test]
    fn resolve_row_rejects_unknown_token() {
        let row = raw("a", &["cheerful"]);
        assert_eq!(
            resolve_row(&row, &FrequencyTable::default()),
            Err(LabelError::Unknown("cheerful".to_string()))
        );
    }

    #[test]
    fn resolve_row_rejects_empty_field() {
        let row = raw("a", &[]);
        assert_eq!(
            resolve_row(&row, &FrequencyTable::default()),
            Err(LabelError::Empty)
        );
    }
}

//! Derived results read off a finished [`Grid`]: match categories and index maps.

use crate::grid::Grid;
use crate::scoring::edit_distance;
use crate::token::{Label, Token, GAP};

/// The four-way classification of one alignment column, mirroring the scoring rule that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCategory {
  FullyMatch,
  PartiallyMatch,
  Mismatch,
  Gap,
}

impl MatchCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      MatchCategory::FullyMatch => "fully_match",
      MatchCategory::PartiallyMatch => "partially_match",
      MatchCategory::Mismatch => "mismatch",
      MatchCategory::Gap => "gap",
    }
  }
}

/// Classifies every column of `grid`. A column classifies as a match/mismatch only when exactly
/// the hypothesis and exactly one reference row are non-gap there; any other shape (a reference
/// strand alone, or more than one non-gap row among the references, which `compare` already
/// rejects during alignment) is a gap.
pub fn token_match_result(grid: &Grid, partial_bound: i32) -> Vec<MatchCategory> {
  (0..grid.num_columns())
    .map(|column| {
      let hypothesis_token = &grid.hypothesis_row()[column];
      let reference_token = grid.reference_rows().iter().map(|row| &row[column]).find(|t| t.as_str() != GAP);

      match (hypothesis_token.as_str() != GAP, reference_token) {
        (true, Some(reference_token)) if hypothesis_token == reference_token => MatchCategory::FullyMatch,
        (true, Some(reference_token)) if (edit_distance(hypothesis_token, reference_token) as i32) < partial_bound => {
          MatchCategory::PartiallyMatch
        }
        (true, Some(_)) => MatchCategory::Mismatch,
        _ => MatchCategory::Gap,
      }
    })
    .collect()
}

/// For each reference row, the hypothesis column index its non-gap tokens align to, or `-1`
/// where the hypothesis is a gap at that column.
pub fn align_indices(grid: &Grid) -> Vec<Vec<i64>> {
  grid
    .reference_rows()
    .iter()
    .map(|row| {
      row
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_str() != GAP)
        .map(|(column, _)| if grid.hypothesis_row()[column].as_str() != GAP { column as i64 } else { -1 })
        .collect()
    })
    .collect()
}

/// For each unique speaker (in [`crate::orchestration::unique_speaker_label`] order), the
/// original positions within the flat `reference`/`reference_labels` input that belong to them.
///
/// `reference` itself doesn't affect the result (positions are derived purely from
/// `reference_labels`); it stays part of the signature to match the paired
/// `reference`/`reference_labels` contract every other entry point uses.
pub fn ref_original_indices(_reference: &[Token], reference_labels: &[Label]) -> Vec<Vec<usize>> {
  let unique = crate::orchestration::unique_speaker_label(reference_labels);
  let mut result = vec![Vec::new(); unique.len()];
  for (position, label) in reference_labels.iter().enumerate() {
    let speaker_index = unique.iter().position(|u| u == label).expect("label came from this unique set");
    result[speaker_index].push(position);
  }
  result
}

/// Replays `hypothesis_labels` across the hypothesis row of `grid`, inserting [`GAP`] wherever
/// the hypothesis row itself is a gap.
pub fn aligned_hypo_speaker_label(grid: &Grid, hypothesis_labels: &[Label]) -> Vec<Token> {
  let mut labels = hypothesis_labels.iter();
  grid
    .hypothesis_row()
    .iter()
    .map(|token| if token.as_str() != GAP { labels.next().expect("one label per hypothesis token").clone() } else { GAP.to_owned() })
    .collect()
}

//! Speaker partitioning, segmentation, and stitching: the entry points a caller drives.

use std::collections::BTreeSet;

use crate::aligner::align_strands;
use crate::error::AlignError;
use crate::grid::Grid;
use crate::segmentation::{self, DEFAULT_BARRIER_LENGTH, DEFAULT_MAX_SEGMENT_LENGTH, DEFAULT_MIN_SEGMENT_LENGTH};
use crate::tensor::DEFAULT_MAX_TENSOR_CELLS;
use crate::token::{validate_no_gap_sentinel, Label, Token};

/// Distinct speaker labels in lexicographic order. Lexicographic order (rather than first
/// appearance) makes the output's row order reproducible independent of how the reference
/// happens to be transcribed.
pub fn unique_speaker_label(labels: &[Label]) -> Vec<Label> {
  let set: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
  set.into_iter().map(str::to_owned).collect()
}

/// Splits `tokens` by the label attached to each position, keeping only speakers that actually
/// appear. Returned in the same lexicographic order as [`unique_speaker_label`].
fn partition_occupied(tokens: &[Token], labels: &[Label]) -> (Vec<Label>, Vec<Vec<Token>>) {
  let present = unique_speaker_label(labels);
  let groups = present
    .iter()
    .map(|speaker| {
      tokens.iter().zip(labels.iter()).filter_map(|(t, l)| (l == speaker).then(|| t.clone())).collect()
    })
    .collect();
  (present, groups)
}

fn validate_lengths(reference: &[Token], reference_labels: &[Label]) -> Result<(), AlignError> {
  if reference.len() != reference_labels.len() {
    return Err(AlignError::LengthMismatch {
      name_a: "reference",
      len_a: reference.len(),
      name_b: "reference_labels",
      len_b: reference_labels.len(),
    });
  }
  Ok(())
}

/// Aligns the whole hypothesis against the whole reference in a single DP pass, with no
/// segmentation. Only appropriate for short transcripts; the tensor grows as the product of
/// every strand's length plus one.
pub fn align_without_segment(
  hypothesis: &[Token],
  reference: &[Token],
  reference_labels: &[Label],
  partial_bound: i32,
) -> Result<Grid, AlignError> {
  validate_no_gap_sentinel(hypothesis)?;
  validate_no_gap_sentinel(reference)?;
  validate_no_gap_sentinel(reference_labels)?;
  validate_lengths(reference, reference_labels)?;

  let (_, groups) = partition_occupied(reference, reference_labels);
  align_strands(hypothesis, &groups, partial_bound, DEFAULT_MAX_TENSOR_CELLS)
}

/// Aligns with an explicit segmentation stride, stitching per-segment results into one grid
/// whose rows follow the global lexicographic speaker order.
pub fn align_with_manual_segment(
  hypothesis: &[Token],
  reference: &[Token],
  reference_labels: &[Label],
  segment_length: usize,
  barrier_length: usize,
  partial_bound: i32,
) -> Result<Grid, AlignError> {
  validate_no_gap_sentinel(hypothesis)?;
  validate_no_gap_sentinel(reference)?;
  validate_no_gap_sentinel(reference_labels)?;
  validate_lengths(reference, reference_labels)?;
  align_segmented(hypothesis, reference, reference_labels, segment_length, barrier_length, partial_bound)
}

/// Like [`align_with_manual_segment`], but first sweeps
/// [`segmentation::optimal_segment_parameters`] over `DEFAULT_MIN_SEGMENT_LENGTH
/// ..DEFAULT_MAX_SEGMENT_LENGTH` to pick the segment length.
pub fn align_with_auto_segment(
  hypothesis: &[Token],
  reference: &[Token],
  reference_labels: &[Label],
  partial_bound: i32,
) -> Result<Grid, AlignError> {
  validate_no_gap_sentinel(hypothesis)?;
  validate_no_gap_sentinel(reference)?;
  validate_no_gap_sentinel(reference_labels)?;
  validate_lengths(reference, reference_labels)?;

  let (segment_length, barrier_length) = segmentation::optimal_segment_parameters(
    hypothesis,
    reference,
    DEFAULT_MIN_SEGMENT_LENGTH,
    DEFAULT_MAX_SEGMENT_LENGTH,
    DEFAULT_BARRIER_LENGTH,
  );
  log::info!("auto segmentation chose segment_length={segment_length} barrier_length={barrier_length}");
  align_segmented(hypothesis, reference, reference_labels, segment_length, barrier_length, partial_bound)
}

fn align_segmented(
  hypothesis: &[Token],
  reference: &[Token],
  reference_labels: &[Label],
  segment_length: usize,
  barrier_length: usize,
  partial_bound: i32,
) -> Result<Grid, AlignError> {
  let global_speakers = unique_speaker_label(reference_labels);
  let cuts = segmentation::segment_indices(hypothesis, reference, segment_length, barrier_length);
  let hypothesis_segments = segmentation::segment_sequence(hypothesis, &cuts.hypothesis);
  let reference_segments = segmentation::segment_sequence(reference, &cuts.reference);
  let label_segments = segmentation::segment_sequence(reference_labels, &cuts.reference);

  let mut rows: Vec<Vec<Token>> = vec![Vec::new(); 1 + global_speakers.len()];

  for (segment_index, ((hypo_segment, ref_segment), label_segment)) in
    hypothesis_segments.iter().zip(&reference_segments).zip(&label_segments).enumerate()
  {
    let (present, groups) = partition_occupied(ref_segment, label_segment);
    let cell_count = groups.iter().fold(hypo_segment.len() as u64 + 1, |acc, group| acc * (group.len() as u64 + 1));
    log::info!(
      "segment {segment_index}: hypothesis[{}..{}], reference[{}..{}], {cell_count} tensor cells",
      cuts.hypothesis[segment_index],
      cuts.hypothesis[segment_index + 1],
      cuts.reference[segment_index],
      cuts.reference[segment_index + 1],
    );
    let segment_grid = align_strands(hypo_segment, &groups, partial_bound, DEFAULT_MAX_TENSOR_CELLS)?;

    rows[0].extend(segment_grid.hypothesis_row().iter().cloned());
    for (occupied_index, speaker) in present.iter().enumerate() {
      let global_index = 1 + global_speakers.iter().position(|s| s == speaker).expect("occupied speaker must be a global speaker");
      rows[global_index].extend(segment_grid.reference_rows()[occupied_index].iter().cloned());
    }

    let target_len = rows[0].len();
    for row in rows.iter_mut().skip(1) {
      while row.len() < target_len {
        row.push(crate::token::GAP.to_owned());
      }
    }
  }

  Ok(Grid::new(rows))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn toks(words: &[&str]) -> Vec<Token> {
    words.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn unique_speaker_label_is_lexicographic_and_deduplicated() {
    let labels = toks(&["bob", "alice", "bob", "carol", "alice"]);
    assert_eq!(unique_speaker_label(&labels), toks(&["alice", "bob", "carol"]));
  }

  #[test]
  fn align_without_segment_produces_one_row_per_global_speaker() {
    let hypothesis = toks(&["hi", "there", "hello", "world"]);
    let reference = toks(&["hi", "there", "hello", "world"]);
    let labels = toks(&["alice", "alice", "bob", "bob"]);
    let grid = align_without_segment(&hypothesis, &reference, &labels, 2).unwrap();
    assert_eq!(grid.num_strands(), 3);
  }

  #[test]
  fn rejects_length_mismatch_between_reference_and_labels() {
    let hypothesis = toks(&["a"]);
    let reference = toks(&["a", "b"]);
    let labels = toks(&["alice"]);
    let err = align_without_segment(&hypothesis, &reference, &labels, 2).unwrap_err();
    assert!(matches!(err, AlignError::LengthMismatch { .. }));
  }

  #[test]
  fn manual_segment_pads_speakers_absent_from_a_segment() {
    let hypothesis = toks(&["a1", "a2", "b1", "b2"]);
    let reference = toks(&["a1", "a2", "b1", "b2"]);
    let labels = toks(&["alice", "alice", "bob", "bob"]);
    let grid = align_with_manual_segment(&hypothesis, &reference, &labels, 2, 1, 2).unwrap();
    assert_eq!(grid.num_columns(), grid.reference_rows()[0].len());
    assert_eq!(grid.num_columns(), grid.reference_rows()[1].len());
  }
}

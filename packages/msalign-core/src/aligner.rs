//! Forward score fill and backward traceback for N-dimensional Needleman-Wunsch alignment.

use crate::error::AlignError;
use crate::grid::Grid;
use crate::scoring::compare;
use crate::subset::{enumerate_predecessors, enumerate_subsets, predecessor_coord, SubsetCoords};
use crate::tensor::ScoreTensor;
use crate::token::{Token, GAP};

/// Aligns one hypothesis strand against `reference_strands` (one per occupied speaker in this
/// segment; every strand here is expected non-empty — callers filter out speakers absent from
/// the segment before calling in).
///
/// Returns a [`Grid`] with `1 + reference_strands.len()` rows, hypothesis first.
pub fn align_strands(
  hypothesis: &[Token],
  reference_strands: &[Vec<Token>],
  partial_bound: i32,
  max_tensor_cells: u64,
) -> Result<Grid, AlignError> {
  let num_strands = 1 + reference_strands.len();
  let lengths: Vec<usize> = std::iter::once(hypothesis.len()).chain(reference_strands.iter().map(Vec::len)).collect();
  let strands: Vec<&[Token]> = std::iter::once(hypothesis).chain(reference_strands.iter().map(Vec::as_slice)).collect();

  let mut tensor = ScoreTensor::try_new(lengths.clone(), max_tensor_cells)?;
  log::info!("aligning {num_strands} strands, lengths {lengths:?}, {} cells", tensor_cell_count(&lengths));

  let subsets = enumerate_subsets(num_strands);
  for subset in &subsets {
    let predecessors = enumerate_predecessors(subset);
    for coord in SubsetCoords::new(subset, &lengths, num_strands) {
      let mut best = i16::MIN;
      for &predecessor in &predecessors {
        let pred_coord = predecessor_coord(&coord, predecessor);
        let step_score = step_score(&coord, &pred_coord, &strands, partial_bound)?;
        let candidate = tensor.get(&pred_coord).wrapping_add(step_score);
        if candidate > best {
          best = candidate;
        }
      }
      tensor.set(&coord, best);
    }
  }

  let rows = backtrack(&tensor, &lengths, &strands, num_strands, partial_bound)?;
  Ok(Grid::new(rows))
}

fn tensor_cell_count(lengths: &[usize]) -> u64 {
  lengths.iter().fold(1u64, |acc, &len| acc.saturating_mul(len as u64 + 1))
}

/// The token a strand contributes at `coord` relative to `pred_coord`: the real token if this
/// axis advanced, `GAP` if it held still (the strand did not participate in this step).
fn contributed_token(coord: &[usize], pred_coord: &[usize], axis: usize, strand: &[Token]) -> Token {
  if coord[axis] != pred_coord[axis] {
    strand[coord[axis] - 1].clone()
  } else {
    GAP.to_owned()
  }
}

fn step_score(coord: &[usize], pred_coord: &[usize], strands: &[&[Token]], partial_bound: i32) -> Result<i16, AlignError> {
  let hypothesis_token = contributed_token(coord, pred_coord, 0, strands[0]);
  let reference_tokens: Vec<Token> =
    (1..strands.len()).map(|axis| contributed_token(coord, pred_coord, axis, strands[axis])).collect();
  let reference_refs: Vec<&str> = reference_tokens.iter().map(String::as_str).collect();
  compare(&hypothesis_token, &reference_refs, partial_bound)
}

fn backtrack(
  tensor: &ScoreTensor,
  lengths: &[usize],
  strands: &[&[Token]],
  num_strands: usize,
  partial_bound: i32,
) -> Result<Vec<Vec<Token>>, AlignError> {
  let mut coord = lengths.to_vec();
  let mut rows: Vec<Vec<Token>> = vec![Vec::new(); num_strands];

  while coord.iter().any(|&c| c != 0) {
    let subset: Vec<usize> = (0..num_strands).filter(|&axis| coord[axis] > 0).collect();
    let mut stepped = false;
    for predecessor in enumerate_predecessors(&subset) {
      let pred_coord = predecessor_coord(&coord, predecessor);
      let step_score = step_score(&coord, &pred_coord, strands, partial_bound)?;
      if tensor.get(&coord) == tensor.get(&pred_coord).wrapping_add(step_score) {
        rows[0].push(contributed_token(&coord, &pred_coord, 0, strands[0]));
        for axis in 1..num_strands {
          rows[axis].push(contributed_token(&coord, &pred_coord, axis, strands[axis]));
        }
        coord = pred_coord;
        stepped = true;
        break;
      }
    }
    debug_assert!(stepped, "backtracking found no predecessor accounting for the cell's score");
    if !stepped {
      // Forward fill and traceback must agree; if they ever disagree, stop rather than loop.
      break;
    }
  }

  for row in &mut rows {
    row.reverse();
  }
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn toks(words: &[&str]) -> Vec<Token> {
    words.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn identical_single_reference_has_no_gaps() {
    let hypothesis = toks(&["I", "am", "a", "fish"]);
    let reference = toks(&["I", "am", "a", "fish"]);
    let grid = align_strands(&hypothesis, &[reference], 2, 1_000_000).unwrap();
    assert_eq!(grid.hypothesis_row(), &toks(&["I", "am", "a", "fish"])[..]);
    assert_eq!(grid.reference_rows()[0], toks(&["I", "am", "a", "fish"]));
  }

  #[test]
  fn hypothesis_insertion_produces_a_reference_gap() {
    let hypothesis = toks(&["I", "really", "am", "a", "fish"]);
    let reference = toks(&["I", "am", "a", "fish"]);
    let grid = align_strands(&hypothesis, &[reference], 2, 1_000_000).unwrap();
    assert_eq!(grid.num_columns(), 5);
    assert_eq!(grid.reference_rows()[0][1], GAP);
  }

  #[test]
  fn hypothesis_deletion_produces_a_hypothesis_gap() {
    let hypothesis = toks(&["I", "am", "fish"]);
    let reference = toks(&["I", "am", "a", "fish"]);
    let grid = align_strands(&hypothesis, &[reference], 2, 1_000_000).unwrap();
    assert_eq!(grid.num_columns(), 4);
    assert_eq!(grid.hypothesis_row()[2], GAP);
  }

  #[test]
  fn two_speakers_interleave_without_colliding() {
    let hypothesis = toks(&["hi", "there", "hello", "world"]);
    let speaker_a = toks(&["hi", "there"]);
    let speaker_b = toks(&["hello", "world"]);
    let grid = align_strands(&hypothesis, &[speaker_a, speaker_b], 2, 1_000_000).unwrap();
    assert_eq!(grid.num_columns(), 4);
    // every column has at most one non-gap reference contributor
    for col in 0..grid.num_columns() {
      let non_gap_refs = grid.reference_rows().iter().filter(|row| row[col] != GAP).count();
      assert!(non_gap_refs <= 1);
    }
  }

  #[test]
  fn refuses_oversized_tensor() {
    let hypothesis = toks(&["a"; 2000]);
    let reference = toks(&["a"; 2000]);
    let err = align_strands(&hypothesis, &[reference], 2, 1_000).unwrap_err();
    assert!(matches!(err, AlignError::TensorTooLarge { .. }));
  }
}

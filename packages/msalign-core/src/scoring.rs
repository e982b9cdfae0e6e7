//! Token comparison and the four-way match scoring rule.

use crate::error::AlignError;
use crate::token::GAP;

pub const FULLY_MATCH_SCORE: i16 = 2;
pub const PARTIAL_MATCH_SCORE: i16 = 1;
pub const MISMATCH_SCORE: i16 = -1;
pub const GAP_SCORE: i16 = -1;

/// Levenshtein edit distance between two tokens, compared byte-for-byte.
///
/// Short-circuits on exact equality so the common case (`FULLY_MATCH`) never pays for the
/// full DP table.
pub fn edit_distance(a: &str, b: &str) -> usize {
  if a == b {
    return 0;
  }
  let (a, b) = (a.as_bytes(), b.as_bytes());
  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut curr = vec![0usize; b.len() + 1];
  for (i, &ca) in a.iter().enumerate() {
    curr[0] = i + 1;
    for (j, &cb) in b.iter().enumerate() {
      let sub_cost = usize::from(ca != cb);
      curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + sub_cost);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[b.len()]
}

/// Scores one alignment cell: a hypothesis candidate token against the (at most one) non-gap
/// reference candidate drawn from the reference axes of the same cell.
///
/// `partial_bound` is the edit-distance cutoff below which a non-identical pair still counts as
/// a partial match; callers typically pass a small constant such as `2`.
pub fn compare(hypothesis: &str, reference_candidates: &[&str], partial_bound: i32) -> Result<i16, AlignError> {
  let mut reference: Option<&str> = None;
  for &candidate in reference_candidates {
    if candidate != GAP {
      if reference.is_some() {
        return Err(AlignError::MultipleNonGapReferences {
          count: reference_candidates.iter().filter(|c| **c != GAP).count(),
        });
      }
      reference = Some(candidate);
    }
  }

  let Some(reference) = reference else {
    return Ok(GAP_SCORE);
  };

  if hypothesis == GAP {
    return Ok(GAP_SCORE);
  }
  if hypothesis == reference {
    return Ok(FULLY_MATCH_SCORE);
  }
  if (edit_distance(hypothesis, reference) as i32) < partial_bound {
    return Ok(PARTIAL_MATCH_SCORE);
  }
  Ok(MISMATCH_SCORE)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  #[case("", "", 0)]
  #[case("cat", "cat", 0)]
  #[case("cat", "bat", 1)]
  #[case("cat", "cats", 1)]
  #[case("kitten", "sitting", 3)]
  fn edit_distance_matches_reference(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
    assert_eq!(edit_distance(a, b), expected);
  }

  #[test]
  fn fully_match_when_equal() {
    assert_eq!(compare("fish", &["fish"], 2), Ok(FULLY_MATCH_SCORE));
  }

  #[test]
  fn partial_match_within_bound() {
    assert_eq!(compare("fish", &["fist"], 2), Ok(PARTIAL_MATCH_SCORE));
  }

  #[test]
  fn mismatch_outside_bound() {
    assert_eq!(compare("fish", &["whale"], 2), Ok(MISMATCH_SCORE));
  }

  #[test]
  fn gap_when_hypothesis_is_gap() {
    assert_eq!(compare(GAP, &["fish"], 2), Ok(GAP_SCORE));
  }

  #[test]
  fn gap_when_no_reference_candidate() {
    assert_eq!(compare("fish", &[GAP, GAP], 2), Ok(GAP_SCORE));
  }

  #[test]
  fn errors_on_multiple_non_gap_references() {
    assert_eq!(
      compare("fish", &["fish", "whale"], 2),
      Err(AlignError::MultipleNonGapReferences { count: 2 })
    );
  }
}

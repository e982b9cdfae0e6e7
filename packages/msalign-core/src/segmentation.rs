//! Splits a long hypothesis/reference pair into bounded-size segments before alignment.
//!
//! Finding a run of `barrier_length` identical tokens in both streams is strong evidence the
//! streams are locally in sync there, so cutting at the midpoint of that run is safe: no
//! alignment path that matters crosses the cut.

use crate::token::Token;

pub const DEFAULT_SEGMENT_LENGTH: usize = 64;
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 30;
pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 120;
pub const DEFAULT_BARRIER_LENGTH: usize = 6;

/// Cut points into `hypothesis` and `reference`, always starting at `0` and ending at each
/// stream's length. `hypothesis[i]` and `reference[i]` bound the `i`-th segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentCuts {
  pub hypothesis: Vec<usize>,
  pub reference: Vec<usize>,
}

/// Finds barrier-synchronized cut points using a fixed `segment_length` stride.
///
/// Starting `barrier_length` tokens ahead of the previous cut, scans forward in the hypothesis
/// stream a token at a time; at each position, scans the unconsumed tail of the reference
/// stream for the first `barrier_length`-token run identical to the hypothesis window there.
/// On a match, the cut lands at the midpoint of the matched run and the hypothesis scan resumes
/// `segment_length` tokens past the window that matched; otherwise the scan advances by one
/// token and tries again.
pub fn segment_indices(hypothesis: &[Token], reference: &[Token], segment_length: usize, barrier_length: usize) -> SegmentCuts {
  let mut hypothesis_cuts = vec![0usize];
  let mut reference_cuts = vec![0usize];

  let mut h = segment_length;
  while h < hypothesis.len().saturating_sub(barrier_length) {
    let r_start = *reference_cuts.last().unwrap();
    let window = &hypothesis[h..h + barrier_length];
    let found = (r_start..reference.len().saturating_sub(barrier_length)).find(|&r| reference[r..r + barrier_length] == *window);

    match found {
      Some(r) => {
        hypothesis_cuts.push(h + barrier_length / 2);
        reference_cuts.push(r + barrier_length / 2);
        log::debug!("segmentation barrier at hypothesis[{h}]/reference[{r}]");
        h += segment_length;
      }
      None => h += 1,
    }
  }

  hypothesis_cuts.push(hypothesis.len());
  reference_cuts.push(reference.len());
  SegmentCuts { hypothesis: hypothesis_cuts, reference: reference_cuts }
}

/// Splits `tokens` into the slices bounded by consecutive entries of `cuts`.
pub fn segment_sequence<T: Clone>(tokens: &[T], cuts: &[usize]) -> Vec<Vec<T>> {
  cuts.windows(2).map(|w| tokens[w[0]..w[1]].to_vec()).collect()
}

/// Sweeps `segment_length` over `min_length..max_length` and returns the value that minimizes
/// the sum of the worst-case segment size in each stream, ties broken toward the larger length
/// (a larger segment does strictly less work splitting the same material, so it wins ties).
pub fn optimal_segment_parameters(
  hypothesis: &[Token],
  reference: &[Token],
  min_length: usize,
  max_length: usize,
  barrier_length: usize,
) -> (usize, usize) {
  let mut best_length = min_length;
  let mut best_score = usize::MAX;

  for length in min_length..max_length {
    let cuts = segment_indices(hypothesis, reference, length, barrier_length);
    let hypo_max = cuts.hypothesis.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(0);
    let ref_max = cuts.reference.windows(2).map(|w| w[1] - w[0]).max().unwrap_or(0);
    let score = hypo_max + ref_max;
    log::debug!("segment length {length}: worst-case hypothesis span {hypo_max}, worst-case reference span {ref_max}");
    if score <= best_score {
      best_score = score;
      best_length = length;
    }
  }

  (best_length, barrier_length)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn toks(words: &[&str]) -> Vec<Token> {
    words.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn identical_streams_cut_at_start_and_end_only_when_shorter_than_segment() {
    let hypothesis = toks(&["a", "b", "c"]);
    let reference = toks(&["a", "b", "c"]);
    let cuts = segment_indices(&hypothesis, &reference, 30, 2);
    assert_eq!(cuts, SegmentCuts { hypothesis: vec![0, 3], reference: vec![0, 3] });
  }

  #[test]
  fn finds_a_barrier_and_cuts_at_its_midpoint() {
    let mut hypothesis = vec!["x".to_string(); 10];
    hypothesis.extend(toks(&["p", "q", "r", "s"]));
    hypothesis.extend(vec!["y".to_string(); 10]);
    let mut reference = vec!["x".to_string(); 10];
    reference.extend(toks(&["p", "q", "r", "s"]));
    reference.extend(vec!["y".to_string(); 10]);

    let cuts = segment_indices(&hypothesis, &reference, 8, 4);
    assert_eq!(cuts.hypothesis.len(), cuts.reference.len());
    assert!(cuts.hypothesis.len() >= 2);
    assert_eq!(*cuts.hypothesis.last().unwrap(), hypothesis.len());
    assert_eq!(*cuts.reference.last().unwrap(), reference.len());
  }

  #[test]
  fn segment_sequence_respects_cuts() {
    let tokens = toks(&["a", "b", "c", "d", "e"]);
    let segments = segment_sequence(&tokens, &[0, 2, 5]);
    assert_eq!(segments, vec![toks(&["a", "b"]), toks(&["c", "d", "e"])]);
  }

  #[test]
  fn optimal_parameters_stay_within_the_requested_range() {
    let hypothesis = vec!["a".to_string(); 50];
    let reference = vec!["a".to_string(); 50];
    let (length, barrier) = optimal_segment_parameters(&hypothesis, &reference, 10, 20, 4);
    assert!((10..20).contains(&length));
    assert_eq!(barrier, 4);
  }
}

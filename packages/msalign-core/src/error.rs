//! Typed errors for the alignment library.

use thiserror::Error;

/// Everything that can go wrong inside `msalign_core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
  /// An input token or label stream contained the reserved gap sentinel (`"-"`).
  #[error("gap sentinel found in input at position {position}")]
  GapSentinelInInput { position: usize },

  /// Two positionally-paired sequences (e.g. reference tokens and reference labels) disagree
  /// on length.
  #[error("length mismatch: {name_a} has {len_a} elements, {name_b} has {len_b}")]
  LengthMismatch { name_a: &'static str, len_a: usize, name_b: &'static str, len_b: usize },

  /// The comparator was given more than one non-gap candidate across the reference axes of a
  /// single column. This indicates a caller built a column with two speakers both contributing
  /// a real token to the same alignment cell, which the model forbids.
  #[error("comparator received {count} non-gap reference candidates in one column, expected at most 1")]
  MultipleNonGapReferences { count: usize },

  /// The dense score tensor required by the requested strand lengths exceeds the caller's cap.
  #[error("score tensor would require {cells} cells, exceeding the cap of {cap}")]
  TensorTooLarge { cells: u64, cap: u64 },
}

//! The gap-padded alignment result: one row per strand, all rows the same length.

use crate::token::Token;

/// Row 0 is the hypothesis; rows `1..` are reference strands, in the order they were supplied
/// to the aligner. Every row has the same length, padded with [`crate::token::GAP`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
  rows: Vec<Vec<Token>>,
}

impl Grid {
  pub fn new(rows: Vec<Vec<Token>>) -> Self {
    debug_assert!(rows.windows(2).all(|w| w[0].len() == w[1].len()), "grid rows must be equal length");
    Self { rows }
  }

  pub fn rows(&self) -> &[Vec<Token>] {
    &self.rows
  }

  pub fn hypothesis_row(&self) -> &[Token] {
    &self.rows[0]
  }

  pub fn reference_rows(&self) -> &[Vec<Token>] {
    &self.rows[1..]
  }

  pub fn num_columns(&self) -> usize {
    self.rows.first().map_or(0, Vec::len)
  }

  pub fn num_strands(&self) -> usize {
    self.rows.len()
  }
}

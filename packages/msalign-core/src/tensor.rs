//! The dense score tensor: one 16-bit signed score per coordinate, allocated once per call.

use crate::coords::Strides;
use crate::error::AlignError;

/// Default cell cap for a single `ScoreTensor` allocation, mirrored off the alignment-band
/// area cap a pairwise aligner in this family typically defaults to.
pub const DEFAULT_MAX_TENSOR_CELLS: u64 = 500_000_000;

/// The flat score tensor addressed by `Strides`. Cells hold the best score reachable at that
/// coordinate; `i16` matches the fixed-width accumulator the scoring rule produces.
#[derive(Debug)]
pub struct ScoreTensor {
  lengths: Vec<usize>,
  strides: Strides,
  cells: Vec<i16>,
}

impl ScoreTensor {
  /// Allocates a tensor sized for `lengths` (one entry per strand, `lengths[i] + 1` cells along
  /// axis `i`). Refuses to allocate past `max_cells`, so a pathologically long input segment
  /// fails fast instead of exhausting memory.
  pub fn try_new(lengths: Vec<usize>, max_cells: u64) -> Result<Self, AlignError> {
    let mut total: u64 = 1;
    for &len in &lengths {
      total = total.saturating_mul(len as u64 + 1);
    }
    if total > max_cells {
      return Err(AlignError::TensorTooLarge { cells: total, cap: max_cells });
    }
    if total.saturating_mul(10) > max_cells {
      log::warn!("score tensor of {total} cells is within an order of magnitude of the cap ({max_cells})");
    }
    let strides = Strides::new(&lengths);
    Ok(Self { lengths, strides, cells: vec![0i16; total as usize] })
  }

  pub fn lengths(&self) -> &[usize] {
    &self.lengths
  }

  pub fn get(&self, coord: &[usize]) -> i16 {
    self.cells[self.strides.pack(coord)]
  }

  pub fn set(&mut self, coord: &[usize], value: i16) {
    let offset = self.strides.pack(coord);
    self.cells[offset] = value;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn get_set_roundtrip() {
    let mut tensor = ScoreTensor::try_new(vec![2, 2], 1_000).unwrap();
    tensor.set(&[1, 2], 5);
    assert_eq!(tensor.get(&[1, 2]), 5);
    assert_eq!(tensor.get(&[0, 0]), 0);
  }

  #[test]
  fn refuses_to_allocate_past_the_cap() {
    let err = ScoreTensor::try_new(vec![1000, 1000, 1000], 1_000).unwrap_err();
    assert_eq!(err, AlignError::TensorTooLarge { cells: 1001 * 1001 * 1001, cap: 1_000 });
  }
}

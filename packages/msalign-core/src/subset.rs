//! Enumeration of non-empty axis subsets and their backward predecessors.
//!
//! Strand 0 is always the hypothesis; strands `1..num_strands` are the occupied reference
//! sub-strands. A "subset" here is the set of axes that advance together in one DP step.

use itertools::Itertools;

/// A non-empty, ascending-sorted set of strand axes.
pub type Subset = Vec<usize>;

/// One backward step out of a DP cell: either a single axis retreats one token, or (only when
/// axis 0 is in the subset) axis 0 and one other axis retreat together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predecessor {
  Single(usize),
  Double(usize),
}

/// All non-empty subsets of `0..num_strands`, ordered by increasing size and then
/// lexicographically within a size. This is also the order subsets are filled in during the
/// forward pass, which guarantees every predecessor of a cell in a later subset was already
/// written by an earlier one.
pub fn enumerate_subsets(num_strands: usize) -> Vec<Subset> {
  (1..=num_strands).flat_map(|size| (0..num_strands).combinations(size)).collect()
}

/// Predecessor directions for `subset`, in canonical tie-break order: every single-axis
/// direction first (ascending axis order), then, if axis 0 is a member, every double-axis
/// direction pairing axis 0 with another member (ascending axis order). Backtracking tries
/// predecessors in this exact order and commits to the first one whose score accounts for the
/// cell.
pub fn enumerate_predecessors(subset: &[usize]) -> Vec<Predecessor> {
  let mut predecessors: Vec<Predecessor> = subset.iter().map(|&axis| Predecessor::Single(axis)).collect();
  if subset.contains(&0) {
    predecessors.extend(subset.iter().filter(|&&axis| axis != 0).map(|&axis| Predecessor::Double(axis)));
  }
  predecessors
}

/// Iterates every coordinate touched by `subset`: axes in `subset` range over `1..=lengths[axis]`,
/// every other axis stays at `0`. The last axis of `subset` varies fastest, matching the nested
/// traversal order the forward pass relies on.
pub struct SubsetCoords<'a> {
  subset: &'a [usize],
  lengths: &'a [usize],
  next: Option<Vec<usize>>,
}

impl<'a> SubsetCoords<'a> {
  pub fn new(subset: &'a [usize], lengths: &'a [usize], num_strands: usize) -> Self {
    let mut start = vec![0usize; num_strands];
    for &axis in subset {
      start[axis] = 1;
    }
    Self { subset, lengths, next: Some(start) }
  }
}

impl Iterator for SubsetCoords<'_> {
  type Item = Vec<usize>;

  fn next(&mut self) -> Option<Vec<usize>> {
    let current = self.next.take()?;
    let mut advanced = current.clone();
    let mut carry = true;
    for &axis in self.subset.iter().rev() {
      if !carry {
        break;
      }
      advanced[axis] += 1;
      if advanced[axis] > self.lengths[axis] {
        advanced[axis] = 1;
      } else {
        carry = false;
      }
    }
    self.next = if carry { None } else { Some(advanced) };
    Some(current)
  }
}

/// The predecessor coordinate reached by retreating `coord` along `predecessor`.
pub fn predecessor_coord(coord: &[usize], predecessor: Predecessor) -> Vec<usize> {
  let mut out = coord.to_vec();
  match predecessor {
    Predecessor::Single(axis) => out[axis] -= 1,
    Predecessor::Double(axis) => {
      out[0] -= 1;
      out[axis] -= 1;
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn subsets_of_two_strands() {
    assert_eq!(enumerate_subsets(2), vec![vec![0], vec![1], vec![0, 1]]);
  }

  #[test]
  fn subsets_of_three_strands_grouped_by_size() {
    assert_eq!(
      enumerate_subsets(3),
      vec![vec![0], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2], vec![0, 1, 2]]
    );
  }

  #[test]
  fn predecessors_without_axis_zero_are_singles_only() {
    assert_eq!(enumerate_predecessors(&[1, 2]), vec![Predecessor::Single(1), Predecessor::Single(2)]);
  }

  #[test]
  fn predecessors_with_axis_zero_add_doubles_after_all_singles() {
    assert_eq!(
      enumerate_predecessors(&[0, 1, 2]),
      vec![
        Predecessor::Single(0),
        Predecessor::Single(1),
        Predecessor::Single(2),
        Predecessor::Double(1),
        Predecessor::Double(2),
      ]
    );
  }

  #[test]
  fn coords_iterate_last_subset_axis_fastest() {
    let lengths = vec![2, 3, 2];
    let coords: Vec<_> = SubsetCoords::new(&[0, 2], &lengths, 3).collect();
    assert_eq!(
      coords,
      vec![vec![1, 0, 1], vec![1, 0, 2], vec![2, 0, 1], vec![2, 0, 2]]
    );
  }

  #[test]
  fn double_predecessor_decrements_axis_zero_and_the_paired_axis() {
    assert_eq!(predecessor_coord(&[3, 2, 1], Predecessor::Double(2)), vec![2, 2, 0]);
  }
}

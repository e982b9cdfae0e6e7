use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Aligns an ASR hypothesis transcript against a multi-speaker reference transcript.
///
/// Reads a row-per-sequence CSV (hypothesis tokens, reference tokens, reference speaker
/// labels, and an optional hypothesis speaker label row) and writes back a gap-padded
/// alignment grid, one row per speaker.
#[derive(Parser, Debug)]
#[clap(name = "msalign", author, version)]
pub struct MsalignArgs {
  /// Path to the input CSV file.
  #[clap(long, short = 'i')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub input: PathBuf,

  /// Path to write the aligned grid CSV to.
  #[clap(long, short = 'o')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub output: PathBuf,

  /// Path to write a JSON report (match categories, index maps) to. If omitted, no report is
  /// written.
  #[clap(long, short = 'j')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub output_json: Option<PathBuf>,

  /// Segmentation strategy to use before aligning.
  #[clap(long, value_enum, default_value_t = SegmentMode::Auto)]
  pub segment_mode: SegmentMode,

  /// Fixed segment length to use with `--segment-mode manual`. Ignored otherwise.
  #[clap(long, default_value_t = msalign_core::segmentation::DEFAULT_SEGMENT_LENGTH)]
  pub segment_length: usize,

  /// Length of the matching token run required to confirm a segmentation cut point.
  #[clap(long, default_value_t = msalign_core::segmentation::DEFAULT_BARRIER_LENGTH)]
  pub barrier_length: usize,

  /// Edit-distance cutoff below which a non-identical token pair still counts as a partial
  /// match rather than a mismatch.
  #[clap(long, default_value_t = 2)]
  pub partial_bound: i32,

  /// Make output more quiet or more verbose. Repeat for more detail (`-v`, `-vv`, `-vvv`).
  #[clap(long, short = 'v', action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Disable all console output.
  #[clap(long, conflicts_with = "verbose")]
  pub silent: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
  /// Align the whole transcript in one DP pass. Only suitable for short transcripts.
  None,
  /// Sweep the segment length automatically and align segment by segment.
  Auto,
  /// Align segment by segment using `--segment-length`/`--barrier-length` directly.
  Manual,
}

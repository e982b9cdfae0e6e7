mod cli;
mod csv_adapter;
mod logging;

use clap::Parser;
use eyre::{Report, WrapErr};
use msalign_core::{
  align_indices, aligned_hypo_speaker_label, align_with_auto_segment, align_with_manual_segment, align_without_segment,
  ref_original_indices, token_match_result, unique_speaker_label, Grid,
};
use serde::Serialize;

use crate::cli::{MsalignArgs, SegmentMode};

fn main() -> Result<(), Report> {
  let args = MsalignArgs::parse();
  logging::setup_logger(args.verbose, args.silent);

  let input = csv_adapter::read_input_csv(&args.input)?;
  let speakers = unique_speaker_label(&input.reference_labels);

  let grid = match args.segment_mode {
    SegmentMode::None => {
      align_without_segment(&input.hypothesis, &input.reference, &input.reference_labels, args.partial_bound)
    }
    SegmentMode::Auto => {
      align_with_auto_segment(&input.hypothesis, &input.reference, &input.reference_labels, args.partial_bound)
    }
    SegmentMode::Manual => align_with_manual_segment(
      &input.hypothesis,
      &input.reference,
      &input.reference_labels,
      args.segment_length,
      args.barrier_length,
      args.partial_bound,
    ),
  }
  .wrap_err("While aligning the hypothesis against the reference")?;

  let match_categories: Vec<&'static str> =
    token_match_result(&grid, args.partial_bound).into_iter().map(|category| category.as_str()).collect();

  csv_adapter::write_grid_csv(&args.output, &grid, &speakers, &match_categories).wrap_err("While writing the aligned grid")?;

  if let Some(json_path) = &args.output_json {
    let report = build_report(&grid, &input);
    let json = serde_json::to_string_pretty(&report).wrap_err("While serializing the JSON report")?;
    std::fs::write(json_path, json).wrap_err_with(|| format!("While writing JSON report {json_path:?}"))?;
  }

  Ok(())
}

/// The index maps and speaker-label row §6 marks "on request": written as JSON only when the
/// caller asks for it. The match-category list is unconditional, so it lives in the CSV output
/// instead (see `csv_adapter::write_grid_csv`), not here.
#[derive(Serialize)]
struct AlignmentReport {
  align_indices: Vec<Vec<i64>>,
  ref_original_indices: Vec<Vec<usize>>,
  aligned_hypo_speaker_label: Option<Vec<String>>,
}

fn build_report(grid: &Grid, input: &csv_adapter::InputRows) -> AlignmentReport {
  AlignmentReport {
    align_indices: align_indices(grid),
    ref_original_indices: ref_original_indices(&input.reference, &input.reference_labels),
    aligned_hypo_speaker_label: input.hypothesis_labels.as_ref().map(|labels| aligned_hypo_speaker_label(grid, labels)),
  }
}

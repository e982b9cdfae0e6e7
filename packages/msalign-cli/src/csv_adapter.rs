//! Reads the row-per-sequence CSV input format and writes the aligned grid back out.
//!
//! Input rows (no header, one row per sequence, fields comma-separated): the hypothesis
//! tokens, the reference tokens, the reference speaker labels, and optionally a fourth row of
//! per-token hypothesis speaker labels.

use std::fs::File;
use std::path::Path;

use eyre::{eyre, Report, WrapErr};
use msalign_core::Token;

pub struct InputRows {
  pub hypothesis: Vec<Token>,
  pub reference: Vec<Token>,
  pub reference_labels: Vec<Token>,
  pub hypothesis_labels: Option<Vec<Token>>,
}

pub fn read_input_csv(path: &Path) -> Result<InputRows, Report> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_path(path)
    .wrap_err_with(|| format!("While opening input CSV {path:?}"))?;

  let mut rows: Vec<Vec<String>> = Vec::new();
  for record in reader.records() {
    let record = record.wrap_err("While reading a CSV record")?;
    rows.push(record.iter().map(str::to_owned).collect());
  }

  if rows.len() < 3 {
    return Err(eyre!("Expected at least 3 rows (hypothesis, reference, reference labels), found {}", rows.len()));
  }

  Ok(InputRows {
    hypothesis: rows[0].clone(),
    reference: rows[1].clone(),
    reference_labels: rows[2].clone(),
    hypothesis_labels: rows.get(3).cloned(),
  })
}

/// Writes one row per alignment strand (first column `"hypothesis"` or the speaker label,
/// the rest the gap-padded tokens), followed unconditionally by a `"match_result"` row with
/// the per-column match category.
pub fn write_grid_csv(path: &Path, grid: &msalign_core::Grid, speakers: &[Token], match_categories: &[&str]) -> Result<(), Report> {
  let file = File::create(path).wrap_err_with(|| format!("While creating output CSV {path:?}"))?;
  let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

  let mut hypothesis_row = vec!["hypothesis".to_owned()];
  hypothesis_row.extend(grid.hypothesis_row().iter().cloned());
  writer.write_record(&hypothesis_row).wrap_err("While writing the hypothesis row")?;

  for (speaker, row) in speakers.iter().zip(grid.reference_rows()) {
    let mut record = vec![speaker.clone()];
    record.extend(row.iter().cloned());
    writer.write_record(&record).wrap_err_with(|| format!("While writing the row for speaker {speaker:?}"))?;
  }

  let mut match_result_row = vec!["match_result".to_owned()];
  match_result_row.extend(match_categories.iter().map(|category| (*category).to_owned()));
  writer.write_record(&match_result_row).wrap_err("While writing the match_result row")?;

  writer.flush().wrap_err("While flushing the output CSV")?;
  Ok(())
}

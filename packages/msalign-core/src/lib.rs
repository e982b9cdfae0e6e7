//! N-dimensional Needleman-Wunsch alignment of a hypothesis token stream against per-speaker
//! reference strands, for scoring ASR transcripts against multi-speaker references.
//!
//! The entry points in [`orchestration`] do the work end to end: partition a labeled reference
//! into per-speaker strands, optionally segment long inputs to bound the DP tensor, align, and
//! stitch segment results back into one gap-padded [`Grid`]. [`derive`] turns a finished grid
//! into the match categories and index maps callers actually report.

pub mod aligner;
pub mod coords;
pub mod derive;
pub mod error;
pub mod grid;
pub mod orchestration;
pub mod scoring;
pub mod segmentation;
pub mod subset;
pub mod tensor;
pub mod token;

pub use derive::{align_indices, aligned_hypo_speaker_label, ref_original_indices, token_match_result, MatchCategory};
pub use error::AlignError;
pub use grid::Grid;
pub use orchestration::{align_with_auto_segment, align_with_manual_segment, align_without_segment, unique_speaker_label};
pub use token::{Label, Token, GAP};

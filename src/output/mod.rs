//! Output artifacts: placeholder files and machine-readable summaries

pub mod placeholder;
pub mod summary;

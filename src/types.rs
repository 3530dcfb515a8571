//! Type aliases shared across the codebook, counting core and transforms.
//!
//! These type aliases provide semantic clarity throughout the codebase.

/// Integer position assigned to a token in the codebook.
///
/// Codes are assigned sequentially in first-seen order, starting from 0,
/// and double as feature-vector indices.
pub type Code = usize;

/// Saturation-capped number of occurrences of one token within one sequence.
pub type Count = u32;

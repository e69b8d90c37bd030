//! Pairwise protein alignment and the position maps derived from it.
//!
//! * [`sub_matrix`] - BLOSUM62 substitution scoring over byte-indexed tables.
//! * [`pairwise`] - Global alignment with affine gap penalties (three-matrix DP).
//! * [`map`] - Bidirectional ungapped-position maps for a finished alignment.

pub mod map;
pub mod pairwise;
pub mod sub_matrix;

pub use map::{build_maps, PositionMaps};
pub use pairwise::{align, consensus, pair_alignment, AlignedRow, AlignmentResult, PairAlignment};
pub use sub_matrix::SubMatrix;

//! Core data structures flowing through `cghelix`.
//!
//! - [`types`] – Nucleobase identities and residue-name parsing.
//! - [`bead`] – A named coarse-grained bead with Cartesian coordinates.
//! - [`residue`] – One nucleotide: ordered index, name and beads.
//! - [`frame`] – Origin plus orthonormal rotation describing a local coordinate system.
//! - [`params`] – Base-pair, step and local helical parameter records and their tables.
//!
//! Input geometry ([`Residue`](residue::Residue)) and derived quantities
//! ([`Frame`](frame::Frame), [`ParameterTable`](params::ParameterTable)) are kept
//! separate; [`analyze`](crate::analyze) turns one into the other in a single
//! forward pass.

pub mod bead;
pub mod frame;
pub mod params;
pub mod residue;
pub mod types;

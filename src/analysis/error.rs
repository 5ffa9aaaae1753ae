//! Error types for helical parameter analysis.
//!
//! Every variant is terminal for the run: the computation is deterministic, so
//! nothing is retried and no default is substituted. Residue errors carry the
//! 1-based residue index; pair and step errors carry the zero-based row of the
//! output table together with the [`Stage`] that produced it.

use std::fmt;
use thiserror::Error;

use crate::model::types::BaseType;

/// Pipeline stage an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BasePair,
    Step,
    LocalHelix,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::BasePair => write!(f, "base pair"),
            Stage::Step => write!(f, "base-pair step"),
            Stage::LocalHelix => write!(f, "local helical step"),
        }
    }
}

/// A hinge or helical axis could not be defined because the vectors it is
/// built from are (anti)parallel or vanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Singularity(pub &'static str);

/// Errors that can occur while computing helical parameters.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a reference geometry TOML document.
    #[error("failed to parse reference geometry: {0}")]
    ReferenceParse(#[from] toml::de::Error),

    /// Residue name does not map to one of A, C, G or T.
    #[error("residue {index} ('{name}') is not a supported nucleotide")]
    UnsupportedResidue {
        /// 1-based residue index.
        index: usize,
        /// Residue name as read from the input.
        name: String,
    },

    /// Least-squares superposition of a base onto its reference failed.
    ///
    /// Covers bead-count mismatches, missing beads, a missing reference entry
    /// and eigenvalue ties that leave the rotation undetermined.
    #[error("frame fit failed for residue {index} ({base}): {detail}")]
    GeometryFit {
        /// 1-based residue index.
        index: usize,
        /// Base type of the residue.
        base: BaseType,
        /// Description of the problem.
        detail: String,
    },

    /// A hinge axis, local helical axis or displacement could not be formed.
    #[error("singular geometry in {stage} {index}")]
    SingularGeometry {
        /// Stage that hit the singularity.
        stage: Stage,
        /// Zero-based pair or step index.
        index: usize,
        #[source]
        source: Singularity,
    },

    /// The residue list cannot form a paired duplex.
    #[error("invalid duplex topology: {0}")]
    InvalidTopology(String),
}

impl Error {
    /// Creates a [`GeometryFit`](Error::GeometryFit) error.
    ///
    /// # Arguments
    ///
    /// * `index` — 1-based residue index
    /// * `base` — Base type of the residue
    /// * `detail` — Description of the problem
    pub fn geometry_fit(index: usize, base: BaseType, detail: impl Into<String>) -> Self {
        Self::GeometryFit {
            index,
            base,
            detail: detail.into(),
        }
    }

    /// Creates a [`SingularGeometry`](Error::SingularGeometry) error.
    pub fn singular(stage: Stage, index: usize, source: Singularity) -> Self {
        Self::SingularGeometry {
            stage,
            index,
            source,
        }
    }

    /// Index of the unit that failed, if the error is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::UnsupportedResidue { index, .. }
            | Error::GeometryFit { index, .. }
            | Error::SingularGeometry { index, .. } => Some(*index),
            Error::ReferenceParse(_) | Error::InvalidTopology(_) => None,
        }
    }
}

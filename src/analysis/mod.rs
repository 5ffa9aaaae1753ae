mod config;
mod error;
mod fit;
mod geometry;
mod local;
mod pair;
mod pipeline;
mod reference;
mod step;
mod strand;

pub use config::AnalysisConfig;
pub use error::{Error, Singularity, Stage};
pub use fit::{BaseFit, Superposition, SuperpositionError, fit_base, quaternion_to_rotation, superpose};
pub use local::build_local;
pub use pair::{build_pair, pair_frame};
pub use pipeline::{HelicalAnalysis, Pipeline};
pub use reference::{BeadSet, ReferenceBead, ReferenceGeometry, StandardBases, load_reference};
pub use step::build_step;
pub use strand::orient;

use crate::model::residue::Residue;

/// Computes base-pair, step and local helical parameters of a duplex.
///
/// Loads the reference geometry named by `config` and runs a [`Pipeline`]
/// over `residues`.
pub fn analyze(residues: &[Residue], config: &AnalysisConfig) -> Result<HelicalAnalysis, Error> {
    let reference = load_reference(config.reference.as_deref())?;
    Pipeline::new(config, &reference).run(residues)
}

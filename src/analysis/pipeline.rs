use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::AnalysisConfig;
use super::error::{Error, Stage};
use super::fit::fit_base;
use super::local::build_local;
use super::pair::{build_pair, pair_frame};
use super::reference::ReferenceGeometry;
use super::step::build_step;
use super::strand::orient;
use crate::model::frame::Frame;
use crate::model::params::{BasePairParams, LocalHelicalParams, ParameterTable, StepParams};
use crate::model::residue::{Residue, pair_partner};

/// Everything derived from one duplex.
///
/// Vectors are index-addressed: `base_frames[i]` belongs to the `i`-th input
/// residue, `pair_frames[i]` to base pair `i` (residue `i` with residue
/// `N - 1 - i`), `step_frames[i]` to the step from pair `i` to pair `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct HelicalAnalysis {
    /// Fitted base frames, second-strand frames already oriented.
    pub base_frames: Vec<Frame>,
    /// RMS deviation of each base's beads from its fitted reference.
    pub fit_rmsd: Vec<f64>,
    /// Averaged base-pair frames that steps are measured between.
    pub pair_frames: Vec<Frame>,
    /// Half-angle frames the base-pair parameters are measured in.
    pub pair_mean_frames: Vec<Frame>,
    /// Mid-step frames.
    pub step_frames: Vec<Frame>,
    pub base_pairs: ParameterTable<BasePairParams>,
    pub steps: ParameterTable<StepParams>,
    pub local: ParameterTable<LocalHelicalParams>,
}

impl HelicalAnalysis {
    pub fn pair_count(&self) -> usize {
        self.pair_frames.len()
    }

    pub fn step_count(&self) -> usize {
        self.step_frames.len()
    }
}

/// Runs frame fitting, pairing and step analysis over a duplex.
pub struct Pipeline<'a> {
    config: &'a AnalysisConfig,
    reference: &'a dyn ReferenceGeometry,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AnalysisConfig, reference: &'a dyn ReferenceGeometry) -> Self {
        Self { config, reference }
    }

    /// Analyzes `residues`, strand I first and strand II following in its
    /// own 5'→3' order, so that residue `i` pairs with residue `N - 1 - i`.
    ///
    /// The first error aborts the run. With parallel execution enabled the
    /// reported error is still the one with the lowest index in the failing
    /// stage.
    pub fn run(&self, residues: &[Residue]) -> Result<HelicalAnalysis, Error> {
        let total = residues.len();
        check_topology(total)?;
        let pairs = total / 2;
        let steps = pairs - 1;
        debug!(residues = total, pairs, steps, "starting helical analysis");

        let tolerance = self.config.singular_tolerance;

        let fits = self.map_indexed(total, |i| {
            let fit = fit_base(&residues[i], self.reference, self.config.eigen_tie_tolerance)?;
            trace!(residue = residues[i].index, rmsd = fit.rmsd, "fitted base frame");
            Ok((orient(&fit.frame, i, total), fit.rmsd))
        })?;
        let (base_frames, fit_rmsd): (Vec<Frame>, Vec<f64>) = fits.into_iter().unzip();
        debug!("fitted {} base frames", base_frames.len());

        let paired = self.map_indexed(pairs, |i| {
            let a = &base_frames[i];
            let b = &base_frames[pair_partner(i, total)];
            let (mean, params) =
                build_pair(a, b, tolerance).map_err(|s| Error::singular(Stage::BasePair, i, s))?;
            Ok((pair_frame(a, b), mean, params))
        })?;
        let mut pair_frames = Vec::with_capacity(pairs);
        let mut pair_mean_frames = Vec::with_capacity(pairs);
        let mut base_pairs = Vec::with_capacity(pairs);
        for (frame, mean, params) in paired {
            pair_frames.push(frame);
            pair_mean_frames.push(mean);
            base_pairs.push(params);
        }
        debug!("built {} base-pair frames", pairs);

        let stepped = self.map_indexed(steps, |i| {
            let (first, second) = (&pair_frames[i], &pair_frames[i + 1]);
            let (mid, params) =
                build_step(first, second, tolerance).map_err(|s| Error::singular(Stage::Step, i, s))?;
            let local = build_local(first, second, tolerance)
                .map_err(|s| Error::singular(Stage::LocalHelix, i, s))?;
            Ok((mid, params, local))
        })?;
        let mut step_frames = Vec::with_capacity(steps);
        let mut step_params = Vec::with_capacity(steps);
        let mut local_params = Vec::with_capacity(steps);
        for (mid, params, local) in stepped {
            step_frames.push(mid);
            step_params.push(params);
            local_params.push(local);
        }
        debug!("built {} step frames", steps);

        Ok(HelicalAnalysis {
            base_frames,
            fit_rmsd,
            pair_frames,
            pair_mean_frames,
            step_frames,
            base_pairs: base_pairs.into(),
            steps: step_params.into(),
            local: local_params.into(),
        })
    }

    /// Evaluates `f` for every index in `0..n`, keeping the results in index
    /// order.
    fn map_indexed<T, F>(&self, n: usize, f: F) -> Result<Vec<T>, Error>
    where
        T: Send,
        F: Fn(usize) -> Result<T, Error> + Sync + Send,
    {
        if self.config.parallel {
            let results: Vec<Result<T, Error>> = (0..n).into_par_iter().map(f).collect();
            results.into_iter().collect()
        } else {
            (0..n).map(f).collect()
        }
    }
}

fn check_topology(total: usize) -> Result<(), Error> {
    if total == 0 {
        return Err(Error::InvalidTopology("no residues to analyze".to_string()));
    }
    if total % 2 != 0 {
        return Err(Error::InvalidTopology(format!(
            "odd residue count {total}; every base needs a partner"
        )));
    }
    Ok(())
}

/// Settings for one analysis run.
///
/// The configuration is immutable once handed to the
/// [`Pipeline`](super::Pipeline); every stage reads it, none writes it.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Custom reference geometry as TOML text. `None` selects the embedded
    /// standard bead geometry.
    pub reference: Option<String>,
    /// Relative gap below which the two largest eigenvalues of the
    /// superposition key matrix count as tied.
    pub eigen_tie_tolerance: f64,
    /// Norm below which a cross product, difference vector or half-angle sine
    /// is treated as zero.
    pub singular_tolerance: f64,
    /// Fit residues and build steps on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference: None,
            eigen_tie_tolerance: 1e-10,
            singular_tolerance: 1e-8,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    pub fn with_reference(mut self, toml: impl Into<String>) -> Self {
        self.reference = Some(toml.into());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

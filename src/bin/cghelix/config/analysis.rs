use anyhow::{Context, Result, ensure};

use cghelix::AnalysisConfig;

use crate::cli::AnalysisOptions;

pub fn build_analysis_config(opts: &AnalysisOptions) -> Result<AnalysisConfig> {
    ensure!(
        opts.tie_tolerance > 0.0 && opts.singular_tolerance > 0.0,
        "Tolerances must be positive"
    );

    let reference = opts
        .reference
        .as_ref()
        .map(|path| {
            std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read reference geometry: {}", path.display())
            })
        })
        .transpose()?;

    Ok(AnalysisConfig {
        reference,
        eigen_tie_tolerance: opts.tie_tolerance,
        singular_tolerance: opts.singular_tolerance,
        parallel: opts.parallel,
    })
}

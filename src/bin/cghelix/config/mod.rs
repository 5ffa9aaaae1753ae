mod analysis;

pub use analysis::build_analysis_config;

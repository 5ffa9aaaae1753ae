use std::path::PathBuf;

/// What an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    BasePairTable,
    StepTable,
    LocalTable,
    BaseCenters,
    PairCenters,
    StepCenters,
}

impl OutputKind {
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::BasePairTable => "_basepair.json",
            OutputKind::StepTable => "_step.json",
            OutputKind::LocalTable => "_local.json",
            OutputKind::BaseCenters => "_bases.pdb",
            OutputKind::PairCenters => "_bp.pdb",
            OutputKind::StepCenters => "_midframe.pdb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputKind::BasePairTable => "base-pair parameters",
            OutputKind::StepTable => "step parameters",
            OutputKind::LocalTable => "local helical parameters",
            OutputKind::BaseCenters => "base origins",
            OutputKind::PairCenters => "base-pair origins",
            OutputKind::StepCenters => "mid-step origins",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub kind: OutputKind,
}

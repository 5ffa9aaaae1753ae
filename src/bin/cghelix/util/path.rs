use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Appends `suffix` to the full file name of `prefix`, so `out/run.1` with
/// `_step.json` becomes `out/run.1_step.json`.
pub fn prefixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = prefix.file_name().unwrap_or_default().to_owned();
    name.push(suffix);
    prefix.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_dots_in_prefix() {
        assert_eq!(
            prefixed(Path::new("out/run.1"), "_step.json"),
            PathBuf::from("out/run.1_step.json")
        );
    }

    #[test]
    fn bare_prefix() {
        assert_eq!(
            prefixed(Path::new("dna"), "_bp.pdb"),
            PathBuf::from("dna_bp.pdb")
        );
    }
}

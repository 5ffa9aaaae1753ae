use super::bead::Bead;
use super::types::{BaseType, ParseBaseTypeError};

/// One nucleotide of the coarse-grained duplex.
///
/// `index` is the 1-based position of the residue in the input ordering and
/// is what every error and output table refers to. `seq_id` and `chain_id`
/// are carried from the source file for reporting only.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub index: usize,
    pub name: String,
    pub seq_id: i32,
    pub chain_id: char,
    pub beads: Vec<Bead>,
}

impl Residue {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            seq_id: index as i32,
            chain_id: ' ',
            beads: Vec::new(),
        }
    }

    pub fn with_beads(mut self, beads: Vec<Bead>) -> Self {
        self.beads = beads;
        self
    }

    pub fn base_type(&self) -> Result<BaseType, ParseBaseTypeError> {
        self.name.parse()
    }

    pub fn bead(&self, name: &str) -> Option<&Bead> {
        self.beads.iter().find(|b| b.name == name)
    }

    pub fn side_chain_beads(&self) -> impl Iterator<Item = &Bead> {
        self.beads.iter().filter(|b| b.is_side_chain())
    }

    #[inline]
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }
}

/// Zero-based index of the residue paired with residue `i` in a duplex of
/// `total` residues, strand I running `0..total/2` and strand II running
/// backwards from `total - 1`.
#[inline]
pub fn pair_partner(i: usize, total: usize) -> usize {
    total - 1 - i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_chain_filter_skips_backbone() {
        let residue = Residue::new(1, "DA").with_beads(vec![
            Bead::new("BB1", [0.0; 3]),
            Bead::new("BB2", [0.0; 3]),
            Bead::new("SC1", [1.0, 0.0, 0.0]),
            Bead::new("SC2", [2.0, 0.0, 0.0]),
        ]);
        assert_eq!(residue.bead_count(), 4);
        assert_eq!(residue.side_chain_beads().count(), 2);
        assert_eq!(residue.bead("SC2").map(|b| b.position[0]), Some(2.0));
        assert!(residue.bead("SC3").is_none());
        assert_eq!(residue.base_type().unwrap(), BaseType::A);
    }

    #[test]
    fn partner_mirrors_index() {
        assert_eq!(pair_partner(0, 8), 7);
        assert_eq!(pair_partner(3, 8), 4);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    pub name: String,
    pub position: [f64; 3],
}

impl Bead {
    pub fn new(name: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Side-chain beads of the coarse-grained nucleotide are named `SC1`, `SC2`, ...
    pub fn is_side_chain(&self) -> bool {
        self.name
            .strip_prefix("SC")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_chain_names_are_recognized() {
        assert!(Bead::new("SC1", [0.0; 3]).is_side_chain());
        assert!(Bead::new("SC4", [0.0; 3]).is_side_chain());
        assert!(!Bead::new("BB1", [0.0; 3]).is_side_chain());
        assert!(!Bead::new("SC", [0.0; 3]).is_side_chain());
        assert!(!Bead::new("SCX", [0.0; 3]).is_side_chain());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported nucleotide residue name: '{0}'")]
pub struct ParseBaseTypeError(String);

/// Nucleobase identity of a DNA residue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BaseType {
    A,
    C,
    G,
    T,
}

impl BaseType {
    pub const ALL: [BaseType; 4] = [BaseType::A, BaseType::C, BaseType::G, BaseType::T];

    pub fn letter(&self) -> char {
        match self {
            BaseType::A => 'A',
            BaseType::C => 'C',
            BaseType::G => 'G',
            BaseType::T => 'T',
        }
    }

    /// Number of side-chain beads carried by this base in the
    /// coarse-grained model: four for purines, three for pyrimidines.
    pub fn side_chain_bead_count(&self) -> usize {
        match self {
            BaseType::A | BaseType::G => 4,
            BaseType::C | BaseType::T => 3,
        }
    }

    pub fn is_purine(&self) -> bool {
        matches!(self, BaseType::A | BaseType::G)
    }

    pub fn complement(&self) -> BaseType {
        match self {
            BaseType::A => BaseType::T,
            BaseType::C => BaseType::G,
            BaseType::G => BaseType::C,
            BaseType::T => BaseType::A,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for BaseType {
    type Err = ParseBaseTypeError;

    /// Accepts bare letters (`A`), DNA residue names (`DA`), terminal
    /// variants (`DA5`, `DA3`) and three-letter names (`ADE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();

        let by_long_name = match upper.as_str() {
            "ADE" => Some(BaseType::A),
            "CYT" => Some(BaseType::C),
            "GUA" => Some(BaseType::G),
            "THY" => Some(BaseType::T),
            _ => None,
        };
        if let Some(base) = by_long_name {
            return Ok(base);
        }

        let core = upper.trim_end_matches(['3', '5']);
        let core = match core.len() {
            2 => core.strip_prefix('D').unwrap_or(core),
            _ => core,
        };

        match core {
            "A" => Ok(BaseType::A),
            "C" => Ok(BaseType::C),
            "G" => Ok(BaseType::G),
            "T" => Ok(BaseType::T),
            _ => Err(ParseBaseTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_type_from_str_variants() {
        assert_eq!("A".parse::<BaseType>().unwrap(), BaseType::A);
        assert_eq!("DC".parse::<BaseType>().unwrap(), BaseType::C);
        assert_eq!("dg".parse::<BaseType>().unwrap(), BaseType::G);
        assert_eq!(" DT ".parse::<BaseType>().unwrap(), BaseType::T);
        assert_eq!("DA5".parse::<BaseType>().unwrap(), BaseType::A);
        assert_eq!("DT3".parse::<BaseType>().unwrap(), BaseType::T);
        assert_eq!("GUA".parse::<BaseType>().unwrap(), BaseType::G);
    }

    #[test]
    fn base_type_from_str_invalid() {
        assert!("U".parse::<BaseType>().is_err());
        assert!("DU".parse::<BaseType>().is_err());
        assert!("ALA".parse::<BaseType>().is_err());
        assert!("".parse::<BaseType>().is_err());
        assert!("XA".parse::<BaseType>().is_err());
    }

    #[test]
    fn bead_counts_follow_ring_size() {
        assert_eq!(BaseType::A.side_chain_bead_count(), 4);
        assert_eq!(BaseType::G.side_chain_bead_count(), 4);
        assert_eq!(BaseType::C.side_chain_bead_count(), 3);
        assert_eq!(BaseType::T.side_chain_bead_count(), 3);
    }

    #[test]
    fn complement_pairs_watson_crick() {
        for base in BaseType::ALL {
            assert_eq!(base.complement().complement(), base);
            assert_ne!(base.complement().is_purine(), base.is_purine());
        }
        assert_eq!(BaseType::A.to_string(), "A");
    }
}

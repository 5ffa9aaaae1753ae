//! Standard (ideal) bead geometry used as the superposition target.
//!
//! The embedded table ships with the crate and is parsed once per process.
//! Callers may substitute their own TOML document with the same layout, or
//! implement [`ReferenceGeometry`] directly.

use super::error::Error;
use crate::model::types::BaseType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const STANDARD_BASES_TOML: &str = include_str!("../../resources/standard_bases.toml");

static STANDARD_BASES: OnceLock<StandardBases> = OnceLock::new();

/// Provider of the standard bead coordinates for each base type.
pub trait ReferenceGeometry: Send + Sync {
    fn lookup(&self, base: BaseType) -> Option<&BeadSet>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBead {
    pub name: String,
    pub position: [f64; 3],
}

/// Ordered standard beads of one base type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeadSet {
    pub beads: Vec<ReferenceBead>,
}

impl BeadSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.beads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beads.iter().map(|b| b.name.as_str())
    }

    pub fn positions(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.beads.iter().map(|b| b.position)
    }
}

/// Reference geometry keyed by base letter, as laid out in
/// `resources/standard_bases.toml`. Keys other than `A`, `C`, `G` and `T`
/// are never looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardBases {
    pub bases: BTreeMap<String, BeadSet>,
}

impl StandardBases {
    /// Parses a reference geometry document.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the geometry back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Shared, lazily parsed copy of the embedded standard geometry.
    pub fn embedded() -> &'static StandardBases {
        STANDARD_BASES.get_or_init(|| {
            toml::from_str(STANDARD_BASES_TOML)
                .expect("Failed to parse embedded standard base geometry. This is a library bug.")
        })
    }

    /// Raw text of the embedded standard geometry.
    pub fn embedded_toml() -> &'static str {
        STANDARD_BASES_TOML
    }
}

impl ReferenceGeometry for StandardBases {
    fn lookup(&self, base: BaseType) -> Option<&BeadSet> {
        self.bases.get(base.to_string().as_str())
    }
}

/// Resolves the reference geometry requested by a configuration: the custom
/// document when one is given, the embedded table otherwise.
pub fn load_reference(custom_toml: Option<&str>) -> Result<StandardBases, Error> {
    match custom_toml {
        Some(text) => StandardBases::from_toml(text),
        None => Ok(StandardBases::embedded().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_geometry_covers_all_bases() {
        let bases = StandardBases::embedded();
        for base in BaseType::ALL {
            let set = bases.lookup(base).expect("reference for every base");
            assert_eq!(set.len(), base.side_chain_bead_count(), "{base}");
            let names: Vec<&str> = set.names().collect();
            let expected: Vec<String> = (1..=set.len()).map(|i| format!("SC{i}")).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn custom_geometry_may_omit_bases() {
        let text = r#"
            [bases.C]
            beads = [
                { name = "SC1", position = [0.0, 0.0, 0.0] },
                { name = "SC2", position = [1.0, 0.0, 0.0] },
                { name = "SC3", position = [0.0, 1.0, 0.0] },
            ]
        "#;
        let bases = load_reference(Some(text)).unwrap();
        assert!(bases.lookup(BaseType::C).is_some());
        assert!(bases.lookup(BaseType::A).is_none());
    }

    #[test]
    fn malformed_geometry_is_a_parse_error() {
        let err = load_reference(Some("[bases.A]\nbeads = 3")).unwrap_err();
        assert!(matches!(err, Error::ReferenceParse(_)));

        let err = load_reference(Some("[bases.A]\nbeads = [{ name = \"SC1\" }]")).unwrap_err();
        assert!(matches!(err, Error::ReferenceParse(_)));
    }

    #[test]
    fn toml_round_trip_preserves_geometry() {
        let bases = StandardBases::embedded();
        let text = bases.to_toml().unwrap();
        assert_eq!(&StandardBases::from_toml(&text).unwrap(), bases);
    }

    #[test]
    fn default_load_uses_embedded_table() {
        let bases = load_reference(None).unwrap();
        assert_eq!(&bases, StandardBases::embedded());
    }
}

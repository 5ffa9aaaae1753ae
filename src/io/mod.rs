//! Structure readers and result writers.
//!
//! Readers turn a coarse-grained structure into the ordered residue list the
//! analysis consumes: residues appear in file order and receive 1-based
//! indices in that order. Writers emit parameter tables as column-oriented
//! JSON and frame origins as PDB pseudo-atoms.

use std::fmt;
use std::io::{BufRead, Write};

use nalgebra::Vector3;

use crate::model::params::{ParameterTable, Record};
use crate::model::residue::Residue;

pub mod error;

mod gro;
mod json;
mod pdb;
mod util;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Gro,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Gro => write!(f, "GRO"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// Reads the residues of a coarse-grained structure.
///
/// Only the first model of a multi-model file is read.
pub fn read_structure<R: BufRead>(reader: R, format: Format) -> Result<Vec<Residue>, Error> {
    let residues = match format {
        Format::Pdb => pdb::reader::read(reader)?,
        Format::Gro => gro::read(reader)?,
        Format::Json => return Err(Error::UnsupportedReadFormat(format)),
    };
    if residues.is_empty() {
        return Err(Error::NoResidues(format));
    }
    Ok(residues)
}

/// Writes `table` as `{"Column": {"0": v0, "1": v1, ...}, ...}` followed by a
/// newline.
pub fn write_table<W: Write, R: Record>(
    writer: W,
    table: &ParameterTable<R>,
) -> Result<(), Error> {
    json::write(writer, table)
}

/// Writes one `CEN` pseudo-atom per point, numbered from 1.
pub fn write_centers<W: Write>(
    writer: W,
    title: &str,
    centers: &[Vector3<f64>],
) -> Result<(), Error> {
    pdb::writer::write_centers(writer, title, centers)
}

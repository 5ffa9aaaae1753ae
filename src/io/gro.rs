//! GROMACS `.gro` coordinates.
//!
//! Layout: title line, atom count, one fixed-width line per atom, box line.
//! Atom lines are `%5d%-5s%5s%5d%8.3f%8.3f%8.3f` with coordinates in nm.

use crate::io::util::{BeadRecord, ResidueAssembler, column};
use crate::io::{Format, error::Error};
use crate::model::residue::Residue;
use std::io::BufRead;

const NM_TO_ANGSTROM: f64 = 10.0;

/// Reads the first frame. Coordinates are returned in Å.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Residue>, Error> {
    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut next_line = |what: &str| -> Result<(usize, String), Error> {
        line_no += 1;
        match lines.next() {
            Some(line) => Ok((line_no, line?)),
            None => Err(Error::parse(
                Format::Gro,
                line_no,
                format!("unexpected end of file, expected {what}"),
            )),
        }
    };

    next_line("title")?;
    let (count_line_no, count_line) = next_line("atom count")?;
    let count = count_line
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Gro, count_line_no, "invalid atom count"))?;

    let mut assembler = ResidueAssembler::new();
    for _ in 0..count {
        let (ln, line) = next_line("atom line")?;
        if line.len() < 44 {
            return Err(Error::parse(
                Format::Gro,
                ln,
                format!("atom line too short ({} columns, need 44)", line.len()),
            ));
        }

        let res_id = column(&line, 0, 5)
            .parse::<i32>()
            .map_err(|_| Error::parse(Format::Gro, ln, "invalid residue number"))?;
        let coord = |start: usize, axis: &str| {
            column(&line, start, start + 8)
                .parse::<f64>()
                .map(|v| v * NM_TO_ANGSTROM)
                .map_err(|_| Error::parse(Format::Gro, ln, format!("invalid {axis} coordinate")))
        };
        let position = [coord(20, "x")?, coord(28, "y")?, coord(36, "z")?];

        assembler.push(BeadRecord {
            bead_name: column(&line, 10, 15),
            residue_name: column(&line, 5, 10),
            residue_id: res_id,
            chain_id: ' ',
            insertion_code: ' ',
            position,
        });
    }

    Ok(assembler.finish())
}

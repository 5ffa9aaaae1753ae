use crate::io::util::{BeadRecord, ResidueAssembler, column};
use crate::io::{Format, error::Error};
use crate::model::residue::Residue;
use std::io::BufRead;

/// Reads `ATOM`/`HETATM` records of the first model.
///
/// Coordinates are taken from the fixed PDB columns and used as-is (Å).
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Residue>, Error> {
    let mut assembler = ResidueAssembler::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let record = column(&line, 0, 6);

        match record {
            "ATOM" | "HETATM" => {
                let (name, res_name, res_id, chain, icode, position) = parse_atom(&line, line_no)?;
                assembler.push(BeadRecord {
                    bead_name: name,
                    residue_name: res_name,
                    residue_id: res_id,
                    chain_id: chain,
                    insertion_code: icode,
                    position,
                });
            }
            "ENDMDL" | "END" => break,
            _ => {}
        }
    }

    Ok(assembler.finish())
}

type AtomFields<'a> = (&'a str, &'a str, i32, char, char, [f64; 3]);

fn parse_atom(line: &str, line_no: usize) -> Result<AtomFields<'_>, Error> {
    if line.len() < 54 {
        return Err(Error::parse(
            Format::Pdb,
            line_no,
            format!("atom record too short ({} columns, need 54)", line.len()),
        ));
    }

    let name = column(line, 12, 16);
    if name.is_empty() {
        return Err(Error::parse(Format::Pdb, line_no, "missing atom name"));
    }
    let res_name = column(line, 17, 21);
    let chain = char_at(line, 21);
    let res_id = column(line, 22, 26)
        .parse::<i32>()
        .map_err(|_| Error::parse(Format::Pdb, line_no, "invalid residue sequence number"))?;
    let icode = char_at(line, 26);

    let coord = |start: usize, axis: &str| {
        column(line, start, start + 8)
            .parse::<f64>()
            .map_err(|_| Error::parse(Format::Pdb, line_no, format!("invalid {axis} coordinate")))
    };
    let position = [coord(30, "x")?, coord(38, "y")?, coord(46, "z")?];

    Ok((name, res_name, res_id, chain, icode, position))
}

fn char_at(line: &str, idx: usize) -> char {
    line.get(idx..idx + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

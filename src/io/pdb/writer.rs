use crate::io::error::Error;
use nalgebra::Vector3;
use std::io::Write;

const CENTER_NAME: &str = "CEN";
const CENTER_CHAIN: char = 'A';

/// Writes each point as a `CEN` pseudo-atom in its own residue.
///
/// Serial and residue numbers wrap at the PDB column limits.
pub fn write_centers<W: Write>(
    mut writer: W,
    title: &str,
    centers: &[Vector3<f64>],
) -> Result<(), Error> {
    writeln!(writer, "REMARK   1 {}", title.trim())?;
    for (i, c) in centers.iter().enumerate() {
        let serial = (i + 1) % 100_000;
        let res_seq = (i + 1) % 10_000;
        writeln!(
            writer,
            "ATOM  {:>5}  {:<3} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}",
            serial, CENTER_NAME, CENTER_NAME, CENTER_CHAIN, res_seq, c.x, c.y, c.z, 1.0, 0.0
        )?;
    }
    writeln!(writer, "END")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::reader;
    use std::io::Cursor;

    #[test]
    fn centers_use_fixed_pdb_columns() {
        let mut buf = Vec::new();
        let centers = [Vector3::new(1.0, -2.5, 30.125), Vector3::new(0.0, 0.0, 3.4)];
        write_centers(&mut buf, "base-pair origins", &centers).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "REMARK   1 base-pair origins");
        let atom = lines[1];
        assert_eq!(&atom[0..6], "ATOM  ");
        assert_eq!(&atom[6..11], "    1");
        assert_eq!(&atom[12..16], " CEN");
        assert_eq!(&atom[17..20], "CEN");
        assert_eq!(&atom[21..22], "A");
        assert_eq!(&atom[22..26], "   1");
        assert_eq!(&atom[30..38], "   1.000");
        assert_eq!(&atom[38..46], "  -2.500");
        assert_eq!(&atom[46..54], "  30.125");
        assert_eq!(lines[3], "END");
    }

    #[test]
    fn centers_are_readable_as_structure() {
        let mut buf = Vec::new();
        let centers = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)];
        write_centers(&mut buf, "origins", &centers).unwrap();

        let residues = reader::read(Cursor::new(buf)).unwrap();
        assert_eq!(residues.len(), 2);
        assert_eq!(residues[1].beads[0].name, "CEN");
        assert_eq!(residues[1].beads[0].position, [4.0, 5.0, 6.0]);
    }
}

use crate::model::bead::Bead;
use crate::model::residue::Residue;

/// One bead line as read from a structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct BeadRecord<'a> {
    pub bead_name: &'a str,
    pub residue_name: &'a str,
    pub residue_id: i32,
    pub chain_id: char,
    pub insertion_code: char,
    pub position: [f64; 3],
}

/// Groups consecutive bead records into residues.
///
/// A new residue starts whenever chain, residue number, insertion code or
/// residue name differ from the previous record. Residues are numbered from 1
/// in the order they are first seen.
#[derive(Debug, Default)]
pub struct ResidueAssembler {
    residues: Vec<Residue>,
    current: Option<(char, i32, char, String)>,
}

impl ResidueAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: BeadRecord<'_>) {
        let key = (
            record.chain_id,
            record.residue_id,
            record.insertion_code,
            record.residue_name,
        );
        let same = self
            .current
            .as_ref()
            .is_some_and(|(c, r, i, n)| (*c, *r, *i, n.as_str()) == key);

        if !same {
            let mut residue = Residue::new(self.residues.len() + 1, record.residue_name);
            residue.seq_id = record.residue_id;
            residue.chain_id = record.chain_id;
            self.residues.push(residue);
            self.current = Some((
                record.chain_id,
                record.residue_id,
                record.insertion_code,
                record.residue_name.to_string(),
            ));
        }

        if let Some(residue) = self.residues.last_mut() {
            residue
                .beads
                .push(Bead::new(record.bead_name, record.position));
        }
    }

    pub fn finish(self) -> Vec<Residue> {
        self.residues
    }
}

/// Returns the trimmed text in columns `start..end`, or an empty string when
/// the line is shorter.
pub fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(bead: &'a str, name: &'a str, id: i32, chain: char) -> BeadRecord<'a> {
        BeadRecord {
            bead_name: bead,
            residue_name: name,
            residue_id: id,
            chain_id: chain,
            insertion_code: ' ',
            position: [id as f64, 0.0, 0.0],
        }
    }

    #[test]
    fn groups_consecutive_records() {
        let mut asm = ResidueAssembler::new();
        asm.push(record("BB1", "DA", 1, 'A'));
        asm.push(record("SC1", "DA", 1, 'A'));
        asm.push(record("BB1", "DT", 2, 'A'));
        asm.push(record("BB1", "DA", 1, 'B'));
        let residues = asm.finish();

        assert_eq!(residues.len(), 3);
        assert_eq!(residues[0].bead_count(), 2);
        assert_eq!(
            residues.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(residues[2].chain_id, 'B');
        assert_eq!(residues[2].seq_id, 1);
    }

    #[test]
    fn column_is_tolerant_of_short_lines() {
        assert_eq!(column("ATOM  ", 0, 6), "ATOM");
        assert_eq!(column("ATOM", 2, 10), "OM");
        assert_eq!(column("ATOM", 10, 12), "");
    }
}

use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_analysis_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use cghelix::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.add("Try specifying --infmt to ensure correct format detection");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnsupportedReadFormat(fmt) => {
                self.add(format!("The '{}' format cannot be used for input", fmt));
                self.add("Supported input formats: pdb, gro");
            }

            IoError::NoResidues(fmt) => {
                self.add(format!("No bead records were found in the {} input", fmt));
                self.add("Check that the file holds coordinates and not only headers");
            }

            IoError::Json(_) => {
                self.add("A parameter table could not be serialized");
                self.add("Non-finite values point to a degenerate input geometry");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is plain text and not truncated");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: cghelix::io::Format) {
        use cghelix::io::Format;

        match format {
            Format::Pdb => {
                self.add("PDB: Check ATOM/HETATM record formatting (columns 1-54)");
                self.add("PDB: Coordinates must sit in columns 31-54, 8 characters each");
            }

            Format::Gro => {
                self.add("GRO: The second line must hold the bead count");
                self.add("GRO: Check fixed-width columns (%5d%-5s%5s%5d%8.3f×3)");
            }

            Format::Json => {
                // Output only
            }
        }
    }

    fn collect_analysis_hints(&mut self, err: &Error) {
        use cghelix::{AnalysisError, Stage};

        let Some(analysis_err) = err.downcast_ref::<AnalysisError>() else {
            return;
        };

        self.mark_typed();

        match analysis_err {
            AnalysisError::ReferenceParse(_) => {
                self.add("Reference geometry file has invalid TOML syntax or layout");
                self.add("Run `cghelix reference` to see the expected layout");
            }

            AnalysisError::UnsupportedResidue { index, name } => {
                self.add(format!(
                    "Residue {} is named '{}'; only A, C, G and T bases are analyzed",
                    index, name
                ));
                self.add("Names such as DA, ADE or A5 are recognized by their base letter");
                self.add("Remove ions, solvent and other non-DNA residues from the input");
            }

            AnalysisError::GeometryFit { index, detail, .. } => {
                self.add(format!("Check the beads of residue {}", index));
                let detail = detail.to_lowercase();
                if detail.contains("eigenvalue") {
                    self.add("The side-chain beads are (nearly) collinear");
                    self.add("The fit rotation is undetermined for this geometry");
                } else if detail.contains("missing") || detail.contains("expected") {
                    self.add("Bead names must match the reference geometry");
                    self.add("Supply matching names via --reference <FILE>");
                }
            }

            AnalysisError::SingularGeometry { stage, index, .. } => match stage {
                Stage::BasePair => {
                    self.add(format!(
                        "Base pair {} has partners whose y-axes point in opposite directions",
                        index
                    ));
                    self.add("Check that strand II is listed 5'→3' after strand I");
                }
                Stage::Step | Stage::LocalHelix => {
                    self.add(format!(
                        "Step {} joins base pairs whose normals cannot define an axis",
                        index
                    ));
                    self.add("The duplex may be broken or strongly kinked at this step");
                }
            },

            AnalysisError::InvalidTopology(_) => {
                self.add("Input must hold both strands of a single duplex");
                self.add("Strand I 5'→3' followed by strand II 5'→3'");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Provide input via -i/--input or pipe data to stdin");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}

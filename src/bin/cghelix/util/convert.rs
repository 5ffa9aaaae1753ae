use cghelix::io::Format;

use crate::cli;

impl From<cli::InputFormat> for Format {
    fn from(f: cli::InputFormat) -> Self {
        match f {
            cli::InputFormat::Pdb => Self::Pdb,
            cli::InputFormat::Gro => Self::Gro,
        }
    }
}

use std::path::Path;

use cghelix::io::Format;

pub fn input(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "pdb" | "ent" => Some(Format::Pdb),
        "gro" => Some(Format::Gro),
        _ => None,
    }
}

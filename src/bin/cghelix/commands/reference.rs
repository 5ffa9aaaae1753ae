use std::io::Write;

use anyhow::{Context, Result};

use cghelix::StandardBases;

use crate::cli::ReferenceArgs;
use crate::io::create_output;

pub fn run_reference(args: ReferenceArgs) -> Result<()> {
    let mut writer = create_output(args.output.as_deref())?;
    writer
        .write_all(StandardBases::embedded_toml().as_bytes())
        .and_then(|()| writer.flush())
        .context("Failed to write reference geometry")?;
    Ok(())
}

mod analyze;
mod reference;

use analyze::run_analyze;
use reference::run_reference;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Analyze(args) => run_analyze(args, ctx),
        Command::Reference(args) => run_reference(args),
    }
}

mod scan;
mod seq;

use scan::run_scan;
use seq::run_seq;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Scan(args) => run_scan(args, ctx),
        Command::Seq(args) => run_seq(args),
    }
}

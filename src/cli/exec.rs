//! workdone exec: run command lines non-interactively
//!
//! Each line runs in order against one session. The first failing line stops
//! the run and its error becomes the process result.

use crate::error::Result;
use crate::output::{emit_success, OutputOptions};
use crate::session::Session;

use super::Context;

pub fn run(context: &Context, lines: &[String], options: OutputOptions) -> Result<()> {
    let mut session = Session::open(context.storage.clone())?;

    for line in lines {
        let outcome = session.execute_line(line)?;
        emit_success(options, outcome.command, &outcome, Some(outcome.message.as_str()))?;
        if !outcome.continues {
            break;
        }
    }

    Ok(())
}

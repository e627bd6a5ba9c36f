//! workdone shell: the interactive line loop

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::output::framed;
use crate::session::Session;

use super::Context;

pub fn run(context: &Context) -> Result<()> {
    let mut session = Session::open(context.storage.clone())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(
        &mut session,
        stdin.lock(),
        stdout.lock(),
        context.config.display.frame,
    )
}

/// Feed each line of `input` to the session until `bye` or end of input.
///
/// Every line gets exactly one response. Bytes that are not UTF-8 are
/// replaced rather than ending the loop.
pub fn run_loop<R, W>(session: &mut Session, mut input: R, mut output: W, frame: bool) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let (message, continues) = session.respond(&line);
        if frame {
            output.write_all(framed(&message).as_bytes())?;
        } else {
            output.write_all(message.as_bytes())?;
        }
        output.flush()?;
        if !continues {
            break;
        }
    }
    Ok(())
}

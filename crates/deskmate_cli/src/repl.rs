//! Interactive read-dispatch-print loop.

use crate::dispatch::Session;
use log::info;
use std::io::{self, BufRead, Write};

pub const WELCOME: &str = "Welcome to the assistant bot!";
pub const PROMPT: &str = "Enter a command: ";

/// Runs until an exit command or end of input.
///
/// Saving is left to the caller so it happens on every way out.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, output: &mut W) -> io::Result<()> {
    writeln!(output, "{WELCOME}")?;
    let mut lines = input.lines();
    let mut handled = 0usize;
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            info!("event=repl_stop module=cli status=eof commands={handled}");
            return Ok(());
        };
        let outcome = session.dispatch(&line?);
        handled += 1;
        writeln!(output, "{}", outcome.message)?;
        if outcome.exit {
            info!("event=repl_stop module=cli status=exit commands={handled}");
            return Ok(());
        }
    }
}

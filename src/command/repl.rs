use crate::command::router::{Control, Session, SessionError};
use log::debug;
use std::io::{self, BufRead, Write};

pub const GREETING: &str = "You can type 'help' at any time for help.";

/// Read commands from `input` until `quit` or end of input.
///
/// Command errors are printed as `** <message>` and the loop carries on;
/// only a failure to read input or write output ends it early.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{GREETING}")?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", session.config().prompt)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        match session.handle_line(&line?, out) {
            Ok(Control::Continue) => {}
            Ok(Control::Quit) => break,
            Err(SessionError::Output(err)) => return Err(err),
            Err(err) => {
                debug!("command failed: {err}");
                writeln!(out, "** {err}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::core::ledger::Ledger;
    use std::io::Cursor;

    #[test]
    fn test_errors_do_not_end_the_loop() {
        let mut session = Session::new(Ledger::new(), SessionConfig::default());
        let input = Cursor::new("add help\nadd a b\nwho knows\na owes b 2\nquit\na owes b 100\n");
        let mut out = Vec::new();

        run(&mut session, input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(GREETING));
        assert!(out.contains("** invalid participant name 'help': name is a reserved keyword"));
        assert!(out.contains("** debt commands must contain 'owes' or 'paid'"));
        assert_eq!(session.ledger().entry(0, 1).unwrap().to_string(), "2");
    }

    #[test]
    fn test_overflowing_amounts_are_reported() {
        let mut session = Session::new(Ledger::new(), SessionConfig::default());
        let big = "50000000000000000000000000000";
        let script = format!(
            "add a b c\na owes b {big}\na owes c {big}\na owes b {big}\nbalances\nquit\n"
        );
        let mut out = Vec::new();

        run(&mut session, Cursor::new(script), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("** amount out of range").count(), 2);
        assert!(out.contains(&format!("b is owed ${big}.00")));
        assert_eq!(session.ledger().edge_count(), 1);
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut session = Session::new(Ledger::new(), SessionConfig::default());
        let mut out = Vec::new();
        run(&mut session, Cursor::new("add a\n"), &mut out).unwrap();
        assert_eq!(session.ledger().len(), 1);
    }
}

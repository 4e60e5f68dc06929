//! Search result printing for the CLI

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print matching document paths, one per line, then a count trailer
pub fn print_matches(paths: &[String], color: bool) -> io::Result<()> {
    let choice = if color { ColorChoice::Auto } else { ColorChoice::Never };
    let mut stdout = StandardStream::stdout(choice);

    for path in paths {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(stdout, "{path}")?;
    }
    stdout.reset()?;

    if paths.is_empty() {
        writeln!(stdout, "no matching documents")?;
    } else {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(stdout, "{}", paths.len())?;
        stdout.reset()?;
        writeln!(
            stdout,
            " matching document{}",
            if paths.len() == 1 { "" } else { "s" }
        )?;
    }
    Ok(())
}

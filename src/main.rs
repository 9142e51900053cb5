//! Terminal toys launcher (default binary).
//!
//! Prints the menu in cooked mode, runs the chosen toy in process and comes
//! back to the menu when it quits.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use terminal_toys::launcher::menu_text;
use terminal_toys::{app, logging, parse_choice, MenuChoice, Settings};

fn main() -> Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    let mut notice: Option<String> = None;

    loop {
        stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        write!(stdout, "{}", menu_text()).context("failed to print menu")?;
        if let Some(text) = notice.take() {
            writeln!(stdout, "\n{text}")?;
        }
        write!(stdout, "\nSelect a toy: ")?;
        stdout.flush()?;

        line.clear();
        let read = stdin.lock().read_line(&mut line).context("failed to read menu choice")?;
        if read == 0 {
            break;
        }

        match parse_choice(&line) {
            Ok(MenuChoice::Quit) => break,
            Ok(MenuChoice::Run(kind)) => {
                tracing::info!(toy = kind.title(), "launching");
                app::run_kind(kind, &settings);
            }
            Err(err) => notice = Some(err.to_string()),
        }
    }

    writeln!(stdout, "Goodbye!")?;
    Ok(())
}

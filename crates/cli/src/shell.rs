// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interactive shell.
//!
//! Each input line is one [`Command`]. Edits stay pending in the data
//! manager until `sync`, and are lost on `exit` unless synchronized.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tour_planner::DataManager;
use tracing::{error, warn};

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    input: ShellInput,
}

#[derive(Debug, Subcommand)]
enum ShellInput {
    #[command(flatten)]
    Tours(Command),

    /// Leave the shell; unsaved changes are dropped
    #[command(visible_alias = "quit")]
    Exit,
}

/// Reads commands from `input` until `exit` or end of input.
///
/// A failing command prints its error and the shell keeps going.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_shell(
    manager: &mut DataManager,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "Tour Planner shell. Type 'help' for commands, 'exit' to quit."
    )?;

    let mut line: String = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let words: Vec<String> = match split_words(&line) {
            Ok(words) => words,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }

        match ShellLine::try_parse_from(&words) {
            Ok(ShellLine {
                input: ShellInput::Exit,
            }) => break,
            Ok(ShellLine {
                input: ShellInput::Tours(command),
            }) => {
                if let Err(err) = command.run(manager, out) {
                    error!("{err}");
                    writeln!(out, "error: {err}")?;
                }
            }
            Err(err) => write!(out, "{}", err.render())?,
        }
    }

    if manager.has_pending_changes() {
        warn!("Leaving shell with unsynchronized changes");
        writeln!(out, "Unsaved changes were discarded")?;
    }
    Ok(())
}

/// Splits a line into words. Single and double quotes group words, and a
/// backslash outside single quotes escapes the next character.
///
/// # Errors
///
/// Returns a message if a quote is left open.
pub fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut in_word: bool = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), _) => current.push(c),
            (_, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), _) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("unterminated {open} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

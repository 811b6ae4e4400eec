// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal prompts for the restore path.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use paperkey_bridge::traits::{DestinationPicker, VerificationPrompt};
use paperkey_core::error::{PaperkeyError, Result};
use paperkey_core::types::{Decision, Fingerprint};

/// Somewhere to read answers from, one line at a time.
pub trait LineInput {
    /// Next line without its terminator; `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl LineInput for io::Stdin {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

impl<B: BufRead> LineInput for io::Lines<B> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.next().transpose()
    }
}

/// Asks questions on `output` and reads answers from `input`.
pub struct ConsolePrompt<I, W> {
    input: I,
    output: W,
}

impl ConsolePrompt<io::Stdin, io::Stderr> {
    /// Prompts go to stderr so stdout stays clean for results.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stderr())
    }
}

impl<I: LineInput, W: Write> ConsolePrompt<I, W> {
    pub fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        Ok(self.input.next_line()?)
    }
}

impl<I: LineInput, W: Write> VerificationPrompt for ConsolePrompt<I, W> {
    fn confirm_fingerprint(&mut self, fingerprint: &Fingerprint) -> Result<Decision> {
        writeln!(self.output, "\nRestored key fingerprint (SHA256):")?;
        writeln!(self.output, "  {}", fingerprint.grouped())?;
        let answer = self
            .ask("Does this match the fingerprint printed on the paper? [y/N] ")?
            .ok_or_else(|| PaperkeyError::Bridge("input closed before confirmation".into()))?;
        let answer = answer.trim().to_ascii_lowercase();
        Ok(if answer == "y" || answer == "yes" {
            Decision::Confirm
        } else {
            Decision::Reject
        })
    }
}

impl<I: LineInput, W: Write> DestinationPicker for ConsolePrompt<I, W> {
    fn choose_destination(&mut self) -> Result<Option<PathBuf>> {
        let answer = self.ask("Save restored key to (leave empty to skip): ")?;
        Ok(answer
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .map(PathBuf::from))
    }
}

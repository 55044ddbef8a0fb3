//! Interactive editor shell
//!
//! A line-oriented front end over a [`GridStore`]. Each line is parsed and
//! executed to completion before the next one is read. A failing command
//! prints its error and leaves the session running.

pub mod command;

use std::io::{self, BufRead, Write};

use ledmx_core::{Bitmap, GridStore, HexDump, HistoryPayload, LedMatrixError};

use crate::error::ExportError;
use crate::export::{export_store, ExportConfig};
use crate::preview::{render, render_grid};

pub use command::{Command, CommandError, HELP};

const PROMPT: &str = "ledmx> ";

/// Editor session reading commands from `input` and writing to `output`
pub struct Shell<R, W> {
    store: GridStore,
    input: R,
    output: W,
    export_config: ExportConfig,
    prompt: bool,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: GridStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            export_config: ExportConfig::default(),
            prompt: true,
        }
    }

    /// Configuration used by the `export` command
    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.export_config = config;
        self
    }

    /// Disable the prompt, for scripted input
    pub fn without_prompt(mut self) -> Self {
        self.prompt = false;
        self
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn into_store(self) -> GridStore {
        self.store
    }

    /// Run until `quit` or end of input
    ///
    /// Only failures to read input or write output end the loop early.
    pub fn run(&mut self) -> io::Result<()> {
        while let Some(line) = self.read_line(PROMPT)? {
            let flow = match Command::parse(&line) {
                Ok(Some(command)) => {
                    log::debug!("Executing {command:?}");
                    match self.execute(command) {
                        Ok(flow) => flow,
                        Err(error) => {
                            log::warn!("Command failed: {error}");
                            writeln!(self.output, "error: {error}")?;
                            Flow::Continue
                        }
                    }
                }
                Ok(None) => Flow::Continue,
                Err(error) => {
                    writeln!(self.output, "error: {error}")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                break;
            }
        }
        self.output.flush()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.prompt {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn execute(&mut self, command: Command) -> Result<Flow, ExportError> {
        match command {
            Command::Configure { rows, cols } => {
                self.store.configure(rows, cols)?;
                writeln!(self.output, "Grid is now {rows}x{cols}, history cleared")?;
            }
            Command::Toggle { position, row, col } => {
                let on = self.store.toggle(position.row, position.col, row, col)?;
                let state = if on { "on" } else { "off" };
                writeln!(
                    self.output,
                    "Pixel ({}, {}) of {position} is {state}",
                    row + 1,
                    col + 1
                )?;
            }
            Command::Repetitions(input) => {
                let repetitions = self.store.set_repetitions_input(&input);
                writeln!(self.output, "Repetitions: {repetitions}")?;
            }
            Command::Commit(position) => {
                let index = self.store.commit(position.row, position.col)?;
                self.report_entry(index)?;
            }
            Command::CommitAll => {
                let added = self.store.commit_all()?;
                writeln!(self.output, "Committed {added} sub-matrices")?;
            }
            Command::Remove(index) => self.remove_with_confirmation(index)?,
            Command::RemoveLast => match self.store.remove_last() {
                Some(entry) => writeln!(self.output, "Removed {}", entry.name)?,
                None => writeln!(self.output, "History is empty")?,
            },
            Command::Clear => {
                self.store.clear();
                writeln!(self.output, "All pixels off")?;
            }
            Command::Show(None) => {
                write!(self.output, "{}", render_grid(self.store.grid()))?;
            }
            Command::Show(Some(position)) => {
                let matrix = self
                    .store
                    .sub_matrix(position.row, position.col)
                    .ok_or(LedMatrixError::IndexOutOfBounds)?;
                writeln!(self.output, "{position}, {} lit", matrix.lit_count())?;
                write!(self.output, "{}", render(matrix))?;
            }
            Command::History => self.print_history()?,
            Command::Hex { name, bytes } => {
                let index = self.store.import_hex(&name, &bytes)?;
                self.report_entry(index)?;
            }
            Command::Naming(naming) => {
                self.store.set_naming(naming);
                writeln!(self.output, "Naming: {naming}")?;
            }
            Command::Export(dir) => {
                let report = export_store(&self.store, &dir, &self.export_config)?;
                for failure in &report.failures {
                    writeln!(
                        self.output,
                        "failed: {}: {}",
                        failure.file_name, failure.source
                    )?;
                }
                writeln!(
                    self.output,
                    "Exported {} of {} files to {}",
                    report.written.len(),
                    report.total(),
                    dir.display()
                )?;
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn remove_with_confirmation(&mut self, index: usize) -> Result<(), ExportError> {
        let name = self.store.request_removal(index)?.name.clone();
        let answer = self.read_line(&format!("Remove {}. {name}? confirm? [y/N] ", index + 1))?;

        let confirmed = answer
            .as_deref()
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);

        if confirmed {
            let entry = self.store.confirm_removal()?;
            writeln!(self.output, "Removed {}", entry.name)?;
        } else {
            self.store.cancel_removal();
            writeln!(self.output, "Kept {name}")?;
        }
        Ok(())
    }

    fn report_entry(&mut self, index: usize) -> Result<(), ExportError> {
        let entry = self
            .store
            .history()
            .get(index)
            .ok_or(LedMatrixError::IndexOutOfBounds)?;
        writeln!(
            self.output,
            "Added {}. {} ({} bytes)",
            index + 1,
            entry.name,
            entry.byte_len()?
        )?;
        Ok(())
    }

    fn print_history(&mut self) -> io::Result<()> {
        if self.store.history().is_empty() {
            return writeln!(self.output, "History is empty");
        }
        for (index, entry) in self.store.history().iter().enumerate() {
            match &entry.payload {
                HistoryPayload::Encoded {
                    columns,
                    repetitions,
                    ..
                } => writeln!(
                    self.output,
                    "{}. {} [{columns}] x{repetitions}",
                    index + 1,
                    entry.name
                )?,
                HistoryPayload::Raw { bytes } => writeln!(
                    self.output,
                    "{}. {} raw [{}]",
                    index + 1,
                    entry.name,
                    HexDump(bytes)
                )?,
            }
        }
        Ok(())
    }
}

use std::io::{self, Read, Stdout, Write};

use crate::buffer::LineBuffer;
use crate::history::History;
use crate::keys::BRACKETED_PASTE_CODE_LEN;
use crate::raw_mode::RawModeGuard;
use crate::source::KeySource;
use crate::terminal::{Action, Decoder, PasteMode};
use crate::writer::TerminalWriter;

/// Prompt strings shown while reading a line
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    pub prompt: String,
    /// Shown instead of `prompt` when `use_alt` is set, e.g. for continuation lines
    pub alt_prompt: String,
    /// Dimmed hint displayed while the line is empty
    pub placeholder: String,
    pub alt_placeholder: String,
    pub use_alt: bool,
}

impl Prompt {
    /// The prompt for the current context
    pub fn current(&self) -> &str {
        if self.use_alt {
            &self.alt_prompt
        } else {
            &self.prompt
        }
    }

    /// The placeholder for the current context
    pub fn current_placeholder(&self) -> &str {
        if self.use_alt {
            &self.alt_placeholder
        } else {
            &self.placeholder
        }
    }
}

/// Configuration for the editor
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfig {
    /// Enable ANSI escape codes for better terminal control
    pub ansi_enabled: bool,
    /// Number of spaces inserted for Tab
    pub tab_width: usize,
    /// Record submitted lines in history
    pub history_enabled: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            ansi_enabled: true,
            tab_width: 8,
            history_enabled: true,
        }
    }
}

/// One interactive session: prompt, key source and history.
///
/// History lives as long as the instance; the line buffer and decoder state
/// are fresh for every [`Instance::readline`] call.
#[derive(Debug)]
pub struct Instance<W: Write = Stdout> {
    prompt: Prompt,
    config: TerminalConfig,
    keys: KeySource,
    history: History,
    writer: TerminalWriter<W>,
    raw_mode: bool,
}

impl Instance<Stdout> {
    /// Create an editor on the process terminal
    pub fn new(prompt: Prompt) -> Result<Self, ReadlineError> {
        Self::with_config(prompt, TerminalConfig::default())
    }

    pub fn with_config(prompt: Prompt, config: TerminalConfig) -> Result<Self, ReadlineError> {
        let keys = KeySource::stdin().map_err(ReadlineError::Setup)?;
        Ok(Self::assemble(prompt, config, keys, io::stdout(), true))
    }
}

impl<W: Write> Instance<W> {
    /// Create an editor over arbitrary endpoints.
    ///
    /// The terminal mode is left alone, which makes this suitable for tests
    /// and piped sessions.
    pub fn from_parts<R>(
        prompt: Prompt,
        config: TerminalConfig,
        input: R,
        output: W,
    ) -> Result<Self, ReadlineError>
    where
        R: Read + Send + 'static,
    {
        let keys = KeySource::spawn(input).map_err(ReadlineError::Setup)?;
        Ok(Self::assemble(prompt, config, keys, output, false))
    }

    fn assemble(
        prompt: Prompt,
        config: TerminalConfig,
        keys: KeySource,
        output: W,
        raw_mode: bool,
    ) -> Self {
        let mut history = History::new();
        if !config.history_enabled {
            history.disable();
        }
        Self {
            prompt,
            config,
            keys,
            history,
            writer: TerminalWriter::new(output, config.ansi_enabled),
            raw_mode,
        }
    }

    /// Read one line.
    ///
    /// Blocks until Enter, Ctrl+C or end of input. Raw mode, if used, is
    /// restored before this returns, whatever the outcome.
    pub fn readline(&mut self) -> Result<String, ReadlineError> {
        self.writer.write_prompt(self.prompt.current())?;

        let _guard = if self.raw_mode {
            Some(RawModeGuard::acquire().map_err(ReadlineError::Setup)?)
        } else {
            None
        };

        let mut state = EditState::default();
        loop {
            let was_empty = state.buf.is_empty();
            if was_empty {
                self.writer
                    .write_placeholder(self.prompt.current_placeholder())?;
            }

            let next = self.keys.read();

            if was_empty {
                self.writer.clear_to_eol()?;
            }

            let Some(c) = next else {
                return Err(ReadlineError::Eof);
            };
            let Some(action) = state.decoder.feed(c) else {
                continue;
            };
            tracing::trace!(?action, "key");

            if let Some(line) = self.dispatch(action, &mut state)? {
                return Ok(line);
            }
        }
    }

    fn dispatch(
        &mut self,
        action: Action,
        state: &mut EditState,
    ) -> Result<Option<String>, ReadlineError> {
        let buf = &mut state.buf;
        match action {
            Action::Insert(c) => buf.add(c),
            Action::Interrupt => return Err(ReadlineError::Interrupt),
            Action::MoveToStart => buf.move_to_start(),
            Action::MoveToEnd => buf.move_to_end(),
            Action::MoveLeft => buf.move_left(),
            Action::MoveRight => buf.move_right(),
            Action::MoveLeftWord => buf.move_left_word(),
            Action::MoveRightWord => buf.move_right_word(),
            Action::Backspace => buf.remove(),
            Action::Tab => {
                for _ in 0..self.config.tab_width {
                    buf.add(' ');
                }
            }
            Action::DeleteOrEof => {
                if buf.is_empty() {
                    return Err(ReadlineError::Eof);
                }
                buf.delete();
            }
            Action::ForwardDelete => {
                if buf.size() > 0 {
                    buf.delete();
                }
            }
            Action::KillRemaining => buf.delete_remaining(),
            Action::KillBefore => buf.delete_before(),
            Action::DeleteWord => buf.delete_word(),
            Action::ClearScreen => self.writer.clear_screen()?,
            Action::HistoryPrev => {
                if self.history.pos() > 0 {
                    if !self.history.is_browsing() {
                        state.draft = buf.chars().to_vec();
                    }
                    if let Some(entry) = self.history.prev() {
                        buf.replace(entry.chars());
                    }
                }
            }
            Action::HistoryNext => {
                if self.history.is_browsing() {
                    match self.history.next() {
                        Some(entry) => buf.replace(entry.chars()),
                        None => buf.replace(state.draft.iter().copied()),
                    }
                }
            }
            Action::BracketedPaste => {
                let code = self.read_paste_code()?;
                if let Some(mode) = PasteMode::from_code(&code) {
                    tracing::debug!(?mode, "bracketed paste marker");
                    state.paste_mode = mode;
                }
                return Ok(None);
            }
            Action::Enter => return self.commit(state).map(Some),
        }

        self.writer.redraw(self.prompt.current(), &state.buf)?;
        Ok(None)
    }

    /// Blocks until the rest of the marker arrives; there is no timeout.
    fn read_paste_code(&self) -> Result<heapless::Vec<char, BRACKETED_PASTE_CODE_LEN>, ReadlineError> {
        let mut code = heapless::Vec::new();
        while !code.is_full() {
            let c = self.keys.read().ok_or(ReadlineError::Eof)?;
            let _ = code.push(c);
        }
        Ok(code)
    }

    fn commit(&mut self, state: &mut EditState) -> Result<String, ReadlineError> {
        let line = state.buf.to_string();
        if !line.is_empty() {
            self.history.add(&line);
        }

        state.buf.move_to_end();
        self.writer.redraw(self.prompt.current(), &state.buf)?;
        self.writer.writeln("")?;

        Ok(state.paste_mode.wrap(line))
    }

    /// Record submitted lines from now on
    pub fn history_enable(&mut self) {
        self.history.enable();
    }

    /// Stop recording submitted lines; existing entries stay browsable
    pub fn history_disable(&mut self) {
        self.history.disable();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut Prompt {
        &mut self.prompt
    }

    /// The output sink, e.g. to inspect what a test session drew
    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }
}

/// Per-call editing state
#[derive(Debug, Default)]
struct EditState {
    buf: LineBuffer,
    decoder: Decoder,
    paste_mode: PasteMode,
    /// Live line saved when history browsing starts
    draft: Vec<char>,
}

/// Errors that can occur while reading a line
#[derive(Debug, thiserror::Error)]
pub enum ReadlineError {
    #[error("interrupted")]
    Interrupt,
    #[error("end of input")]
    Eof,
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}

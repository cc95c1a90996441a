use std::io::{self, Write};

use crate::buffer::LineBuffer;

const CLEAR_TO_EOL: &str = "\x1b[K";
const COLOR_GREY: &str = "\x1b[38;5;245m";
const COLOR_DEFAULT: &str = "\x1b[0m";

/// Terminal writer for formatted output with ANSI support
#[derive(Debug)]
pub struct TerminalWriter<W: Write> {
    writer: W,
    ansi_enabled: bool,
}

impl<W: Write> TerminalWriter<W> {
    /// Create a new terminal writer
    pub fn new(writer: W, ansi_enabled: bool) -> Self {
        Self {
            writer,
            ansi_enabled,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a string
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())?;
        self.writer.flush()
    }

    /// Write a line (adds \r\n)
    pub fn writeln(&mut self, s: &str) -> io::Result<()> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    /// Write the prompt
    pub fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.write_str(prompt)
    }

    /// Clear from the cursor to the end of the line
    pub fn clear_to_eol(&mut self) -> io::Result<()> {
        if self.ansi_enabled {
            self.write_str(CLEAR_TO_EOL)
        } else {
            Ok(())
        }
    }

    /// Clear the screen
    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.ansi_enabled {
            self.write_str("\x1b[2J\x1b[H")
        } else {
            // Send multiple newlines as fallback
            self.write_str("\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n")
        }
    }

    /// Move cursor left by n columns
    pub fn cursor_left(&mut self, n: usize) -> io::Result<()> {
        if self.ansi_enabled && n > 0 {
            write!(self.writer, "\x1b[{n}D")?;
            self.writer.flush()
        } else {
            Ok(())
        }
    }

    /// Switch to the dim foreground used for placeholders
    pub fn set_dim(&mut self) -> io::Result<()> {
        if self.ansi_enabled {
            self.write_str(COLOR_GREY)
        } else {
            Ok(())
        }
    }

    /// Reset text formatting
    pub fn reset_format(&mut self) -> io::Result<()> {
        if self.ansi_enabled {
            self.write_str(COLOR_DEFAULT)
        } else {
            Ok(())
        }
    }

    /// Show a dimmed hint with the cursor parked on its first column, so
    /// the next typed character overwrites it.
    ///
    /// Needs cursor movement, so it is skipped without ANSI support.
    pub fn write_placeholder(&mut self, placeholder: &str) -> io::Result<()> {
        if !self.ansi_enabled || placeholder.is_empty() {
            return Ok(());
        }
        self.set_dim()?;
        self.write_str(placeholder)?;
        self.cursor_left(placeholder.chars().count())?;
        self.reset_format()
    }

    /// Redraw the prompt and line, leaving the cursor where the buffer has it
    pub fn redraw(&mut self, prompt: &str, buf: &LineBuffer) -> io::Result<()> {
        self.write_str("\r")?;
        self.write_prompt(prompt)?;
        self.write_str(&buf.to_string())?;
        self.clear_to_eol()?;
        self.cursor_left(buf.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output(writer: TerminalWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_redraw_places_cursor() {
        let mut buf = LineBuffer::new();
        buf.replace("hello".chars());
        buf.move_left();
        buf.move_left();

        let mut writer = TerminalWriter::new(Vec::new(), true);
        writer.redraw(">>> ", &buf).unwrap();
        assert_eq!(output(writer), "\r>>> hello\x1b[K\x1b[2D");
    }

    #[test]
    fn test_redraw_without_ansi() {
        let mut buf = LineBuffer::new();
        buf.replace("hi".chars());
        buf.move_to_start();

        let mut writer = TerminalWriter::new(Vec::new(), false);
        writer.redraw("> ", &buf).unwrap();
        assert_eq!(output(writer), "\r> hi");
    }

    #[test]
    fn test_placeholder() {
        let mut writer = TerminalWriter::new(Vec::new(), true);
        writer.write_placeholder("Sénd").unwrap();
        assert_eq!(output(writer), "\x1b[38;5;245mSénd\x1b[4D\x1b[0m");

        let mut plain = TerminalWriter::new(Vec::new(), false);
        plain.write_placeholder("Send").unwrap();
        assert_eq!(output(plain), "");
    }

    #[test]
    fn test_clear_screen() {
        let mut writer = TerminalWriter::new(Vec::new(), true);
        writer.clear_screen().unwrap();
        assert_eq!(output(writer), "\x1b[2J\x1b[H");
    }
}

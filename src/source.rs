//! Background key reader.
//!
//! One thread decodes the input stream into code points and hands them over
//! a rendezvous channel, so at most one code point is in flight and order is
//! preserved. The thread drops its sender on the first read error or end of
//! stream; from then on every [`KeySource::read`] reports end of input.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

#[derive(Debug)]
pub struct KeySource {
    rx: Receiver<char>,
}

impl KeySource {
    /// Start reading code points from process stdin
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::stdin())
    }

    /// Start reading code points from `input` on a background thread
    pub fn spawn<R>(input: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(0);
        thread::Builder::new()
            .name("readline-keys".into())
            .spawn(move || pump(BufReader::new(input), tx))?;
        Ok(Self { rx })
    }

    /// Block until the next code point arrives
    ///
    /// Returns `None` once the input has closed.
    pub fn read(&self) -> Option<char> {
        self.rx.recv().ok()
    }
}

fn pump<R: BufRead>(mut reader: R, tx: SyncSender<char>) {
    loop {
        match read_char(&mut reader) {
            Ok(Some(c)) => {
                if tx.send(c).is_err() {
                    tracing::debug!("key consumer dropped, stopping reader");
                    return;
                }
            }
            Ok(None) => {
                tracing::debug!("input closed");
                return;
            }
            Err(err) => {
                tracing::debug!(error = %err, "input read failed");
                return;
            }
        }
    }
}

/// Decode one UTF-8 code point.
///
/// Malformed input yields U+FFFD. A byte that cannot continue the current
/// sequence is left in the reader and starts the next code point.
fn read_char<R: BufRead>(reader: &mut R) -> io::Result<Option<char>> {
    let Some(lead) = next_byte(reader)? else {
        return Ok(None);
    };

    let width = utf8_width(lead);
    if width == 1 {
        return Ok(Some(char::from(lead)));
    }
    if width == 0 {
        return Ok(Some(char::REPLACEMENT_CHARACTER));
    }

    let mut bytes = [lead, 0, 0, 0];
    for slot in bytes.iter_mut().take(width).skip(1) {
        match peek_byte(reader)? {
            Some(b) if b & 0xC0 == 0x80 => {
                *slot = b;
                reader.consume(1);
            }
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        }
    }

    let c = std::str::from_utf8(&bytes[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Ok(Some(c))
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

fn next_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

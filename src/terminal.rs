use crate::keys::*;

/// What a decoded key asks the edit loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert a printable code point
    Insert(char),
    Interrupt,
    MoveToStart,
    MoveToEnd,
    MoveLeft,
    MoveRight,
    MoveLeftWord,
    MoveRightWord,
    Backspace,
    Tab,
    /// Ctrl+D: delete under the cursor, or end of input on an empty line
    DeleteOrEof,
    /// `ESC [ 3 ~`: delete under the cursor if there is anything to delete
    ForwardDelete,
    KillRemaining,
    KillBefore,
    DeleteWord,
    ClearScreen,
    HistoryPrev,
    HistoryNext,
    /// `ESC [ 2`; the caller must read the rest of the marker
    BracketedPaste,
    Enter,
}

/// State machine for parsing ANSI escape sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeState {
    #[default]
    Normal,
    /// After `ESC`
    Escape,
    /// After `ESC [`
    EscapeEx,
}

/// Turns code points into [`Action`]s.
///
/// Holds no text; the same decoder can be fed any input and inspected in
/// isolation from the terminal.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: EscapeState,
    absorb_next: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EscapeState {
        self.state
    }

    /// Process a single code point
    pub fn feed(&mut self, c: char) -> Option<Action> {
        match self.state {
            EscapeState::Normal => self.feed_normal(c),
            EscapeState::Escape => self.feed_escape(c),
            EscapeState::EscapeEx => self.feed_escape_ex(c),
        }
    }

    fn feed_normal(&mut self, c: char) -> Option<Action> {
        let action = match c {
            CHAR_NULL => return None,
            CHAR_ESC => {
                self.state = EscapeState::Escape;
                return None;
            }
            CHAR_INTERRUPT => Action::Interrupt,
            CHAR_LINE_START => Action::MoveToStart,
            CHAR_LINE_END => Action::MoveToEnd,
            CHAR_BACKWARD => Action::MoveLeft,
            CHAR_FORWARD => Action::MoveRight,
            CHAR_BACKSPACE | CHAR_CTRL_H => Action::Backspace,
            CHAR_TAB => Action::Tab,
            CHAR_DELETE => Action::DeleteOrEof,
            CHAR_KILL => Action::KillRemaining,
            CHAR_CTRL_U => Action::KillBefore,
            CHAR_CTRL_L => Action::ClearScreen,
            CHAR_CTRL_W => Action::DeleteWord,
            CHAR_ENTER => Action::Enter,
            _ => {
                // Some terminals leave the `~` of `ESC [ 3 ~` behind.
                if self.absorb_next {
                    self.absorb_next = false;
                    return None;
                }
                if c < CHAR_SPACE {
                    return None;
                }
                Action::Insert(c)
            }
        };
        Some(action)
    }

    fn feed_escape(&mut self, c: char) -> Option<Action> {
        self.state = EscapeState::Normal;
        match c {
            META_WORD_LEFT => Some(Action::MoveLeftWord),
            META_WORD_RIGHT => Some(Action::MoveRightWord),
            CHAR_ESCAPE_EX => {
                self.state = EscapeState::EscapeEx;
                None
            }
            _ => None,
        }
    }

    fn feed_escape_ex(&mut self, c: char) -> Option<Action> {
        self.state = EscapeState::Normal;
        match c {
            KEY_UP => Some(Action::HistoryPrev),
            KEY_DOWN => Some(Action::HistoryNext),
            KEY_LEFT => Some(Action::MoveLeft),
            KEY_RIGHT => Some(Action::MoveRight),
            KEY_DEL => {
                self.absorb_next = true;
                Some(Action::ForwardDelete)
            }
            META_START => Some(Action::MoveToStart),
            META_END => Some(Action::MoveToEnd),
            CHAR_BRACKETED_PASTE => Some(Action::BracketedPaste),
            _ => None,
        }
    }
}

/// Bracketed paste marker seen during a read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteMode {
    #[default]
    None,
    Start,
    End,
}

impl PasteMode {
    /// Classify the three code points that follow `ESC [ 2`
    pub fn from_code(code: &[char]) -> Option<Self> {
        if code == BRACKETED_PASTE_START {
            Some(PasteMode::Start)
        } else if code == BRACKETED_PASTE_END {
            Some(PasteMode::End)
        } else {
            None
        }
    }

    /// Wrap a submitted line in `"""` according to the mode
    pub fn wrap(self, line: String) -> String {
        match self {
            PasteMode::None => line,
            PasteMode::Start => format!("\"\"\"{line}"),
            PasteMode::End => format!("{line}\"\"\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(input: &str) -> Vec<Action> {
        let mut decoder = Decoder::new();
        input.chars().filter_map(|c| decoder.feed(c)).collect()
    }

    #[test]
    fn test_printable_and_control_codes() {
        assert_eq!(
            decode("a\x01\x05\x02\x06\x7f\x08\t\x04\x0b\x15\x0c\x17\x03\r"),
            vec![
                Action::Insert('a'),
                Action::MoveToStart,
                Action::MoveToEnd,
                Action::MoveLeft,
                Action::MoveRight,
                Action::Backspace,
                Action::Backspace,
                Action::Tab,
                Action::DeleteOrEof,
                Action::KillRemaining,
                Action::KillBefore,
                Action::ClearScreen,
                Action::DeleteWord,
                Action::Interrupt,
                Action::Enter,
            ]
        );
    }

    #[test]
    fn test_null_and_unknown_controls_are_dropped() {
        assert_eq!(decode("\x00\x07\n\x1a"), vec![]);
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(
            decode("\x1bb\x1bf\x1b[A\x1b[B\x1b[C\x1b[D\x1b[H\x1b[F"),
            vec![
                Action::MoveLeftWord,
                Action::MoveRightWord,
                Action::HistoryPrev,
                Action::HistoryNext,
                Action::MoveRight,
                Action::MoveLeft,
                Action::MoveToStart,
                Action::MoveToEnd,
            ]
        );
    }

    #[test]
    fn test_unknown_escape_returns_to_normal() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.feed('\x1b'), None);
        assert_eq!(decoder.state(), EscapeState::Escape);
        assert_eq!(decoder.feed('x'), None);
        assert_eq!(decoder.state(), EscapeState::Normal);
        assert_eq!(decoder.feed('y'), Some(Action::Insert('y')));

        assert_eq!(decode("\x1b[Zq"), vec![Action::Insert('q')]);
    }

    #[test]
    fn test_del_absorbs_trailing_tilde() {
        // quirk: only the next default-branch code point is swallowed
        assert_eq!(
            decode("\x1b[3~a"),
            vec![Action::ForwardDelete, Action::Insert('a')]
        );
        assert_eq!(
            decode("\x1b[3\x01xy"),
            vec![Action::ForwardDelete, Action::MoveToStart, Action::Insert('y')]
        );
        assert_eq!(
            decode("\x1b[3\x07z"),
            vec![Action::ForwardDelete, Action::Insert('z')]
        );
    }

    #[test]
    fn test_bracketed_paste_marker() {
        let mut decoder = Decoder::new();
        assert_eq!(decode("\x1b[2"), vec![Action::BracketedPaste]);
        decoder.feed('\x1b');
        decoder.feed('[');
        assert_eq!(decoder.state(), EscapeState::EscapeEx);
        assert_eq!(decoder.feed('2'), Some(Action::BracketedPaste));
        assert_eq!(decoder.state(), EscapeState::Normal);
    }

    #[test]
    fn test_paste_mode() {
        assert_eq!(PasteMode::from_code(&['0', '0', '~']), Some(PasteMode::Start));
        assert_eq!(PasteMode::from_code(&['0', '1', '~']), Some(PasteMode::End));
        assert_eq!(PasteMode::from_code(&['0', '2', '~']), None);

        assert_eq!(PasteMode::Start.wrap("abc".into()), "\"\"\"abc");
        assert_eq!(PasteMode::End.wrap("abc".into()), "abc\"\"\"");
        assert_eq!(PasteMode::None.wrap("abc".into()), "abc");
    }
}

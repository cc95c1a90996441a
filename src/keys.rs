//! Code points the decoder recognises.
//!
//! Control codes arrive in the `Normal` state. Everything after `ESC` and
//! `ESC [` is only meaningful in the matching escape state.

pub const CHAR_NULL: char = '\x00';
pub const CHAR_LINE_START: char = '\x01';
pub const CHAR_BACKWARD: char = '\x02';
pub const CHAR_INTERRUPT: char = '\x03';
pub const CHAR_DELETE: char = '\x04';
pub const CHAR_LINE_END: char = '\x05';
pub const CHAR_FORWARD: char = '\x06';
pub const CHAR_CTRL_H: char = '\x08';
pub const CHAR_TAB: char = '\t';
pub const CHAR_KILL: char = '\x0b';
pub const CHAR_CTRL_L: char = '\x0c';
pub const CHAR_ENTER: char = '\r';
pub const CHAR_CTRL_U: char = '\x15';
pub const CHAR_CTRL_W: char = '\x17';
pub const CHAR_ESC: char = '\x1b';
/// Lowest printable code point.
pub const CHAR_SPACE: char = ' ';
pub const CHAR_BACKSPACE: char = '\x7f';

/// `ESC b`
pub const META_WORD_LEFT: char = 'b';
/// `ESC f`
pub const META_WORD_RIGHT: char = 'f';
/// `ESC [` switches to the extended escape state.
pub const CHAR_ESCAPE_EX: char = '[';

pub const KEY_UP: char = 'A';
pub const KEY_DOWN: char = 'B';
pub const KEY_RIGHT: char = 'C';
pub const KEY_LEFT: char = 'D';
/// `ESC [ 3 ~`; the trailing `~` is absorbed by the decoder.
pub const KEY_DEL: char = '3';
pub const META_START: char = 'H';
pub const META_END: char = 'F';

/// `ESC [ 2` introduces a bracketed paste marker.
pub const CHAR_BRACKETED_PASTE: char = '2';
/// Remaining code points of `ESC [ 200 ~`.
pub const BRACKETED_PASTE_START: [char; 3] = ['0', '0', '~'];
/// Remaining code points of `ESC [ 201 ~`.
pub const BRACKETED_PASTE_END: [char; 3] = ['0', '1', '~'];
/// Number of code points following [`CHAR_BRACKETED_PASTE`].
pub const BRACKETED_PASTE_CODE_LEN: usize = 3;

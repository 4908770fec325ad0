//! Byte-at-a-time line assembly.
//!
//! The UART delivers bytes one by one; [`LineAssembler`] collects them into a
//! fixed buffer and yields a complete [`Line`] on each `\n`. Carriage returns
//! are dropped so both `\n` and `\r\n` terminated hosts work.

use heapless::{String, Vec};

/// Longest accepted line, excluding the terminator
pub const MAX_LINE_LEN: usize = 128;

/// A complete received line, terminator stripped
pub type Line = String<MAX_LINE_LEN>;

/// Errors reported while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the rest of it will be discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssembleState {
    /// Appending bytes to the buffer
    Collecting,
    /// Dropping bytes until the end of an overlong line
    Discarding,
}

/// Accumulates bytes into newline-terminated lines
#[derive(Debug, Clone)]
pub struct LineAssembler {
    state: AssembleState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            state: AssembleState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.state = AssembleState::Collecting;
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a non-empty line completes, `Ok(None)`
    /// when more bytes are needed, or `Err` when the current line is dropped.
    /// `Overflow` is reported once per overlong line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            AssembleState::Discarding => {
                if byte == b'\n' {
                    self.state = AssembleState::Collecting;
                }
                Ok(None)
            }
            AssembleState::Collecting => match byte {
                b'\r' => Ok(None),
                b'\n' => self.finish(),
                _ => {
                    if self.buffer.push(byte).is_err() {
                        self.buffer.clear();
                        self.state = AssembleState::Discarding;
                        return Err(LineError::Overflow);
                    }
                    Ok(None)
                }
            },
        }
    }

    fn finish(&mut self) -> Result<Option<Line>, LineError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let mut line = Line::new();
                // Cannot fail: the buffer and the line share a capacity
                let _ = line.push_str(text);
                Ok(Some(line))
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };

        self.buffer.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(asm: &mut LineAssembler, bytes: &[u8]) -> Option<Result<Line, LineError>> {
        for &b in bytes {
            match asm.feed(b) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    #[test]
    fn test_simple_line() {
        let mut asm = LineAssembler::new();
        let line = feed_all(&mut asm, b"ARM\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "ARM");
    }

    #[test]
    fn test_crlf_terminator() {
        let mut asm = LineAssembler::new();
        let line = feed_all(&mut asm, b"GET_STATUS\r\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "GET_STATUS");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut asm = LineAssembler::new();
        assert!(feed_all(&mut asm, b"\r\n\n").is_none());
        let line = feed_all(&mut asm, b"IDENTIFY\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "IDENTIFY");
    }

    #[test]
    fn test_overflow_discards_until_newline() {
        let mut asm = LineAssembler::new();
        let long = [b'A'; MAX_LINE_LEN + 1];
        assert_eq!(feed_all(&mut asm, &long), Some(Err(LineError::Overflow)));

        // Tail of the overlong line is swallowed silently
        assert!(feed_all(&mut asm, b"AAAA\n").is_none());

        let line = feed_all(&mut asm, b"DISARM\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "DISARM");
    }

    #[test]
    fn test_line_at_capacity_accepted() {
        let mut asm = LineAssembler::new();
        let exact = [b'x'; MAX_LINE_LEN];
        assert!(feed_all(&mut asm, &exact).is_none());
        let line = feed_all(&mut asm, b"\n").unwrap().unwrap();
        assert_eq!(line.len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut asm = LineAssembler::new();
        assert_eq!(
            feed_all(&mut asm, &[0xC3, 0x28, b'\n']),
            Some(Err(LineError::InvalidUtf8))
        );
        let line = feed_all(&mut asm, b"ARM\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "ARM");
    }

    #[test]
    fn test_reset_drops_partial() {
        let mut asm = LineAssembler::new();
        assert!(feed_all(&mut asm, b"STO").is_none());
        asm.reset();
        let line = feed_all(&mut asm, b"ARM\n").unwrap().unwrap();
        assert_eq!(line.as_str(), "ARM");
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lines_never_exceed_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
                let mut asm = LineAssembler::new();
                for b in bytes {
                    if let Ok(Some(line)) = asm.feed(b) {
                        prop_assert!(line.len() <= MAX_LINE_LEN);
                        prop_assert!(!line.is_empty());
                        prop_assert!(!line.contains('\n'));
                        prop_assert!(!line.contains('\r'));
                    }
                }
            }
        }
    }
}

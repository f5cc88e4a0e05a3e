//! Line-buffered access to source text.

use core::str::SplitInclusive;

use crate::session::Session;

/// Hands out characters one at a time, a line at a time, while keeping a
/// 1-based line counter. Supports backing up a single character.
pub struct SourceReader<'src> {
    lines: SplitInclusive<'src, char>,
    buffer: Vec<char>,
    position: usize,
    line: u32,
    at_eof: bool,
}

impl<'src> SourceReader<'src> {
    pub fn new(source: &'src str) -> Self {
        SourceReader {
            lines: source.split_inclusive('\n'),
            buffer: Vec::new(),
            position: 0,
            line: 0,
            at_eof: false,
        }
    }

    /// Number of the line the last character came from.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Next character, reading a fresh line when the buffer is exhausted.
    /// Newly read lines are echoed to the listing when `echo_source` is on.
    pub fn next_char(&mut self, session: &mut Session) -> Option<char> {
        if self.position >= self.buffer.len() {
            let Some(text) = self.lines.next() else {
                self.at_eof = true;
                return None;
            };
            self.line += 1;
            if session.options.echo_source {
                session.write(&format!("{:4}: {}", self.line, text));
                if !text.ends_with('\n') {
                    session.write("\n");
                }
            }
            self.buffer.clear();
            self.buffer.extend(text.chars());
            self.position = 0;
        }
        let ch = self.buffer[self.position];
        self.position += 1;
        Some(ch)
    }

    /// Back up one character. A no-op once end of input was hit.
    pub fn unget(&mut self) {
        if !self.at_eof && self.position > 0 {
            self.position -= 1;
        }
    }
}

//! Chunked line reader.
//!
//! Reads the input in fixed-size chunks and splits it into logical lines on
//! LF, CR or CRLF. The reader keeps line boundaries exact across chunk reads:
//! - a CR at the very end of the available bytes is classified with a one
//!   byte lookahead from the stream, pushed back when it is not an LF
//! - an unterminated tail is carried into the next chunk until it reaches
//!   the buffer size, then flushed as a partial line
//! - when escape completion is enabled (clean modes), a flushed tail whose
//!   last ESC starts an unfinished SGR sequence pulls the rest of that
//!   sequence from the stream first, so it is never split
//!
//! At most one byte is ever pushed back.

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::mem;

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::error::{ColorizeError, Result};
use crate::sgr::{CSI, ESC, SEPARATOR, SGR_FINAL};

/// Default chunk size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Largest accepted chunk size in bytes.
pub const MAX_BUFFER_SIZE: usize = 65536;

bitflags! {
    /// Terminator(s) that ended a logical line. Empty for an unterminated line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineEnding: u8 {
        const LF = 0x01;
        const CR = 0x02;
    }
}

impl LineEnding {
    /// Bytes to replay after the line: `\r` before `\n`.
    pub fn as_bytes(self) -> &'static [u8] {
        match (self.contains(Self::CR), self.contains(Self::LF)) {
            (true, true) => b"\r\n",
            (true, false) => b"\r",
            (false, true) => b"\n",
            (false, false) => b"",
        }
    }
}

/// One logical line without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub bytes: Vec<u8>,
    pub ending: LineEnding,
    /// Flushed before its terminator was seen; more of the same line follows.
    pub partial: bool,
}

impl Line {
    fn terminated(bytes: Vec<u8>, ending: LineEnding) -> Self {
        Self {
            bytes,
            ending,
            partial: false,
        }
    }

    fn partial(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ending: LineEnding::empty(),
            partial: true,
        }
    }

    fn last(bytes: Vec<u8>) -> Self {
        Self::terminated(bytes, LineEnding::empty())
    }
}

/// Progress of an unfinished `ESC [ params m` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Bracket,
    Params,
}

impl Pending {
    /// Classify the bytes following a trailing ESC. `None` when they are
    /// already complete or can no longer become an SGR sequence.
    fn classify(suffix: &[u8]) -> Option<Self> {
        let Some((&first, params)) = suffix.split_first() else {
            return Some(Pending::Bracket);
        };
        if first != CSI {
            return None;
        }
        params
            .iter()
            .all(|&b| b.is_ascii_digit() || b == SEPARATOR)
            .then_some(Pending::Params)
    }
}

#[derive(Debug)]
enum Completion {
    Completed(Vec<u8>),
    Cancelled(Vec<u8>),
}

/// Lazy, non-restartable sequence of [`Line`]s read from a byte stream.
#[derive(Debug)]
pub struct LineReader<R> {
    stream: R,
    buffer_size: usize,
    complete_escapes: bool,
    pending: Vec<u8>,
    pushback: Option<u8>,
    ready: VecDeque<Line>,
    eof: bool,
    failed: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(stream: R, buffer_size: usize) -> Self {
        let buffer_size = buffer_size.clamp(1, MAX_BUFFER_SIZE);
        Self {
            stream,
            buffer_size,
            complete_escapes: false,
            pending: Vec::with_capacity(buffer_size),
            pushback: None,
            ready: VecDeque::new(),
            eof: false,
            failed: false,
        }
    }

    /// Complete SGR sequences truncated at a forced flush.
    pub fn complete_escapes(mut self, enabled: bool) -> Self {
        self.complete_escapes = enabled;
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn into_inner(self) -> R {
        self.stream
    }

    fn exhausted(&self) -> bool {
        self.eof && self.pushback.is_none()
    }

    /// Append up to one buffer of bytes to `pending`, pushback byte first.
    fn read_chunk(&mut self) -> Result<usize> {
        let start = self.pending.len();
        if let Some(byte) = self.pushback.take() {
            self.pending.push(byte);
        }
        let target = start + self.buffer_size;
        let mut filled = self.pending.len();
        self.pending.resize(target, 0);

        while filled < target && !self.eof {
            match self.stream.read(&mut self.pending[filled..target]) {
                Ok(0) => self.eof = true,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    self.pending.truncate(filled);
                    return Err(ColorizeError::Read {
                        expected: self.buffer_size,
                        source,
                    });
                }
            }
        }
        self.pending.truncate(filled);

        trace!(bytes = filled - start, eof = self.eof, "Read chunk");
        Ok(filled - start)
    }

    /// Next single byte, taking the pushback slot before the stream.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        if self.eof {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.stream.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => return Err(ColorizeError::Read { expected: 1, source }),
            }
        }
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        trace!(byte, "Pushed back lookahead byte");
        self.pushback = Some(byte);
    }

    /// Read one chunk and queue every line it completes.
    fn fill(&mut self) -> Result<()> {
        self.read_chunk()?;
        self.split_lines()?;

        if self.exhausted() {
            if !self.pending.is_empty() {
                let tail = mem::take(&mut self.pending);
                self.ready.push_back(Line::last(tail));
            }
        } else if self.pending.len() >= self.buffer_size {
            self.flush_partial()?;
        }
        Ok(())
    }

    fn split_lines(&mut self) -> Result<()> {
        let mut start = 0;
        while let Some(offset) = self.pending[start..]
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
        {
            let eol = start + offset;
            let mut ending = LineEnding::empty();
            let mut next = eol + 1;

            if self.pending[eol] == b'\r' {
                ending |= LineEnding::CR;
                match self.pending.get(eol + 1).copied() {
                    Some(b'\n') => {
                        ending |= LineEnding::LF;
                        next += 1;
                    }
                    Some(_) => {}
                    None => match self.next_byte()? {
                        Some(b'\n') => ending |= LineEnding::LF,
                        Some(byte) => self.unread(byte),
                        None => {}
                    },
                }
            } else {
                ending |= LineEnding::LF;
            }

            let bytes = self.pending[start..eol].to_vec();
            self.ready.push_back(Line::terminated(bytes, ending));
            start = next;
        }
        self.pending.drain(..start);
        Ok(())
    }

    /// Emit the carried tail as a partial line, completing a trailing escape if asked to.
    fn flush_partial(&mut self) -> Result<()> {
        let mut tail = mem::take(&mut self.pending);

        let trailing = if self.complete_escapes {
            tail.iter().rposition(|&b| b == ESC).and_then(|esc| {
                Pending::classify(&tail[esc + 1..]).map(|state| (esc, state))
            })
        } else {
            None
        };

        let Some((esc, state)) = trailing else {
            self.ready.push_back(Line::partial(tail));
            return Ok(());
        };

        debug!(offset = esc, ?state, "Completing truncated escape sequence");
        match self.complete_sequence(state)? {
            Completion::Completed(rest) => {
                let mut escape = tail.split_off(esc);
                escape.extend_from_slice(&rest);
                if !tail.is_empty() {
                    self.ready.push_back(Line::partial(tail));
                }
                self.ready.push_back(Line::partial(escape));
            }
            Completion::Cancelled(rest) => {
                debug!(consumed = rest.len(), "Escape completion cancelled");
                tail.extend_from_slice(&rest);
                self.ready.push_back(Line::partial(tail));
            }
        }
        Ok(())
    }

    /// Pull bytes one at a time until the sequence ends in `m` or stops fitting.
    fn complete_sequence(&mut self, mut state: Pending) -> Result<Completion> {
        let mut rest = Vec::new();
        loop {
            if rest.len() >= self.buffer_size {
                return Ok(Completion::Cancelled(rest));
            }
            let Some(byte) = self.next_byte()? else {
                return Ok(Completion::Cancelled(rest));
            };
            match (state, byte) {
                (Pending::Bracket, CSI) => state = Pending::Params,
                (Pending::Params, b'0'..=b'9' | SEPARATOR) => {}
                (Pending::Params, SGR_FINAL) => {
                    rest.push(byte);
                    return Ok(Completion::Completed(rest));
                }
                _ => {
                    self.unread(byte);
                    return Ok(Completion::Cancelled(rest));
                }
            }
            rest.push(byte);
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.failed || (self.exhausted() && self.pending.is_empty()) {
                return None;
            }
            if let Err(e) = self.fill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

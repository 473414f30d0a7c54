//! SGR (Select Graphic Rendition) scanner.
//!
//! Recognizes `ESC [ ... m` sequences at a given offset in a line buffer.
//! Two policies exist:
//! - [`CleanPolicy::CleanAll`]: anything made of digits and `;` up to an `m`
//! - [`CleanPolicy::Clean`]: only reset, attribute chains ending in a color, or a lone color
//!
//! Sequences the active policy rejects are left in place as literal text.

pub const ESC: u8 = 0x1b;
pub const CSI: u8 = b'[';
pub const SGR_FINAL: u8 = b'm';
pub const SEPARATOR: u8 = b';';

/// How existing escape sequences are recognized for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanPolicy {
    /// Semantically valid color, attribute and reset sequences only.
    Clean,
    /// Every sequence shaped like SGR.
    CleanAll,
}

/// Byte range of one recognized sequence: `start` is the ESC, `end` is one past the `m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeSpan {
    pub start: usize,
    pub end: usize,
}

impl EscapeSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Check whether an SGR sequence recognized by `policy` starts at `pos`.
pub fn scan_sgr(buf: &[u8], pos: usize, policy: CleanPolicy) -> Option<EscapeSpan> {
    if buf.get(pos) != Some(&ESC) || buf.get(pos + 1) != Some(&CSI) {
        return None;
    }
    let params = pos + 2;
    let end = match policy {
        CleanPolicy::CleanAll => scan_permissive(buf, params)?,
        CleanPolicy::Clean => scan_selective(buf, params)?,
    };
    Some(EscapeSpan { start: pos, end })
}

/// Collect all non-overlapping spans in `buf`, left to right.
pub fn find_spans(buf: &[u8], policy: CleanPolicy) -> Vec<EscapeSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(offset) = buf[pos..].iter().position(|&b| b == ESC) {
        let start = pos + offset;
        match scan_sgr(buf, start, policy) {
            Some(span) => {
                spans.push(span);
                pos = span.end;
            }
            None => pos = start + 1,
        }
    }
    spans
}

/// Remove every span `policy` recognizes, repeating until none is left.
///
/// Dropping a span can join the bytes around it into a new sequence
/// (`ESC[3` + `ESC[1m` + `m`), so the result is rescanned until it is stable.
pub fn strip_spans(buf: &[u8], policy: CleanPolicy) -> Vec<u8> {
    let mut out = buf.to_vec();
    loop {
        let spans = find_spans(&out, policy);
        if spans.is_empty() {
            return out;
        }
        let mut kept = Vec::with_capacity(out.len());
        let mut pos = 0;
        for span in spans {
            kept.extend_from_slice(&out[pos..span.start]);
            pos = span.end;
        }
        kept.extend_from_slice(&out[pos..]);
        out = kept;
    }
}

fn scan_permissive(buf: &[u8], mut pos: usize) -> Option<usize> {
    while let Some(&b) = buf.get(pos) {
        match b {
            b'0'..=b'9' | SEPARATOR => pos += 1,
            SGR_FINAL => return Some(pos + 1),
            _ => return None,
        }
    }
    None
}

/// Parameter classes understood by the selective policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Reset,
    Attribute,
    Foreground,
    Background,
}

impl Param {
    fn classify(value: u8) -> Option<Self> {
        match value {
            0 => Some(Param::Reset),
            1..=9 => Some(Param::Attribute),
            30..=37 | 39 => Some(Param::Foreground),
            40..=47 | 49 => Some(Param::Background),
            _ => None,
        }
    }
}

fn scan_selective(buf: &[u8], mut pos: usize) -> Option<usize> {
    let mut iteration = 0usize;
    let mut previous_attribute_iteration = 0usize;

    loop {
        iteration += 1;
        let (value, next) = parse_param(buf, pos)?;
        let terminator = *buf.get(next)?;

        match (Param::classify(value)?, terminator) {
            (Param::Reset, SGR_FINAL) if iteration == 1 => return Some(next + 1),
            (Param::Attribute, SEPARATOR)
                if iteration - previous_attribute_iteration == 1 =>
            {
                previous_attribute_iteration = iteration;
                pos = next + 1;
            }
            (Param::Foreground, SGR_FINAL) => return Some(next + 1),
            (Param::Background, SGR_FINAL) if iteration == 1 => return Some(next + 1),
            _ => return None,
        }
    }
}

/// Parse one 1-2 digit decimal parameter, returning its value and the offset after it.
fn parse_param(buf: &[u8], pos: usize) -> Option<(u8, usize)> {
    let digits = buf[pos.min(buf.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || digits > 2 {
        return None;
    }
    let value = buf[pos..pos + digits]
        .iter()
        .fold(0u8, |acc, b| acc * 10 + (b - b'0'));
    Some((value, pos + digits))
}

//! Line renderer.
//!
//! Writes each logical line either wrapped in new SGR sequences (plain and
//! rainbow modes) or with recognized escape sequences removed (clean modes),
//! followed by the line's original terminator.

use std::fmt;
use std::io::{Read, Write};

use crate::attr::Attributes;
use crate::color::Channel;
use crate::error::{ColorizeError, Result};
use crate::rainbow::RainbowCycler;
use crate::reader::{Line, LineEnding, LineReader};
use crate::selection::ColorSelection;
use crate::sgr::{self, CleanPolicy};

const RESET: &[u8] = b"\x1b[0m";

/// Processing mode, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Plain,
    Clean,
    CleanAll,
    RainbowFg,
    RainbowBg,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Plain => "plain",
            Mode::Clean => "clean",
            Mode::CleanAll => "clean-all",
            Mode::RainbowFg => "rainbow-fg",
            Mode::RainbowBg => "rainbow-bg",
        }
    }

    /// Escape policy for the clean modes.
    pub fn clean_policy(self) -> Option<CleanPolicy> {
        match self {
            Mode::Clean => Some(CleanPolicy::Clean),
            Mode::CleanAll => Some(CleanPolicy::CleanAll),
            _ => None,
        }
    }

    pub fn is_clean(self) -> bool {
        matches!(self, Mode::Clean | Mode::CleanAll)
    }

    /// Channel cycled by the rainbow modes.
    pub fn rainbow_channel(self) -> Option<Channel> {
        match self {
            Mode::RainbowFg => Some(Channel::Foreground),
            Mode::RainbowBg => Some(Channel::Background),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders lines to an output stream.
#[derive(Debug)]
pub struct Renderer<W> {
    out: W,
    mode: Mode,
    selection: ColorSelection,
    attrs: String,
    omit_color_empty: bool,
    rainbow: Option<RainbowCycler>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: Mode, selection: ColorSelection) -> Self {
        Self {
            out,
            mode,
            selection,
            attrs: String::new(),
            omit_color_empty: false,
            rainbow: mode.rainbow_channel().map(RainbowCycler::new),
        }
    }

    /// Attributes emitted in front of the foreground code.
    pub fn attributes(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs.sgr_prefix();
        self
    }

    /// Skip the color wrapping for empty lines.
    pub fn omit_color_empty(mut self, omit: bool) -> Self {
        self.omit_color_empty = omit;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Render one line and its terminator.
    pub fn render(&mut self, line: &Line) -> Result<()> {
        if self.mode.is_clean() {
            self.write_clean(&line.bytes)?;
        } else {
            let selection = self.line_selection(line.partial);
            self.write_colored(&line.bytes, &selection)?;
        }
        self.write_ending(line.ending)
    }

    /// Render every line of `reader`, returning the number of lines written.
    pub fn render_all<R: Read>(&mut self, reader: LineReader<R>) -> Result<u64> {
        let mut count = 0;
        for line in reader {
            self.render(&line?)?;
            count += 1;
        }
        self.flush()?;
        Ok(count)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(ColorizeError::write)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line_selection(&mut self, partial: bool) -> ColorSelection {
        match self.rainbow.as_mut() {
            Some(cycler) => {
                let index = cycler.next_index(&self.selection, !partial);
                self.selection.with_index(cycler.channel(), index)
            }
            None => self.selection,
        }
    }

    fn write_colored(&mut self, bytes: &[u8], selection: &ColorSelection) -> Result<()> {
        if self.omit_color_empty && bytes.is_empty() {
            return Ok(());
        }
        if let Some(code) = selection.background.and_then(|bg| bg.code) {
            write!(self.out, "\x1b[{code}").map_err(ColorizeError::write)?;
        }
        match selection.foreground.code {
            Some(code) => {
                write!(self.out, "\x1b[{}{code}", self.attrs).map_err(ColorizeError::write)?;
                self.write(bytes)?;
                self.write(RESET)
            }
            None => self.write(bytes),
        }
    }

    fn write_clean(&mut self, bytes: &[u8]) -> Result<()> {
        let policy = self
            .mode
            .clean_policy()
            .ok_or(ColorizeError::InvalidEscapePolicy {
                mode: self.mode.name(),
            })?;
        self.write(&sgr::strip_spans(bytes, policy))
    }

    fn write_ending(&mut self, ending: LineEnding) -> Result<()> {
        self.write(ending.as_bytes())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes).map_err(ColorizeError::write)
    }
}

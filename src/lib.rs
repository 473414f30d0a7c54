//! colorize library
//!
//! Colors text streams through ANSI SGR escape sequences, and strips such
//! sequences again. The binary wires [`Options`] to a [`LineReader`] and a
//! [`Renderer`]; both are usable on any `Read`/`Write` pair.

pub mod attr;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod options;
pub mod rainbow;
pub mod reader;
pub mod render;
pub mod selection;
pub mod sgr;

use std::io::{Read, Write};

pub use attr::Attributes;
pub use color::{Channel, ColorPicker};
pub use config::Config;
pub use error::{ColorizeError, Result};
pub use options::{Options, OptionsError};
pub use reader::{Line, LineEnding, LineReader};
pub use render::{Mode, Renderer};
pub use selection::{ColorSelection, ColorSpec};

/// Filter `input` into `output` as described by `options`.
///
/// Returns the number of lines (or partial pieces) rendered.
pub fn run<R: Read, W: Write>(options: &Options, input: R, output: W) -> Result<u64> {
    let reader =
        LineReader::new(input, options.buffer_size).complete_escapes(options.mode.is_clean());
    let mut renderer = Renderer::new(output, options.mode, options.selection)
        .attributes(options.attributes)
        .omit_color_empty(options.omit_color_empty);
    renderer.render_all(reader)
}

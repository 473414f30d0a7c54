//! Resolution of command line arguments and configuration into run options.
//!
//! Command line values win over the config file. Clean modes only need an
//! input; every coloring setting is ignored for them.

use std::path::Path;

use crate::attr::Attributes;
use crate::cli::Cli;
use crate::color::{self, Channel, ColorPicker, IndexChooser, FG_COLORS};
use crate::config::Config;
use crate::input::InputSource;
use crate::reader::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
use crate::render::Mode;
use crate::selection::{ColorSelection, ColorSpec, SelectionError, RANDOM};

/// Errors found while resolving options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("color string missing")]
    MissingColor,

    #[error("hyphen cannot be used as color string")]
    HyphenColor,

    #[error("file must be preceded by color string")]
    FileWithoutColor,

    #[error("{mode} mode takes a single file argument")]
    TooManyArguments { mode: Mode },

    #[error("attribute '{0}' not recognized")]
    UnknownAttribute(String),

    #[error("attribute '{0}' has already been provided")]
    DuplicateAttribute(String),

    #[error("--exclude-random switch must be provided a color")]
    ExcludeRandom,

    #[error("--rainbow-fg and --rainbow-bg cannot be combined")]
    RainbowConflict,

    #[error("buffer size must be between 1 and {max} bytes (got {size})")]
    BufferSize { size: usize, max: usize },
}

/// Fully validated parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub selection: ColorSelection,
    pub attributes: Attributes,
    pub omit_color_empty: bool,
    pub buffer_size: usize,
    pub input: InputSource,
}

impl Options {
    /// Merge `cli` over `config`, drawing random colors from `picker`.
    pub fn resolve<C: IndexChooser>(
        cli: &Cli,
        config: &Config,
        picker: &mut ColorPicker<C>,
    ) -> Result<Self, OptionsError> {
        let buffer_size = resolve_buffer_size(cli.buffer_size.or(config.buffer_size))?;

        if cli.clean || cli.clean_all {
            let mode = if cli.clean { Mode::Clean } else { Mode::CleanAll };
            if cli.file.is_some() {
                return Err(OptionsError::TooManyArguments { mode });
            }
            return Ok(Self {
                mode,
                selection: ColorSelection::new(&FG_COLORS[0], None),
                attributes: Attributes::empty(),
                omit_color_empty: false,
                buffer_size,
                input: InputSource::from_arg(cli.color.as_deref()),
            });
        }

        let mode = match (
            cli.rainbow_fg || config.rainbow_fg,
            cli.rainbow_bg || config.rainbow_bg,
        ) {
            (true, true) => return Err(OptionsError::RainbowConflict),
            (true, false) => Mode::RainbowFg,
            (false, true) => Mode::RainbowBg,
            (false, false) => Mode::Plain,
        };

        let (color, file) = split_positionals(cli, config)?;
        let spec = ColorSpec::parse(color)?;

        let exclude = cli
            .exclude_random
            .as_deref()
            .or(config.exclude_random.as_deref())
            .map(resolve_exclude)
            .transpose()?;
        let selection = spec.resolve(picker, exclude)?;

        let attr_names = if cli.attr.is_empty() {
            &config.attr
        } else {
            &cli.attr
        };
        let mut attributes = parse_attributes(attr_names)?;
        if spec.bold {
            attributes |= Attributes::BOLD;
        }

        Ok(Self {
            mode,
            selection,
            attributes,
            omit_color_empty: cli.omit_color_empty || config.omit_color_empty,
            buffer_size,
            input: InputSource::from_arg(file),
        })
    }
}

/// Pick the color string and file from the positionals.
///
/// With a configured color, a lone positional is the file when it is `-`
/// or an existing path, and a color string otherwise. Without one, a color
/// argument naming an existing file that does not start with color names
/// is rejected.
fn split_positionals<'a>(
    cli: &'a Cli,
    config: &'a Config,
) -> Result<(&'a str, Option<&'a str>), OptionsError> {
    let configured = config.color.as_deref();
    let (color, file) = match (cli.color.as_deref(), cli.file.as_deref(), configured) {
        (Some("-"), Some(_), _) => return Err(OptionsError::HyphenColor),
        (Some(color), Some(file), _) => (color, Some(file)),
        (Some(arg), None, Some(color)) if arg == "-" || Path::new(arg).exists() => {
            return Ok((color, Some(arg)));
        }
        (Some(color), None, _) => (color, None),
        (None, _, Some(color)) => return Ok((color, None)),
        (None, _, None) => return Err(OptionsError::MissingColor),
    };
    if names_a_file(color) {
        return Err(OptionsError::FileWithoutColor);
    }
    Ok((color, file))
}

/// An existing path is still taken as a color string when it is made of
/// up to two foreground names joined by `/`, such as `red` or `red/blue`.
fn names_a_file(arg: &str) -> bool {
    if !Path::new(arg).exists() {
        return false;
    }
    let mut rest = arg;
    for _ in 0..2 {
        let Some(entry) = FG_COLORS.iter().find(|entry| rest.starts_with(entry.name)) else {
            break;
        };
        rest = &rest[entry.name.len()..];
        match rest.strip_prefix('/') {
            Some(next) if !next.is_empty() => rest = next,
            _ => break,
        }
    }
    !rest.is_empty()
}

fn resolve_exclude(name: &str) -> Result<&'static str, OptionsError> {
    let lowered = name.to_ascii_lowercase();
    if lowered == RANDOM {
        return Err(OptionsError::ExcludeRandom);
    }
    color::lookup(Channel::Foreground, &lowered)
        .map(|entry| entry.name)
        .map_err(|_| {
            SelectionError::UnknownColor {
                channel: Channel::Foreground,
                name: name.to_string(),
            }
            .into()
        })
}

/// Parse attribute names, rejecting unknown names and repeats.
pub fn parse_attributes<S: AsRef<str>>(names: &[S]) -> Result<Attributes, OptionsError> {
    let mut attributes = Attributes::empty();
    for name in names {
        let name = name.as_ref().trim();
        let flag = Attributes::from_attr_name(name)
            .ok_or_else(|| OptionsError::UnknownAttribute(name.to_string()))?;
        if attributes.contains(flag) {
            return Err(OptionsError::DuplicateAttribute(name.to_string()));
        }
        attributes |= flag;
    }
    Ok(attributes)
}

fn resolve_buffer_size(size: Option<usize>) -> Result<usize, OptionsError> {
    match size {
        None => Ok(DEFAULT_BUFFER_SIZE),
        Some(size) if (1..=MAX_BUFFER_SIZE).contains(&size) => Ok(size),
        Some(size) => Err(OptionsError::BufferSize {
            size,
            max: MAX_BUFFER_SIZE,
        }),
    }
}

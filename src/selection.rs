//! Color string parsing and resolution.
//!
//! Turns a color string such as `red`, `Green/black` or `random/white` into
//! a [`ColorSelection`]. A capitalised foreground name requests bold text.

use crate::color::{self, Channel, ColorEntry, ColorPicker, IndexChooser};

/// Name accepted on either channel to request a random cyclable color.
pub const RANDOM: &str = "random";

/// Resolved colors for one run.
///
/// If the background has a code, the foreground has one too: a `none`
/// foreground is replaced by `default` in [`ColorSelection::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSelection {
    pub foreground: &'static ColorEntry,
    pub background: Option<&'static ColorEntry>,
}

impl ColorSelection {
    pub fn new(foreground: &'static ColorEntry, background: Option<&'static ColorEntry>) -> Self {
        let foreground = match background {
            Some(bg) if bg.has_code() && !foreground.has_code() => {
                &color::FG_COLORS[color::FG_COLORS.len() - 1]
            }
            _ => foreground,
        };
        Self {
            foreground,
            background,
        }
    }

    /// The color currently occupying `channel`.
    pub fn entry(&self, channel: Channel) -> Option<&'static ColorEntry> {
        match channel {
            Channel::Foreground => Some(self.foreground),
            Channel::Background => self.background,
        }
    }

    /// Replace the color on `channel` by table index, re-applying the foreground fallback.
    pub fn with_index(&self, channel: Channel, index: usize) -> Self {
        let entry = color::by_index(channel, index);
        match channel {
            Channel::Foreground => Self::new(entry.unwrap_or(self.foreground), self.background),
            Channel::Background => Self::new(self.foreground, entry.or(self.background)),
        }
    }
}

/// Errors found while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("hyphen must be preceded by color string")]
    Hyphen,

    #[error("foreground color missing")]
    MissingForeground,

    #[error("background color missing")]
    MissingBackground,

    #[error("one color pair allowed only")]
    TooManyPairs,

    #[error("{channel} color '{name}' cannot be made of non-alphabetic characters")]
    NonAlphabetic { channel: Channel, name: String },

    #[error("{channel} color '{name}' cannot be in mixed lower/upper case")]
    MixedCase { channel: Channel, name: String },

    #[error("{channel} color '{name}' cannot be bold")]
    CannotBeBold { channel: Channel, name: String },

    #[error("{channel} color '{name}' cannot be combined with '{other}'")]
    RandomCombination {
        channel: Channel,
        name: String,
        other: String,
    },

    #[error("{channel} color '{name}' not recognized")]
    UnknownColor { channel: Channel, name: String },
}

/// One channel of a parsed color string, names lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorName {
    pub name: String,
    pub original: String,
}

impl ColorName {
    pub fn is_random(&self) -> bool {
        self.name == RANDOM
    }
}

/// Parsed but unresolved color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpec {
    pub foreground: ColorName,
    pub background: Option<ColorName>,
    /// Foreground name was capitalised.
    pub bold: bool,
}

impl ColorSpec {
    /// Parse `fg` or `fg/bg`.
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        if input == "-" {
            return Err(SelectionError::Hyphen);
        }
        let (fg, bg) = match input.split_once('/') {
            None => (input, None),
            Some(("", _)) => return Err(SelectionError::MissingForeground),
            Some((_, "")) => return Err(SelectionError::MissingBackground),
            Some((_, rest)) if rest.contains('/') => return Err(SelectionError::TooManyPairs),
            Some((fg, bg)) => (fg, Some(bg)),
        };
        if fg.is_empty() {
            return Err(SelectionError::MissingForeground);
        }

        let (foreground, bold) = parse_name(Channel::Foreground, fg)?;
        let background = match bg {
            Some(bg) => {
                let (name, bold) = parse_name(Channel::Background, bg)?;
                if bold {
                    return Err(SelectionError::CannotBeBold {
                        channel: Channel::Background,
                        name: bg.to_string(),
                    });
                }
                Some(name)
            }
            None => None,
        };

        let spec = Self {
            foreground,
            background,
            bold,
        };
        spec.check_random_pairs()?;
        Ok(spec)
    }

    fn check_random_pairs(&self) -> Result<(), SelectionError> {
        let Some(background) = &self.background else {
            return Ok(());
        };
        let pairs = [
            (Channel::Foreground, &self.foreground, background),
            (Channel::Background, background, &self.foreground),
        ];
        for (channel, this, other) in pairs {
            if this.is_random() && matches!(other.name.as_str(), "none" | "default") {
                return Err(SelectionError::RandomCombination {
                    channel,
                    name: this.original.clone(),
                    other: other.original.clone(),
                });
            }
        }
        Ok(())
    }

    /// Resolve names to table entries, drawing random colors from `picker`.
    ///
    /// A random foreground avoids `exclude_random` and a plain background
    /// name; a random background avoids the resolved foreground.
    pub fn resolve<C: IndexChooser>(
        &self,
        picker: &mut ColorPicker<C>,
        exclude_random: Option<&str>,
    ) -> Result<ColorSelection, SelectionError> {
        let foreground = if self.foreground.is_random() {
            let mut exclude = Vec::with_capacity(2);
            exclude.extend(exclude_random);
            if let Some(bg) = self.background.as_ref().filter(|bg| !bg.is_random()) {
                exclude.push(bg.name.as_str());
            }
            picker.pick_random(Channel::Foreground, &exclude)
        } else {
            find(Channel::Foreground, &self.foreground)?
        };

        let background = match &self.background {
            Some(bg) if bg.is_random() => {
                Some(picker.pick_random(Channel::Background, &[foreground.name]))
            }
            Some(bg) => Some(find(Channel::Background, bg)?),
            None => None,
        };

        let selection = ColorSelection::new(foreground, background);
        tracing::debug!(
            foreground = selection.foreground.name,
            background = selection.background.map(|bg| bg.name),
            "Resolved color selection"
        );
        Ok(selection)
    }
}

fn parse_name(channel: Channel, name: &str) -> Result<(ColorName, bool), SelectionError> {
    if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SelectionError::NonAlphabetic {
            channel,
            name: name.to_string(),
        });
    }
    if !name.chars().skip(1).all(|c| c.is_ascii_lowercase()) {
        return Err(SelectionError::MixedCase {
            channel,
            name: name.to_string(),
        });
    }
    if name == "None" {
        return Err(SelectionError::CannotBeBold {
            channel,
            name: name.to_string(),
        });
    }
    let bold = name.starts_with(|c: char| c.is_ascii_uppercase());
    Ok((
        ColorName {
            name: name.to_ascii_lowercase(),
            original: name.to_string(),
        },
        bold,
    ))
}

fn find(channel: Channel, name: &ColorName) -> Result<&'static ColorEntry, SelectionError> {
    color::lookup(channel, &name.name).map_err(|_| SelectionError::UnknownColor {
        channel,
        name: name.original.clone(),
    })
}

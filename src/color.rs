//! Color table
//!
//! Static registry of the named foreground and background colors, their SGR
//! codes and their stable indices. Both tables share the same order, so an
//! index names the same color on either channel.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ColorizeError, Result};

/// Foreground or background color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Foreground,
    Background,
}

impl Channel {
    /// The color table for this channel.
    pub fn table(self) -> &'static [ColorEntry] {
        match self {
            Channel::Foreground => &FG_COLORS,
            Channel::Background => &BG_COLORS,
        }
    }

    /// The channel on the other side of a foreground/background pair.
    pub fn other(self) -> Channel {
        match self {
            Channel::Foreground => Channel::Background,
            Channel::Background => Channel::Foreground,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Foreground => f.write_str("foreground"),
            Channel::Background => f.write_str("background"),
        }
    }
}

/// One named color. `code` is the SGR tail without the `ESC[` prefix, e.g. `31m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub name: &'static str,
    pub code: Option<&'static str>,
    pub index: usize,
}

impl ColorEntry {
    const fn new(name: &'static str, code: Option<&'static str>, index: usize) -> Self {
        Self { name, code, index }
    }

    /// Whether this entry emits an escape sequence at all.
    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }
}

pub static FG_COLORS: [ColorEntry; 10] = [
    ColorEntry::new("none", None, 0),
    ColorEntry::new("black", Some("30m"), 1),
    ColorEntry::new("red", Some("31m"), 2),
    ColorEntry::new("green", Some("32m"), 3),
    ColorEntry::new("yellow", Some("33m"), 4),
    ColorEntry::new("blue", Some("34m"), 5),
    ColorEntry::new("magenta", Some("35m"), 6),
    ColorEntry::new("cyan", Some("36m"), 7),
    ColorEntry::new("white", Some("37m"), 8),
    ColorEntry::new("default", Some("39m"), 9),
];

pub static BG_COLORS: [ColorEntry; 10] = [
    ColorEntry::new("none", None, 0),
    ColorEntry::new("black", Some("40m"), 1),
    ColorEntry::new("red", Some("41m"), 2),
    ColorEntry::new("green", Some("42m"), 3),
    ColorEntry::new("yellow", Some("43m"), 4),
    ColorEntry::new("blue", Some("44m"), 5),
    ColorEntry::new("magenta", Some("45m"), 6),
    ColorEntry::new("cyan", Some("46m"), 7),
    ColorEntry::new("white", Some("47m"), 8),
    ColorEntry::new("default", Some("49m"), 9),
];

/// Indices eligible for random and rainbow selection ("none" and "default" excluded).
pub fn cyclable_range(channel: Channel) -> RangeInclusive<usize> {
    1..=channel.table().len() - 2
}

/// Look up a color by name on the given channel. Matching is done on the lowered name.
pub fn lookup(channel: Channel, name: &str) -> Result<&'static ColorEntry> {
    let lowered = name.to_ascii_lowercase();
    channel
        .table()
        .iter()
        .find(|entry| entry.name == lowered)
        .ok_or_else(|| ColorizeError::UnknownColor {
            channel,
            name: name.to_string(),
        })
}

/// Look up a color by its table index.
pub fn by_index(channel: Channel, index: usize) -> Option<&'static ColorEntry> {
    channel.table().get(index)
}

/// Source of indices for random color draws.
///
/// Implemented for [`fastrand::Rng`]; tests can supply a scripted chooser.
pub trait IndexChooser {
    /// Return an index within `range` (both ends inclusive).
    fn choose(&mut self, range: RangeInclusive<usize>) -> usize;
}

impl IndexChooser for fastrand::Rng {
    fn choose(&mut self, range: RangeInclusive<usize>) -> usize {
        self.usize(range)
    }
}

/// Draws random cyclable colors while honoring an exclusion list.
#[derive(Debug)]
pub struct ColorPicker<C = fastrand::Rng> {
    chooser: C,
}

impl ColorPicker<fastrand::Rng> {
    /// Create a picker seeded once from the wall clock.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_chooser(fastrand::Rng::with_seed(seed))
    }
}

impl Default for ColorPicker<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: IndexChooser> ColorPicker<C> {
    pub fn with_chooser(chooser: C) -> Self {
        Self { chooser }
    }

    /// Pick a cyclable color on `channel` whose name is not in `exclude`.
    ///
    /// `exclude` holds at most two names, so at least six of the eight
    /// cyclable colors stay eligible and the retry loop terminates.
    pub fn pick_random(&mut self, channel: Channel, exclude: &[&str]) -> &'static ColorEntry {
        let table = channel.table();
        loop {
            let index = self.chooser.choose(cyclable_range(channel));
            let entry = &table[index];
            if !exclude.contains(&entry.name) {
                return entry;
            }
            tracing::trace!(name = entry.name, %channel, "Random color excluded, drawing again");
        }
    }
}

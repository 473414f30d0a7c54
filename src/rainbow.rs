//! Rainbow cycling of one color channel across rendered lines.

use crate::color::{cyclable_range, Channel};
use crate::selection::ColorSelection;

/// Per-run counter stepping one channel through the cyclable colors.
///
/// The counter starts at 0 (unseeded) and is seeded from the selection's
/// current color on first use. It only advances for complete lines, so a
/// line flushed in pieces keeps a single color.
#[derive(Debug, Clone)]
pub struct RainbowCycler {
    channel: Channel,
    counter: usize,
}

impl RainbowCycler {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            counter: 0,
        }
    }

    /// The channel being cycled.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Table index to use on the cycled channel for the next line.
    pub fn next_index(&mut self, selection: &ColorSelection, line_complete: bool) -> usize {
        let range = cyclable_range(self.channel);
        let (first, last) = (*range.start(), *range.end());

        if self.counter == 0 {
            self.counter = selection.entry(self.channel).map_or(0, |entry| entry.index);
        }
        if !range.contains(&self.counter) {
            self.counter = first;
        }

        let mut index = self.counter;
        if let Some(occupied) = selection.entry(self.channel.other()).map(|e| e.index) {
            // Only one other color can collide, so two probes always settle.
            for _ in 0..2 {
                if index != occupied {
                    break;
                }
                index = if index >= last { first } else { index + 1 };
            }
        }

        if line_complete {
            self.counter = index + 1;
        }
        index
    }
}

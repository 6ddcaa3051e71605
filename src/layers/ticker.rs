/// Bottom-row marquee of trench events. The event strings are joined,
/// self-concatenated until the buffer is at least double the viewport
/// width, and scrolled one column every 3 ticks.

use crossterm::style::Color;

use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const TICKER_FG: Color = Color::Rgb { r: 0x77, g: 0x77, b: 0x77 };
const TICKER_BG: Color = Color::Rgb { r: 0x0a, g: 0x0a, b: 0x0a };
const SEPARATOR: &str = " \u{2500}\u{2500}\u{2500} ";

const FALLBACK: &[&str] = &[
    "TRENCH FORECAST",
    "Press [W] to cycle weather",
    "Press [D] to toggle the data feed",
    "ASCII townscape visualization of the Solana memecoin trenches",
];

pub struct TickerLayer {
    scroll_offset: usize,
}

impl TickerLayer {
    pub fn new() -> Self {
        TickerLayer { scroll_offset: 0 }
    }

    /// Marquee buffer for the given viewport width (exposed for tests).
    pub fn build_buffer(state: &SceneState) -> Vec<char> {
        let text = match state.trench {
            Some(t) if !t.events.is_empty() => t
                .events
                .iter()
                .map(|e| e.text.as_str())
                .collect::<Vec<_>>()
                .join(SEPARATOR),
            _ => FALLBACK.join(SEPARATOR),
        };

        let mut buffer: Vec<char> = text.chars().collect();
        let sep: Vec<char> = SEPARATOR.chars().collect();
        while (buffer.len() as i32) < state.cols * 2 {
            let mut doubled = buffer.clone();
            doubled.extend_from_slice(&sep);
            doubled.extend_from_slice(&buffer);
            buffer = doubled;
        }
        buffer
    }
}

impl Default for TickerLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for TickerLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let row = state.rows - 1;
        let buffer = Self::build_buffer(state);

        if tick % 3 == 0 {
            self.scroll_offset += 1;
            if self.scroll_offset >= buffer.len() / 2 {
                self.scroll_offset = 0;
            }
        }

        for c in 0..state.cols {
            let idx = (c as usize + self.scroll_offset) % buffer.len();
            grid.set_full(c, row, buffer[idx], TICKER_FG, Some(TICKER_BG), false);
        }
    }
}

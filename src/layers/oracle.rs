/// Oracle overlay: a centered panel showing either a loading animation
/// or the current reading, word-wrapped, with `$TOKEN` and signed
/// percent substrings re-colored inline. Also home to the local reading
/// composer the host falls back on. The remote oracle is an external
/// service and its absence must never break the overlay.

use crossterm::style::Color;

use crate::domain::market::{format_usd_short, TrenchState};
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const BORDER_COLOR: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };
const TITLE_COLOR: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const BODY_COLOR: Color = Color::Rgb { r: 0xa1, g: 0xa1, b: 0xaa };
const TOKEN_COLOR: Color = TITLE_COLOR;
const GREEN: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const RED: Color = Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 };
const BG_COLOR: Color = Color::Rgb { r: 0x0a, g: 0x0a, b: 0x0a };
const HINT_COLOR: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const LOADING_COLOR: Color = Color::Rgb { r: 0xfb, g: 0xbf, b: 0x24 };

const PANEL_WIDTH: i32 = 55;
const CONTENT_WIDTH: i32 = PANEL_WIDTH - 4;

/// Fixed line when the oracle is asked without a data feed.
pub const NO_DATA_READING: &str =
    "The oracle needs market data. Press [D] to enable the data feed first.";
/// Fixed line shown while a fresh call is still cooling down.
pub const COOLDOWN_READING: &str = "Oracle needs a moment... Try again shortly.";

/// Word-wrap text to a given width, preserving blank lines.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for para in text.split('\n') {
        if para.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in para.split_whitespace() {
            if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > width {
                lines.push(std::mem::take(&mut current));
            }
            if current.is_empty() {
                current = word.to_string();
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Compose a short market commentary from the snapshot. Stands in for
/// the external text-generation service.
pub fn compose_reading(state: &TrenchState) -> String {
    let market = &state.market;
    let mood = match market.buy_ratio {
        r if r >= 60.0 => "The trenches are euphoric tonight",
        r if r >= 52.0 => "Cautious optimism drifts over the skyline",
        r if r >= 46.0 => "The town holds its breath",
        r if r >= 38.0 => "Sellers patrol the streets",
        _ => "Storm sirens echo through the trenches",
    };

    let mut reading = format!(
        "{} \u{2014} {:.0}% of flows are buys on {} of 5-minute volume.",
        mood,
        market.buy_ratio,
        format_usd_short(market.total_volume_5m)
    );

    if let Some(top) = state
        .runners
        .iter()
        .max_by(|a, b| a.pct_change_1h.total_cmp(&b.pct_change_1h))
    {
        reading.push_str(&format!(
            " ${} leads the hour at {}{:.1}%.",
            top.symbol,
            if top.pct_change_1h >= 0.0 { "+" } else { "" },
            top.pct_change_1h
        ));
    }

    if let (Some(grads), Some(rate)) = (market.graduated_today, market.grad_rate) {
        reading.push_str(&format!(
            " {} graduations so far today, a {:.1}% strike rate.",
            grads, rate
        ));
    }

    reading
}

pub struct OracleOverlayLayer;

impl OracleOverlayLayer {
    pub fn new() -> Self {
        OracleOverlayLayer
    }

    fn panel_height(reading: &str) -> i32 {
        let wrapped = word_wrap(reading, CONTENT_WIDTH as usize);
        (wrapped.len() as i32 + 5).max(7)
    }

    fn draw_border(grid: &mut Grid, col: i32, row: i32, w: i32, h: i32) {
        grid.set_full(col, row, '\u{2554}', BORDER_COLOR, Some(BG_COLOR), false);
        grid.set_full(col + w - 1, row, '\u{2557}', BORDER_COLOR, Some(BG_COLOR), false);
        grid.set_full(col, row + h - 1, '\u{255A}', BORDER_COLOR, Some(BG_COLOR), false);
        grid.set_full(col + w - 1, row + h - 1, '\u{255D}', BORDER_COLOR, Some(BG_COLOR), false);
        for c in (col + 1)..(col + w - 1) {
            grid.set_full(c, row, '\u{2550}', BORDER_COLOR, Some(BG_COLOR), false);
            grid.set_full(c, row + h - 1, '\u{2550}', BORDER_COLOR, Some(BG_COLOR), false);
        }
        for r in (row + 1)..(row + h - 1) {
            grid.set_full(col, r, '\u{2551}', BORDER_COLOR, Some(BG_COLOR), false);
            grid.set_full(col + w - 1, r, '\u{2551}', BORDER_COLOR, Some(BG_COLOR), false);
        }
    }

    /// Draw a reading line, highlighting $TOKEN mentions and signed
    /// percentages in place.
    fn draw_colored_line(grid: &mut Grid, start_col: i32, row: i32, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let mut col = start_col;
        let mut i = 0;

        while i < chars.len() {
            // $TOKEN
            if chars[i] == '$' && i + 1 < chars.len() && chars[i + 1].is_ascii_alphabetic() {
                let mut end = i + 1;
                while end < chars.len()
                    && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                {
                    end += 1;
                }
                let token: String = chars[i..end].iter().collect();
                grid.draw_text_bg(col, row, &token, TOKEN_COLOR, BG_COLOR);
                col += (end - i) as i32;
                i = end;
                continue;
            }

            // +XX% / -XX%
            if (chars[i] == '+' || chars[i] == '-')
                && i + 1 < chars.len()
                && chars[i + 1].is_ascii_digit()
            {
                let mut end = i + 1;
                while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
                    end += 1;
                }
                if end < chars.len() && chars[end] == '%' {
                    end += 1;
                }
                let num: String = chars[i..end].iter().collect();
                let color = if chars[i] == '+' { GREEN } else { RED };
                grid.draw_text_bg(col, row, &num, color, BG_COLOR);
                col += (end - i) as i32;
                i = end;
                continue;
            }

            grid.set_full(col, row, chars[i], BODY_COLOR, Some(BG_COLOR), false);
            col += 1;
            i += 1;
        }
    }
}

impl Default for OracleOverlayLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for OracleOverlayLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let oracle = state.oracle;
        if !oracle.visible {
            return;
        }

        let panel_h = if oracle.loading {
            7
        } else {
            Self::panel_height(oracle.reading.as_deref().unwrap_or("")).min(22)
        };
        let start_col = (state.cols - PANEL_WIDTH) / 2;
        let start_row = (state.rows - panel_h) / 2;
        if start_col < 0 || start_row < 0 {
            return;
        }

        for r in start_row..(start_row + panel_h).min(state.rows) {
            for c in start_col..(start_col + PANEL_WIDTH).min(state.cols) {
                grid.set_full(c, r, ' ', BG_COLOR, Some(BG_COLOR), false);
            }
        }
        Self::draw_border(grid, start_col, start_row, PANEL_WIDTH, panel_h);

        let title = " TRENCH ORACLE ";
        let title_col = start_col + (PANEL_WIDTH - title.chars().count() as i32) / 2;
        grid.draw_text_bg(title_col, start_row, title, TITLE_COLOR, BG_COLOR);

        for c in (start_col + 1)..(start_col + PANEL_WIDTH - 1) {
            grid.set_full(c, start_row + 1, '\u{2500}', BORDER_COLOR, Some(BG_COLOR), false);
        }

        if oracle.loading {
            let dots = ".".repeat(((tick / 15) % 3 + 1) as usize);
            let load_text = format!("Oracle is reading the trenches{}", dots);
            let load_col = start_col + (PANEL_WIDTH - load_text.chars().count() as i32) / 2;
            grid.draw_text_bg(load_col, start_row + 3, &load_text, LOADING_COLOR, BG_COLOR);
            return;
        }

        let reading = match &oracle.reading {
            Some(r) => r,
            None => return,
        };

        let wrapped = word_wrap(reading, CONTENT_WIDTH as usize);
        let max_lines = (panel_h - 5).max(0) as usize;
        for (i, line) in wrapped.iter().take(max_lines).enumerate() {
            let row = start_row + 2 + i as i32;
            if row >= state.rows {
                break;
            }
            Self::draw_colored_line(grid, start_col + 2, row, line);
        }

        let footer_sep_row = start_row + panel_h - 2;
        for c in (start_col + 1)..(start_col + PANEL_WIDTH - 1) {
            grid.set_full(c, footer_sep_row, '\u{2500}', BORDER_COLOR, Some(BG_COLOR), false);
        }

        let footer_row = start_row + panel_h - 1;
        grid.draw_text_bg(start_col + 2, footer_row, "[I] dismiss", HINT_COLOR, BG_COLOR);

        if let Some(t) = state.trench {
            let summary = format!("{:.0}% buys {}", t.market.buy_ratio, state.weather.short());
            grid.draw_text_bg(
                start_col + PANEL_WIDTH - summary.chars().count() as i32 - 2,
                footer_row,
                &summary,
                HINT_COLOR,
                BG_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = word_wrap("one two three four five six seven eight nine ten", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12, "line too long: {:?}", line);
        }
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        let lines = word_wrap("para one\n\npara two", 40);
        assert_eq!(lines, vec!["para one".to_string(), String::new(), "para two".to_string()]);
    }

    #[test]
    fn wrap_long_word_gets_own_line() {
        let lines = word_wrap("a superduperextralongword b", 10);
        assert!(lines.iter().any(|l| l == "superduperextralongword"));
    }
}

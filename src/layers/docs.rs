/// Static help overlay: what the scene encodes and which keys do what.

use crossterm::style::Color;

use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const BORDER_COLOR: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };
const TITLE_COLOR: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const BODY_COLOR: Color = Color::Rgb { r: 0xa1, g: 0xa1, b: 0xaa };
const HIGHLIGHT: Color = Color::Rgb { r: 0xfb, g: 0xbf, b: 0x24 };
const KEY_COLOR: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const BG_COLOR: Color = Color::Rgb { r: 0x0a, g: 0x0a, b: 0x0a };
const HINT_COLOR: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };

const PANEL_WIDTH: i32 = 55;

const DOCS_LINES: &[(&str, u8)] = &[
    ("TRENCH FORECAST", 1),
    ("", 0),
    ("Real-time ASCII visualization of the Solana", 0),
    ("memecoin trenches, rendered as a living townscape.", 0),
    ("", 0),
    ("HOW IT WORKS", 1),
    ("", 0),
    ("Buildings = top tokens by 24h volume.", 0),
    ("Height = market cap. Lit windows = buy ratio.", 0),
    ("Weather = overall market sentiment:", 0),
    ("  CLEAR = heavy buying, RAIN = selling,", 0),
    ("  SNOW = dead market (low volume).", 0),
    ("", 0),
    ("CONTROLS", 1),
    ("", 0),
    ("[W] Cycle weather     [A] Auto/Manual", 2),
    ("[\u{2190}][\u{2192}] Select token   [ESC] Close", 2),
    ("[I] Oracle Intel      [?] This panel", 2),
    ("[D] Data feed         [Q] Quit", 2),
    ("", 0),
    ("DATA", 1),
    ("", 0),
    ("Poll interval: 30s. Trend snapshots: 15min.", 0),
    ("Sparkline: 1h buy ratio history.", 0),
];

fn line_color(kind: u8) -> Color {
    match kind {
        1 => HIGHLIGHT,
        2 => KEY_COLOR,
        _ => BODY_COLOR,
    }
}

pub struct DocsOverlayLayer;

impl DocsOverlayLayer {
    pub fn new() -> Self {
        DocsOverlayLayer
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
}

impl Default for DocsOverlayLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for DocsOverlayLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        if !state.docs_visible {
            return;
        }

        let panel_h = (DOCS_LINES.len() as i32 + 5).min(state.rows - 2);
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

        let title = " TRENCH FORECAST DOCS ";
        let title_col = start_col + (PANEL_WIDTH - title.chars().count() as i32) / 2;
        grid.draw_text_bg(title_col, start_row, title, TITLE_COLOR, BG_COLOR);

        for c in (start_col + 1)..(start_col + PANEL_WIDTH - 1) {
            grid.set_full(c, start_row + 1, '\u{2500}', BORDER_COLOR, Some(BG_COLOR), false);
        }

        let max_lines = (panel_h - 5).max(0) as usize;
        for (i, (text, kind)) in DOCS_LINES.iter().take(max_lines).enumerate() {
            let row = start_row + 2 + i as i32;
            if row >= state.rows {
                break;
            }
            grid.draw_text_bg(start_col + 2, row, text, line_color(*kind), BG_COLOR);
        }

        let footer_sep_row = start_row + panel_h - 2;
        for c in (start_col + 1)..(start_col + PANEL_WIDTH - 1) {
            grid.set_full(c, footer_sep_row, '\u{2500}', BORDER_COLOR, Some(BG_COLOR), false);
        }

        let footer_row = start_row + panel_h - 1;
        grid.draw_text_bg(start_col + 2, footer_row, "[?] dismiss", HINT_COLOR, BG_COLOR);
        let version = concat!("v", env!("CARGO_PKG_VERSION"));
        grid.draw_text_bg(
            start_col + PANEL_WIDTH - version.len() as i32 - 2,
            footer_row,
            version,
            HINT_COLOR,
            BG_COLOR,
        );
    }
}

/// Token detail card, shown above the selected building with a highlight
/// bar across its footprint. Positions come from the buildings layer via
/// the shared slot.

use crossterm::style::Color;

use crate::domain::market::{format_pct, Runner};
use crate::sim::scene::{BuildingSlot, Layer, SceneState};
use crate::ui::grid::Grid;

const BORDER_COLOR: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };
const TITLE_COLOR: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const LABEL_DIM: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const VALUE_BRIGHT: Color = TITLE_COLOR;
const GREEN: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const RED: Color = Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 };
const BG_COLOR: Color = Color::Rgb { r: 0x0a, g: 0x0a, b: 0x0a };
const HIGHLIGHT_COLOR: Color = Color::Rgb { r: 0xfb, g: 0xbf, b: 0x24 };

const DETAIL_WIDTH: i32 = 27;
const DETAIL_HEIGHT: i32 = 10;

fn format_val(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("${:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("${:.1}K", v / 1_000.0)
    } else {
        format!("${:.0}", v)
    }
}

pub struct TokenDetailLayer {
    slot: BuildingSlot,
}

impl TokenDetailLayer {
    pub fn new(slot: BuildingSlot) -> Self {
        TokenDetailLayer { slot }
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

impl Layer for TokenDetailLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        let selected = match state.selected_building {
            Some(i) => i,
            None => return,
        };
        let runners = match state.trench {
            Some(t) if !t.runners.is_empty() => &t.runners,
            _ => return,
        };

        // Same display order as the buildings layer: by 24h volume.
        let mut sorted: Vec<&Runner> = runners.iter().collect();
        sorted.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));
        sorted.truncate(10);
        let runner = match sorted.get(selected) {
            Some(r) => *r,
            None => return,
        };

        let pos = match self.slot.borrow().get(selected) {
            Some(p) => *p,
            None => return,
        };

        // Panel centered over the building, clamped to the screen.
        let panel_col = (pos.col + pos.width / 2 - DETAIL_WIDTH / 2)
            .min(state.cols - DETAIL_WIDTH - 1)
            .max(1);
        let panel_row = (state.street_row - 30).max(1);

        // Highlight bar across the building footprint.
        let highlight_row = state.street_row - 1;
        for c in pos.col..(pos.col + pos.width).min(state.cols) {
            grid.set(c, highlight_row, '\u{2580}', HIGHLIGHT_COLOR);
        }

        for r in panel_row..(panel_row + DETAIL_HEIGHT).min(state.rows) {
            for c in panel_col..(panel_col + DETAIL_WIDTH).min(state.cols) {
                grid.set_full(c, r, ' ', BG_COLOR, Some(BG_COLOR), false);
            }
        }
        Self::draw_border(grid, panel_col, panel_row, DETAIL_WIDTH, DETAIL_HEIGHT);

        let title = format!(" ${} ", runner.symbol);
        grid.draw_text_bg(panel_col + 1, panel_row, &title, TITLE_COLOR, BG_COLOR);

        let mut row = panel_row + 1;
        let l_col = panel_col + 2;
        let v_col = panel_col + 12;

        grid.draw_text_bg(l_col, row, "MC:", LABEL_DIM, BG_COLOR);
        grid.draw_text_bg(v_col, row, &format_val(runner.cap()), VALUE_BRIGHT, BG_COLOR);
        row += 1;

        grid.draw_text_bg(l_col, row, "Vol 1h:", LABEL_DIM, BG_COLOR);
        grid.draw_text_bg(v_col, row, &format_val(runner.volume_1h), VALUE_BRIGHT, BG_COLOR);
        row += 1;

        grid.draw_text_bg(l_col, row, "Vol 5m:", LABEL_DIM, BG_COLOR);
        grid.draw_text_bg(v_col, row, &format_val(runner.volume_5m), VALUE_BRIGHT, BG_COLOR);
        row += 1;

        grid.draw_text_bg(l_col, row, "B/S:", LABEL_DIM, BG_COLOR);
        let bs = format!("{}/{}", runner.buys_1h, runner.sells_1h);
        grid.draw_text_bg(v_col, row, &bs, VALUE_BRIGHT, BG_COLOR);
        row += 1;

        grid.draw_text_bg(l_col, row, "Age:", LABEL_DIM, BG_COLOR);
        let age = if runner.age.is_empty() { "\u{2014}" } else { runner.age.as_str() };
        grid.draw_text_bg(v_col, row, age, VALUE_BRIGHT, BG_COLOR);
        row += 1;

        grid.draw_text_bg(l_col, row, "1h:", LABEL_DIM, BG_COLOR);
        let pct = runner.pct_change_1h;
        grid.draw_text_bg(
            v_col,
            row,
            &format_pct(pct),
            if pct >= 0.0 { GREEN } else { RED },
            BG_COLOR,
        );
        row += 1;

        grid.draw_text_bg(l_col, row, "Grad:", LABEL_DIM, BG_COLOR);
        let (grad, grad_color) = if runner.is_graduated {
            ("Yes", GREEN)
        } else {
            ("No", LABEL_DIM)
        };
        grid.draw_text_bg(v_col, row, grad, grad_color, BG_COLOR);

        grid.draw_text_bg(
            panel_col + 1,
            panel_row + DETAIL_HEIGHT - 1,
            " [\u{2190}][\u{2192}] nav [ESC] close ",
            LABEL_DIM,
            BG_COLOR,
        );
    }
}

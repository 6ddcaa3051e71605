/// Right-side hot tokens panel with BTC/SOL reference prices below.
/// Hidden entirely on narrow viewports.

use crossterm::style::Color;

use crate::domain::market::{format_pct, format_price, format_usd_short};
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const TITLE_COLOR: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const SYMBOL_COLOR: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const GREEN: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const RED: Color = Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 };
const VOL_COLOR: Color = Color::Rgb { r: 0xa1, g: 0xa1, b: 0xaa };
const LABEL_DIM: Color = TITLE_COLOR;
const VALUE_BRIGHT: Color = SYMBOL_COLOR;

const PANEL_WIDTH: i32 = 32;
const MIN_COLS: i32 = 140;

pub struct HotTokensPanelLayer;

impl HotTokensPanelLayer {
    pub fn new() -> Self {
        HotTokensPanelLayer
    }
}

impl Default for HotTokensPanelLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for HotTokensPanelLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        if state.cols < MIN_COLS {
            return;
        }

        let tokens = match state.trench {
            Some(t) if !t.hot_tokens.is_empty() => &t.hot_tokens,
            _ => return,
        };

        let start_col = state.cols - PANEL_WIDTH - 2;
        let start_row = 2;

        let title = "\u{2500}\u{2500} HOT TOKENS \u{2500}\u{2500}";
        grid.draw_text(
            start_col + (PANEL_WIDTH - title.chars().count() as i32) / 2,
            start_row,
            title,
            TITLE_COLOR,
        );

        let max_tokens = tokens.len().min(10);
        for (i, t) in tokens.iter().take(max_tokens).enumerate() {
            let row = start_row + 1 + i as i32;
            let positive = t.pct_change_1h >= 0.0;
            let pct_color = if positive { GREEN } else { RED };

            let sym: String = format!("${}", t.symbol).chars().take(10).collect();
            grid.draw_text(start_col, row, &sym, SYMBOL_COLOR);

            let pct = format!("{:>6}", format!("{}{:.0}%", if positive { "+" } else { "" }, t.pct_change_1h));
            grid.draw_text(start_col + 11, row, &pct, pct_color);

            let vol = format!("{} vol", format_usd_short(t.volume_1h));
            grid.draw_text(start_col + 18, row, &vol, VOL_COLOR);

            let arrow = if positive { '\u{25B2}' } else { '\u{25BC}' };
            grid.set(start_col + PANEL_WIDTH - 2, row, arrow, pct_color);
        }

        // BTC / SOL reference block with a blank row of spacing.
        let prices = match state.trench.and_then(|t| t.prices) {
            Some(p) if p.btc_usd > 0.0 || p.sol_usd > 0.0 => p,
            _ => return,
        };
        let mut price_row = start_row + 1 + max_tokens as i32 + 1;

        let btc = format!("BTC {}", format_price(prices.btc_usd));
        let btc_pct = format_pct(prices.btc_change_24h);
        grid.draw_text(start_col, price_row, &btc, VALUE_BRIGHT);
        grid.draw_text(
            start_col + btc.chars().count() as i32 + 1,
            price_row,
            &btc_pct,
            if prices.btc_change_24h >= 0.0 { GREEN } else { RED },
        );
        price_row += 1;

        let sol = format!("SOL {}", format_price(prices.sol_usd));
        let sol_pct = format_pct(prices.sol_change_24h);
        grid.draw_text(start_col, price_row, &sol, VALUE_BRIGHT);
        grid.draw_text(
            start_col + sol.chars().count() as i32 + 1,
            price_row,
            &sol_pct,
            if prices.sol_change_24h >= 0.0 { GREEN } else { RED },
        );
        price_row += 1;

        grid.draw_text(start_col, price_row, "Bond grad: ~$33.8K", LABEL_DIM);
    }
}

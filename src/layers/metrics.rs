/// Top-left metrics panel: weather icon, market readouts, buy-ratio
/// sparkline, the flashing TRENCH NEWS monitor, key hints, and the
/// trend-history columns. Stateless: everything derives from the
/// snapshot; only the flash timing uses the tick.

use crossterm::style::Color;

use crate::domain::market::{format_count, format_usd_short, now_ms};
use crate::domain::weather::Weather;
use crate::sim::scene::{Layer, SceneState, WeatherMode};
use crate::ui::grid::Grid;

// ── Weather icons ──

const ICON_CLEAR: &[&str] = &[
    r#"  \   |   /  "#,
    r#" --  .---.  --"#,
    r#"    | o   |   "#,
    r#" --  '---'  --"#,
    r#"  /   |   \  "#,
];

const ICON_PARTLY_CLOUDY: &[&str] = &[
    r#" -  (   .   ) - "#,
    r#" - ( .   . ) -  "#,
    r#" -  ( .  . ) -  "#,
    r#"     ---------  "#,
];

const ICON_OVERCAST: &[&str] = &[
    r#"  .---(-----)--.  "#,
    r#" (  (  .  .  )  ) "#,
    r#"  `--(-------)--' "#,
];

const ICON_RAIN: &[&str] = &[
    r#"   (  .---.  )  "#,
    r#"   ( .  .  . )  "#,
    r#"    ---------   "#,
    r#"    / /  / /    "#,
    r#"   / /  / /     "#,
];

const ICON_THUNDERSTORM: &[&str] = &[
    r#"   (  .---.  )  "#,
    r#"   ( .  .  . )  "#,
    r#"    ---------   "#,
    r#"    / /_/ / /   "#,
    r#"   / / /_/ /    "#,
    r#"      /\        "#,
];

const ICON_SNOW: &[&str] = &[
    r#"   (  .---.  )  "#,
    r#"   ( .  .  . )  "#,
    r#"    ---------   "#,
    r#"    *  .  *     "#,
    r#"   .  *  .  *   "#,
];

fn weather_icon(w: Weather) -> &'static [&'static str] {
    match w {
        Weather::Clear => ICON_CLEAR,
        Weather::PartlyCloudy => ICON_PARTLY_CLOUDY,
        Weather::Overcast => ICON_OVERCAST,
        Weather::Rain => ICON_RAIN,
        Weather::Thunderstorm => ICON_THUNDERSTORM,
        Weather::Snow => ICON_SNOW,
    }
}

// ── Colors ──

const PANEL_TEXT: Color = Color::Rgb { r: 0xa1, g: 0xa1, b: 0xaa };
const LABEL_DIM: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const VALUE_BRIGHT: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const SEPARATOR_COLOR: Color = Color::Rgb { r: 0x3f, g: 0x3f, b: 0x46 };
const GREEN: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const AMBER: Color = Color::Rgb { r: 0xfb, g: 0xbf, b: 0x24 };
const RED: Color = Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 };
const TREND_DIM: Color = LABEL_DIM;
const TREND_CURRENT: Color = PANEL_TEXT;
const TV_COLOR: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };
const TV_FLASH: Color = AMBER;

const TV_ICON: &[&str] = &[
    ".----------.",
    "|  TRENCH  |",
    "|   NEWS   |",
    "'----------'",
];

const SPARK_CHARS: [char; 8] = ['\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

fn sentiment_color(ratio: f32) -> Color {
    if ratio > 60.0 {
        GREEN
    } else if ratio >= 45.0 {
        AMBER
    } else {
        RED
    }
}

fn time_ago(delta_ms: u64) -> String {
    let mins = delta_ms / 60_000;
    if mins == 0 {
        "Now".to_string()
    } else {
        format!("{}m ago", mins)
    }
}

pub struct MetricsPanelLayer;

impl MetricsPanelLayer {
    pub fn new() -> Self {
        MetricsPanelLayer
    }

    fn draw_oracle_tv(&self, grid: &mut Grid, col: i32, row: i32, tick: u64) {
        // Flash the screen text every ~1.5 seconds.
        let flash_on = (tick / 22) % 3 != 0;

        for (r, line) in TV_ICON.iter().enumerate() {
            for (i, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    grid.set(col + i as i32, row + r as i32, ch, TV_COLOR);
                }
            }
        }
        if flash_on {
            grid.draw_text(col + 2, row + 1, " TRENCH ", TV_FLASH);
            grid.draw_text(col + 2, row + 2, "  NEWS  ", TV_FLASH);
        }

        grid.draw_text(col, row + TV_ICON.len() as i32, "[I] Intel", LABEL_DIM);
    }

    fn draw_no_data_panel(&self, grid: &mut Grid, state: &SceneState, col: i32, row: i32, tick: u64) {
        let icon = weather_icon(state.weather);
        grid.draw_art(col, row, icon, PANEL_TEXT);

        let icon_width = icon.iter().map(|l| l.chars().count() as i32).max().unwrap_or(0);
        let metrics_col = col + icon_width + 2;
        let mode_tag = match state.weather_mode {
            WeatherMode::Manual => " [MANUAL]",
            WeatherMode::Auto => " [AUTO]",
        };
        let header = format!("Trenches: {}{}", state.weather.abbrev(), mode_tag);
        grid.draw_text(metrics_col, row, &header, VALUE_BRIGHT);
        grid.draw_text(metrics_col, row + 1, "[W] cycle weather", LABEL_DIM);
        grid.draw_text(metrics_col, row + 2, "[A] toggle auto/manual", LABEL_DIM);
        grid.draw_text(metrics_col, row + 3, "[D] toggle data", LABEL_DIM);
        grid.draw_text(metrics_col, row + 4, "[\u{2190}][\u{2192}] Select token  [ESC] Close", LABEL_DIM);

        self.draw_oracle_tv(grid, col, row + icon.len() as i32 + 2, tick);
    }
}

impl Default for MetricsPanelLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for MetricsPanelLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let start_col = 2;
        let start_row = 2;

        let market = match state.trench {
            Some(t) => &t.market,
            None => {
                self.draw_no_data_panel(grid, state, start_col, start_row, tick);
                return;
            }
        };

        // Weather icon with the metrics to its right.
        let icon = weather_icon(state.weather);
        grid.draw_art(start_col, start_row, icon, PANEL_TEXT);
        let icon_width = icon.iter().map(|l| l.chars().count() as i32).max().unwrap_or(0);

        let metrics_col = start_col + icon_width + 2;
        let mut row = start_row;

        let mode_tag = match state.weather_mode {
            WeatherMode::Manual => " [MANUAL]",
            WeatherMode::Auto => " [AUTO]",
        };
        grid.draw_text(metrics_col, row, "Trenches: ", LABEL_DIM);
        let abbrev = state.weather.abbrev();
        grid.draw_text(metrics_col + 10, row, abbrev, VALUE_BRIGHT);
        grid.draw_text(metrics_col + 10 + abbrev.chars().count() as i32, row, mode_tag, LABEL_DIM);
        row += 1;

        grid.draw_text(metrics_col, row, "Sentiment: ", LABEL_DIM);
        let sent = format!("{:.0}% buys", market.buy_ratio);
        grid.draw_text(metrics_col + 11, row, &sent, sentiment_color(market.buy_ratio));
        row += 1;

        grid.draw_text(metrics_col, row, "Vol/5m:    ", LABEL_DIM);
        grid.draw_text(metrics_col + 11, row, &format_usd_short(market.total_volume_5m), VALUE_BRIGHT);
        row += 1;

        grid.draw_text(metrics_col, row, "Vol/1h:    ", LABEL_DIM);
        grid.draw_text(metrics_col + 11, row, &format_usd_short(market.total_volume_1h), VALUE_BRIGHT);
        row += 1;

        grid.draw_text(metrics_col, row, "Launched:  ", LABEL_DIM);
        let launched = market
            .launched_today
            .map(format_count)
            .unwrap_or_else(|| "\u{2014}".to_string());
        grid.draw_text(metrics_col + 11, row, &launched, VALUE_BRIGHT);
        row += 1;

        grid.draw_text(metrics_col, row, "Graduated: ", LABEL_DIM);
        let graduated = market
            .graduated_today
            .map(format_count)
            .unwrap_or_else(|| "\u{2014}".to_string());
        grid.draw_text(metrics_col + 11, row, &graduated, VALUE_BRIGHT);
        row += 1;

        grid.draw_text(metrics_col, row, "Grad rate: ", LABEL_DIM);
        match market.grad_rate {
            Some(rate) => {
                let color = if rate >= 3.0 {
                    GREEN
                } else if rate >= 1.5 {
                    AMBER
                } else {
                    RED
                };
                grid.draw_text(metrics_col + 11, row, &format!("{:.1}%", rate), color);
            }
            None => grid.draw_text(metrics_col + 11, row, "\u{2014}", LABEL_DIM),
        }
        row += 1;

        // Buy-ratio sparkline over the last hour.
        if state.sparkline.len() >= 2 {
            row += 1;
            let min = state.sparkline.iter().cloned().fold(f32::INFINITY, f32::min);
            let max = state.sparkline.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let range = if max - min > 0.0 { max - min } else { 1.0 };
            let spark: String = state
                .sparkline
                .iter()
                .map(|v| SPARK_CHARS[(((v - min) / range) * 7.0) as usize])
                .collect();

            let first = state.sparkline[0];
            let last = state.sparkline[state.sparkline.len() - 1];
            let color = if last > first + 2.0 {
                GREEN
            } else if last < first - 2.0 {
                RED
            } else {
                AMBER
            };
            grid.draw_text(metrics_col, row, "1h trend:  ", LABEL_DIM);
            grid.draw_text(metrics_col + 11, row, &spark, color);
            row += 1;
        }

        // Separator.
        let sep_row = (start_row + icon.len() as i32).max(row) + 1;
        for c in start_col..(start_col + 48).min(state.cols) {
            grid.set(c, sep_row, '\u{2500}', SEPARATOR_COLOR);
        }

        // Bottom section: TV + hints on the left, trend columns right.
        let bottom_row = sep_row + 1;
        self.draw_oracle_tv(grid, start_col, bottom_row, tick);
        let hint_row = bottom_row + TV_ICON.len() as i32 + 1;
        grid.draw_text(start_col, hint_row, "[W] Weather", LABEL_DIM);
        grid.draw_text(start_col, hint_row + 1, "[A] Auto/Manual", LABEL_DIM);
        grid.draw_text(start_col, hint_row + 2, "[\u{2190}][\u{2192}] Tokens", LABEL_DIM);
        grid.draw_text(start_col, hint_row + 3, "[ESC] Close", LABEL_DIM);

        let trend_start_col = start_col + 14;
        let col_width = 10;

        if !state.trend_history.is_empty() {
            let start = state.trend_history.len().saturating_sub(4);
            let trend = &state.trend_history[start..];
            let now = now_ms();

            for (s, snap) in trend.iter().enumerate() {
                let col = trend_start_col + s as i32 * col_width;
                if col + col_width > state.cols {
                    break;
                }
                let is_current = s == trend.len() - 1;
                let color = if is_current { TREND_CURRENT } else { TREND_DIM };

                let ago = if is_current {
                    "Now".to_string()
                } else {
                    time_ago(now.saturating_sub(snap.timestamp_ms))
                };
                grid.draw_text(col, bottom_row, &ago, color);
                grid.draw_text(col, bottom_row + 1, snap.weather.abbrev(), color);
                grid.draw_text(
                    col,
                    bottom_row + 2,
                    &format!("{:.0}%", snap.buy_ratio),
                    sentiment_color(snap.buy_ratio),
                );
                grid.draw_text(col, bottom_row + 3, &format_usd_short(snap.volume_5m), color);
            }
        }
    }
}

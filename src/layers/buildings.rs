/// The token skyline. One building per top-volume runner: style tier by
/// market-cap rank, flickering windows weighted by buy pressure, a crane
/// over new tokens, a sinking collapse for rugged ones, chimney smoke for
/// strong gainers, and labels over every roof.

use crossterm::style::Color;

use crate::art::buildings::{ranked_styles, style_for_mcap_rank, BuildingStyle};
use crate::domain::market::{format_mcap, format_pct, Runner};
use crate::domain::weather::Weather;
use crate::layers::gray;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{BuildingPos, BuildingSlot, Layer, SceneState};
use crate::ui::grid::Grid;

const WINDOW_LIT: Color = Color::Rgb { r: 0xDD, g: 0xAA, b: 0x33 };
const WINDOW_DIM: Color = Color::Rgb { r: 0x33, g: 0x33, b: 0x33 };
const WINDOW_BROKEN: Color = Color::Rgb { r: 0x11, g: 0x11, b: 0x11 };
const BUILDING_FG: Color = Color::Rgb { r: 0x55, g: 0x55, b: 0x66 };
const LABEL_WHITE: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const LABEL_GREEN: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const LABEL_RED: Color = Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 };
const LABEL_DIM: Color = Color::Rgb { r: 0xa1, g: 0xa1, b: 0xaa };
const CRANE_COLOR: Color = Color::Rgb { r: 0xAA, g: 0x88, b: 0x55 };
const ANTENNA_COLOR: Color = Color::Rgb { r: 0xef, g: 0x44, b: 0x44 };

const SMOKE_CHARS: [char; 4] = ['.', '~', '\'', '`'];
const CRANE_FRAMES: [&str; 3] = [" _/|    ", " _/--   ", " _/|    "];
const MAX_BUILDINGS: usize = 10;

struct BuildingInstance {
    runner: Runner,
    style: &'static BuildingStyle,
    col: i32,
    /// Display rank = volume order, 0 is busiest.
    rank: usize,
    /// Window flicker state: true = logically lit.
    window_lit: Vec<bool>,
    /// Ticks until each window toggles.
    window_timers: Vec<i32>,
    /// Rows sunk into the ground (rugged tokens).
    sink_offset: i32,
    crane_frame: usize,
}

struct Smoke {
    x: f32,
    y: f32,
    life: i32,
    ch: char,
}

pub struct BuildingsLayer {
    buildings: Vec<BuildingInstance>,
    last_runner_key: String,
    smoke: Vec<Smoke>,
    slot: BuildingSlot,
    rng: SceneRng,
    rebuilds: u32,
}

impl BuildingsLayer {
    pub fn new(slot: BuildingSlot, rng: SceneRng) -> Self {
        BuildingsLayer {
            buildings: Vec::new(),
            last_runner_key: String::new(),
            smoke: Vec::new(),
            slot,
            rng,
            rebuilds: 0,
        }
    }

    /// How many times the skyline has been laid out from scratch.
    pub fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }

    /// Styles currently assigned, in display (volume) order.
    pub fn assigned_styles(&self) -> Vec<&'static BuildingStyle> {
        self.buildings.iter().map(|b| b.style).collect()
    }

    /// Full relayout. Only runs when the displayed symbol set changes.
    fn rebuild(&mut self, runners: &[Runner], cols: i32) {
        let mut sorted: Vec<Runner> = runners.to_vec();
        sorted.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));
        sorted.truncate(MAX_BUILDINGS);
        let count = sorted.len();

        // Independent mcap ranking over the same set decides heights.
        let mut by_cap: Vec<usize> = (0..count).collect();
        by_cap.sort_by(|&a, &b| sorted[b].cap().total_cmp(&sorted[a].cap()));
        let mut cap_rank = vec![count.saturating_sub(1); count];
        for (rank, &idx) in by_cap.iter().enumerate() {
            cap_rank[idx] = rank;
        }

        let styles: Vec<&'static BuildingStyle> = sorted
            .iter()
            .enumerate()
            .map(|(i, r)| style_for_mcap_rank(cap_rank[i], r.is_new))
            .collect();

        let gap = 1;
        let total_width: i32 = styles.iter().map(|s| s.width).sum::<i32>()
            + gap * count.saturating_sub(1) as i32;

        let mut cur_x = ((cols - total_width) / 2).max(1);
        if total_width > cols - 4 {
            cur_x = 2;
        }

        self.buildings = sorted
            .into_iter()
            .enumerate()
            .map(|(i, runner)| {
                let style = styles[i];
                let col = cur_x;
                cur_x += style.width + gap;

                let buy_ratio = runner.buys_1h as f32
                    / (runner.buys_1h + runner.sells_1h).max(1) as f32;
                let window_lit = style
                    .windows
                    .iter()
                    .map(|_| self.rng.chance(buy_ratio))
                    .collect();
                let window_timers = style
                    .windows
                    .iter()
                    .map(|_| 40 + self.rng.range_i32(0, 80))
                    .collect();

                BuildingInstance {
                    runner,
                    style,
                    col: col.min(cols - style.width).max(0),
                    rank: i,
                    window_lit,
                    window_timers,
                    sink_offset: 0,
                    crane_frame: 0,
                }
            })
            .collect();

        self.rebuilds += 1;
        *self.slot.borrow_mut() = self
            .buildings
            .iter()
            .map(|b| BuildingPos { col: b.col, width: b.style.width })
            .collect();
    }
}

impl Layer for BuildingsLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let runners: &[Runner] = state.trench.map(|t| t.runners.as_slice()).unwrap_or(&[]);

        // Cheap identity check: relayout only when the symbol set changes.
        let key = runners
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>()
            .join(",");
        if key != self.last_runner_key {
            self.rebuild(runners, state.cols);
            self.last_runner_key = key;
        }

        if self.buildings.is_empty() && state.trench.is_none() {
            self.draw_demo(grid, state, tick);
            return;
        }

        let street_row = state.street_row;

        for bi in 0..self.buildings.len() {
            let base_y = street_row - self.buildings[bi].style.height;

            // Rugged tokens sink one row every 15 ticks, then vanish.
            if self.buildings[bi].runner.is_rugged {
                if tick % 15 == 0 {
                    self.buildings[bi].sink_offset += 1;
                }
                if self.buildings[bi].sink_offset > self.buildings[bi].style.height + 2 {
                    continue;
                }
            }

            let y = base_y + self.buildings[bi].sink_offset;
            let b = &self.buildings[bi];
            grid.draw_art(b.col, y, &b.style.art, BUILDING_FG);

            self.draw_windows(grid, bi, y, state.window_brightness);
            let b = &mut self.buildings[bi];

            // Construction crane over new tokens.
            if b.runner.is_new && !b.runner.is_rugged {
                if tick % 20 == 0 {
                    b.crane_frame = (b.crane_frame + 1) % CRANE_FRAMES.len();
                }
                grid.draw_text(b.col, y, CRANE_FRAMES[b.crane_frame], CRANE_COLOR);
            }

            // Chimney smoke for strong 1h gainers in fair weather.
            let b = &self.buildings[bi];
            if b.runner.pct_change_1h > 100.0
                && !b.runner.is_rugged
                && matches!(state.weather, Weather::Clear | Weather::PartlyCloudy)
                && tick % 8 == 0
            {
                let cx = b.col + b.style.width / 2;
                self.smoke.push(Smoke {
                    x: cx as f32 + self.rng.range_f32(-1.0, 1.0),
                    y: (y - 1) as f32,
                    life: 20 + self.rng.range_i32(0, 15),
                    ch: *self.rng.pick(&SMOKE_CHARS),
                });
            }

            // Labels above the roof, skipped for rugged buildings.
            let b = &self.buildings[bi];
            if !b.runner.is_rugged {
                let symbol = format!("${}", b.runner.symbol);
                let pct_val = b.runner.pct_change_1h;
                let pct_str = format_pct(pct_val);
                let mcap_str = format_mcap(b.runner.cap());
                let center_col = b.col + b.style.width / 2;

                let label_row1 = y - 2;
                if label_row1 > 0 {
                    let sym_col = center_col - symbol.chars().count() as i32 / 2;
                    grid.draw_text(sym_col, label_row1, &symbol, LABEL_WHITE);
                }

                let label_row2 = y - 1;
                if label_row2 > 0 {
                    let pct_color = if pct_val >= 0.0 { LABEL_GREEN } else { LABEL_RED };
                    let line2_len = (pct_str.chars().count() + 2 + mcap_str.chars().count()) as i32;
                    let line2_col = center_col - line2_len / 2;
                    grid.draw_text(line2_col, label_row2, &pct_str, pct_color);
                    grid.draw_text(
                        line2_col + pct_str.chars().count() as i32 + 2,
                        label_row2,
                        &mcap_str,
                        LABEL_DIM,
                    );
                }
            }

            // Slow-blinking antenna light on the busiest building.
            if b.rank == 0 && !b.runner.is_rugged && (tick / 60) % 2 == 0 && y >= 0 {
                grid.set(b.col + b.style.width / 2, y, '*', ANTENNA_COLOR);
            }
        }

        self.update_smoke(grid);
    }
}

impl BuildingsLayer {
    fn draw_windows(&mut self, grid: &mut Grid, bi: usize, art_y: i32, brightness: f32) {
        let b = &mut self.buildings[bi];
        for i in 0..b.style.windows.len() {
            b.window_timers[i] -= 1;
            if b.window_timers[i] <= 0 {
                b.window_lit[i] = !b.window_lit[i];
                b.window_timers[i] = 90 + self.rng.range_i32(0, 150);
            }

            let (w_col, w_row) = b.style.windows[i];
            let screen_col = b.col + w_col;
            let screen_row = art_y + w_row;

            if b.runner.is_rugged {
                grid.set(screen_col, screen_row, '.', WINDOW_BROKEN);
                continue;
            }

            // Logically lit windows can still render dark under gloomy
            // weather; re-rolled every tick against the brightness.
            let is_lit = b.window_lit[i] && self.rng.chance(brightness);
            let (ch, color) = if is_lit { ('#', WINDOW_LIT) } else { ('.', WINDOW_DIM) };
            grid.set(screen_col, screen_row, ch, color);
        }
    }

    fn update_smoke(&mut self, grid: &mut Grid) {
        for p in &mut self.smoke {
            p.y -= 0.15;
            p.x += self.rng.range_f32(-0.15, 0.15);
            p.life -= 1;

            let col = p.x.floor() as i32;
            let row = p.y.floor() as i32;
            if p.life > 0 && row > 0 && col > 0 {
                // Gray ramp fading out over the last third of life.
                let alpha = (p.life as f32 / 10.0).min(1.0);
                let shade = (0x33 as f32 + alpha * 0x22 as f32) as u8;
                grid.set(col, row, p.ch, gray(shade));
            }
        }
        self.smoke.retain(|p| p.life > 0);
    }

    /// Fixed demonstration skyline shown before any data arrives, with
    /// hash-based flicker so the idle view animates but stays stable
    /// across reloads.
    fn draw_demo(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let street_row = state.street_row;
        let styles = ranked_styles();
        let gap = 1;

        let total_width: i32 =
            styles.iter().map(|s| s.width).sum::<i32>() + gap * (styles.len() as i32 - 1);
        let mut cur_x = ((state.cols - total_width) / 2).max(1);

        let mut positions = Vec::with_capacity(styles.len());
        for style in styles {
            let y = street_row - style.height;
            grid.draw_art(cur_x, y, &style.art, BUILDING_FG);

            for &(w_col, w_row) in &style.windows {
                let screen_col = cur_x + w_col;
                let screen_row = y + w_row;
                let hash = (screen_col as i64 * 31 + screen_row as i64 * 17 + tick as i64) % 60;
                let lit = hash < 35;
                let (ch, color) = if lit { ('#', WINDOW_LIT) } else { ('.', WINDOW_DIM) };
                grid.set(screen_col, screen_row, ch, color);
            }

            positions.push(BuildingPos { col: cur_x, width: style.width });
            cur_x += style.width + gap;
        }

        // The street lays out around the demo skyline too.
        *self.slot.borrow_mut() = positions;
    }
}

/// Sky backdrop: a hash-seeded twinkling star field over the top 60% of
/// the grid, a faint city-glow horizon above the buildings, and a slow
/// satellite crossing the upper sky.

use crossterm::style::Color;

use crate::domain::weather::Weather;
use crate::layers::gray;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

struct Star {
    col: i32,
    row: i32,
    ch: char,
    /// Random offset into the twinkle cycle.
    phase: u64,
}

const STAR_CHARS: [char; 4] = ['.', '*', '+', '.'];
const DIM_COLOR: Color = gray_const(0x33);
const MID_COLOR: Color = gray_const(0x66);
const BRIGHT_COLOR: Color = gray_const(0xCC);
const TWINKLE_PERIOD: u64 = 80;

const GLOW_PATTERN: &str = "\u{b7} \u{b7} \u{b7}\u{b7} \u{b7}  \u{b7} \u{b7}\u{b7} \u{b7}";
const GLOW_COLOR: Color = gray_const(0x1a);

const SATELLITE_COLOR: Color = gray_const(0x88);
/// ~0.24 chars/sec at 30 ticks/sec.
const SATELLITE_SPEED: f32 = 0.008;

const fn gray_const(v: u8) -> Color {
    Color::Rgb { r: v, g: v, b: v }
}

pub struct StarsLayer {
    stars: Vec<Star>,
    seeded_cols: i32,
    seeded_rows: i32,
    satellite_x: f32,
    satellite_y: i32,
    satellite_pause: u32,
    rng: SceneRng,
}

impl StarsLayer {
    pub fn new(rng: SceneRng) -> Self {
        StarsLayer {
            stars: Vec::new(),
            seeded_cols: 0,
            seeded_rows: 0,
            satellite_x: -5.0,
            satellite_y: 3,
            satellite_pause: 0,
            rng,
        }
    }

    /// Deterministic pseudo-random star placement from a cell hash, so
    /// the field is stable across weather changes and reseeds.
    fn seed(&mut self, cols: i32, rows: i32) {
        self.stars.clear();
        self.seeded_cols = cols;
        self.seeded_rows = rows;

        let sky_height = (rows as f32 * 0.6) as i32;
        for r in 1..sky_height {
            for c in 0..cols {
                let hash = ((c as i64 * 7919 + r as i64 * 104729) ^ 0x5DEECE66D) & 0x7FFF_FFFF;
                if hash % 70 == 0 {
                    self.stars.push(Star {
                        col: c,
                        row: r,
                        ch: STAR_CHARS[(hash % STAR_CHARS.len() as i64) as usize],
                        phase: (hash % TWINKLE_PERIOD as i64) as u64,
                    });
                }
            }
        }

        self.satellite_x = -5.0;
        self.satellite_y = 2 + self.rng.range_i32(0, ((sky_height * 3) / 10).max(1));
    }
}

impl Layer for StarsLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        // Fully hidden in heavy weather.
        if matches!(state.weather, Weather::Overcast | Weather::Thunderstorm) {
            return;
        }

        if state.cols != self.seeded_cols || state.rows != self.seeded_rows {
            self.seed(state.cols, state.rows);
        }

        let dim_in_rain = state.weather == Weather::Rain;
        let sky_height = (state.rows as f32 * 0.6) as i32;

        for star in &self.stars {
            let cycle = (tick + star.phase) % TWINKLE_PERIOD;
            let color = if dim_in_rain {
                if cycle < 10 {
                    DIM_COLOR
                } else {
                    gray(0x22)
                }
            } else if state.weather == Weather::Snow {
                if cycle < 20 {
                    MID_COLOR
                } else {
                    DIM_COLOR
                }
            } else if cycle < 15 {
                BRIGHT_COLOR
            } else if cycle < 40 {
                MID_COLOR
            } else {
                DIM_COLOR
            };
            grid.set(star.col, star.row, star.ch, color);
        }

        // City glow horizon just above the buildings.
        let glow_row = state.street_row - 1;
        if glow_row > 0 && glow_row < state.rows {
            let pattern: Vec<char> = GLOW_PATTERN.chars().collect();
            for c in 0..state.cols {
                let ch = pattern[c as usize % pattern.len()];
                if ch != ' ' {
                    grid.set(c, glow_row, ch, GLOW_COLOR);
                }
            }
        }

        // Satellite: a patient dot with long pauses between crossings.
        if !dim_in_rain {
            if self.satellite_pause > 0 {
                self.satellite_pause -= 1;
            } else {
                self.satellite_x += SATELLITE_SPEED;
                let sx = self.satellite_x.floor() as i32;
                if sx >= 0 && sx < state.cols && self.satellite_y < sky_height {
                    grid.set(sx, self.satellite_y, '.', SATELLITE_COLOR);
                }
                if sx > state.cols + 5 {
                    self.satellite_x = -5.0;
                    self.satellite_y = 2 + self.rng.range_i32(0, ((sky_height * 3) / 10).max(1));
                    self.satellite_pause = 300;
                }
            }
        }
    }
}

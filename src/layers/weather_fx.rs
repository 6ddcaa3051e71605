/// Precipitation and lightning. Rain and snow run through two bounded
/// particle pools; the lightning is a small IDLE → FLASH → FADE machine
/// that whitens the whole sky for a few frames and draws a jagged bolt.

use crossterm::style::Color;

use crate::domain::weather::Weather;
use crate::sim::particles::{Particle, ParticleSystem};
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lightning {
    Idle,
    Flash,
    Fade,
}

const RAIN_COLOR: Color = Color::Rgb { r: 0x44, g: 0x44, b: 0x66 };
const STORM_RAIN_COLOR: Color = Color::Rgb { r: 0x66, g: 0x66, b: 0x88 };
const SNOW_BRIGHT: Color = Color::Rgb { r: 0xAA, g: 0xAA, b: 0xAA };
const SNOW_DIM: Color = Color::Rgb { r: 0x77, g: 0x77, b: 0x77 };
const FLASH_WHITE: Color = Color::Rgb { r: 0xFF, g: 0xFF, b: 0xFF };
const BOLT_COLOR: Color = Color::Rgb { r: 0xFF, g: 0xFF, b: 0xEE };

pub struct WeatherFxLayer {
    rain: ParticleSystem,
    snow: ParticleSystem,
    lightning: Lightning,
    lightning_timer: i32,
    flash_frames: i32,
    last_weather: Option<Weather>,
    rng: SceneRng,
}

impl WeatherFxLayer {
    pub fn new(rng: SceneRng) -> Self {
        WeatherFxLayer {
            rain: ParticleSystem::new(200),
            snow: ParticleSystem::new(100),
            lightning: Lightning::Idle,
            lightning_timer: 0,
            flash_frames: 0,
            last_weather: None,
            rng,
        }
    }

    fn draw_rain(&mut self, grid: &mut Grid, state: &SceneState) {
        let is_storm = state.weather == Weather::Thunderstorm;
        // Spawn rate scales with the sampled intensity band.
        let spawn_rate = ((state.particle_intensity * 10.0).round() as i32).max(1);
        let max_y = state.street_row;

        for _ in 0..spawn_rate {
            let x = self.rng.range_f32(0.0, state.cols as f32);
            self.rain.spawn(Particle::new(
                x,
                1.0,
                self.rng.range_f32(0.1, 0.4),
                self.rng.range_f32(0.5, 0.9),
                if self.rng.chance(0.5) { '/' } else { '|' },
                if is_storm { STORM_RAIN_COLOR } else { RAIN_COLOR },
                (max_y as f32 * 2.5) as u32,
            ));
        }

        self.rain.update(state.cols, state.rows);

        // Rain stops at street level.
        for p in self.rain.particles() {
            if (p.y.floor() as i32) >= max_y {
                continue;
            }
            grid.set(p.x.floor() as i32, p.y.floor() as i32, p.ch, p.fg);
        }
    }

    fn draw_snow(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        if tick % 3 == 0 {
            let count = ((state.particle_intensity * 5.0).round() as i32).max(1);
            for _ in 0..count {
                let x = self.rng.range_f32(0.0, state.cols as f32);
                self.snow.spawn(Particle::new(
                    x,
                    1.0,
                    0.0,
                    self.rng.range_f32(0.1, 0.25),
                    if self.rng.chance(0.4) { '*' } else { '.' },
                    if self.rng.chance(0.5) { SNOW_BRIGHT } else { SNOW_DIM },
                    (state.rows * 8) as u32,
                ));
            }
        }

        // Sinusoidal sideways sway.
        for p in self.snow.particles_mut() {
            p.vx = (p.y * 0.3 + tick as f32 * 0.02).sin() * 0.05;
        }

        self.snow.update(state.cols, state.rows);

        let max_y = state.street_row;
        for p in self.snow.particles() {
            if (p.y.floor() as i32) >= max_y {
                continue;
            }
            grid.set(p.x.floor() as i32, p.y.floor() as i32, p.ch, p.fg);
        }
    }

    fn draw_lightning(&mut self, grid: &mut Grid, state: &SceneState) {
        self.lightning_timer -= 1;

        if self.lightning == Lightning::Idle && self.lightning_timer <= 0 {
            self.lightning = Lightning::Flash;
            self.flash_frames = 3;
        }

        if self.lightning == Lightning::Flash {
            // Whiten everything already drawn above the street.
            for r in 0..state.street_row {
                for c in 0..state.cols {
                    if let Some(cell) = grid.get_mut(c, r) {
                        if cell.ch != ' ' {
                            cell.fg = FLASH_WHITE;
                        }
                    }
                }
            }

            // Jagged bolt wandering down the sky.
            let mut x = (state.cols as f32 * 0.2
                + self.rng.range_f32(0.0, state.cols as f32 * 0.5)) as i32;
            let mut y = 3;
            while y < state.street_row - 2 {
                grid.set(x, y, '|', BOLT_COLOR);
                y += 1;
                x += self.rng.range_i32(-1, 2);
            }

            self.flash_frames -= 1;
            if self.flash_frames <= 0 {
                self.lightning = Lightning::Fade;
                self.lightning_timer = 2;
            }
        } else if self.lightning == Lightning::Fade && self.lightning_timer <= 0 {
            self.lightning = Lightning::Idle;
            self.lightning_timer = 60 + self.rng.range_i32(0, 140);
        }
    }
}

impl Layer for WeatherFxLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        // Fresh start on every weather change.
        if self.last_weather != Some(state.weather) {
            self.rain.clear();
            self.snow.clear();
            self.lightning = Lightning::Idle;
            self.lightning_timer = 60 + self.rng.range_i32(0, 140);
            self.last_weather = Some(state.weather);
        }

        match state.weather {
            Weather::Rain => self.draw_rain(grid, state),
            Weather::Thunderstorm => {
                self.draw_rain(grid, state);
                self.draw_lightning(grid, state);
            }
            Weather::Snow => self.draw_snow(grid, state, tick),
            _ => {}
        }
    }
}

/// Drifting clouds. Count tracks the sampled weather parameters; the
/// first one or two clouds on a busy sky use massive shapes for impact.

use crossterm::style::Color;

use crate::art::clouds::{CLOUD_DARK, CLOUD_MASSIVE, CLOUD_MASSIVE_DARK, CLOUD_SHAPES};
use crate::art::art_width;
use crate::domain::weather::Weather;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

struct Cloud {
    x: f32,
    y: i32,
    shape: &'static [&'static str],
    speed: f32,
    width: i32,
}

const CLOUD_LIGHT_COLOR: Color = Color::Rgb { r: 0x99, g: 0x99, b: 0x99 };
const CLOUD_DARK_COLOR: Color = Color::Rgb { r: 0x55, g: 0x55, b: 0x55 };

pub struct CloudsLayer {
    clouds: Vec<Cloud>,
    last_weather: Option<Weather>,
    last_cols: i32,
}

impl CloudsLayer {
    pub fn new() -> Self {
        CloudsLayer {
            clouds: Vec::new(),
            last_weather: None,
            last_cols: 0,
        }
    }

    fn spawn_clouds(&mut self, count: u32, cols: i32, rows: i32, weather: Weather) {
        self.clouds.clear();
        let sky_height = (rows as f32 * 0.3) as i32;
        let is_dark = matches!(weather, Weather::Thunderstorm | Weather::Rain);
        let count = count as i32;

        for i in 0..count {
            let shape: &'static [&'static str] = if i < 2 && count >= 3 {
                if is_dark && i == 0 {
                    CLOUD_MASSIVE_DARK
                } else {
                    CLOUD_MASSIVE[i as usize % CLOUD_MASSIVE.len()]
                }
            } else if is_dark {
                // Dark pool: the storm shape plus the lighter variety.
                let pool: [&'static [&'static str]; 4] =
                    [CLOUD_DARK, CLOUD_SHAPES[1], CLOUD_SHAPES[2], CLOUD_SHAPES[3]];
                pool[i as usize % pool.len()]
            } else {
                CLOUD_SHAPES[i as usize % CLOUD_SHAPES.len()]
            };

            let width = art_width(shape);
            // Spread across the sky with a hash-based jitter so the
            // arrangement is stable for a given count.
            let x = (cols as f32 / (count + 1) as f32) * (i + 1) as f32
                - width as f32 / 2.0
                + ((i * 137) % 20 - 10) as f32;
            let y = 2 + (i % (sky_height - shape.len() as i32).max(1));
            let speed = 0.02 + ((i * 31) % 10) as f32 / 100.0 * 0.4;

            self.clouds.push(Cloud { x, y, shape, speed, width });
        }
    }
}

impl Default for CloudsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for CloudsLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        if state.cloud_count == 0 {
            self.clouds.clear();
            self.last_weather = Some(state.weather);
            return;
        }

        if self.last_weather != Some(state.weather) || state.cols != self.last_cols {
            self.spawn_clouds(state.cloud_count, state.cols, state.rows, state.weather);
            self.last_weather = Some(state.weather);
            self.last_cols = state.cols;
        }

        let is_dark = matches!(state.weather, Weather::Thunderstorm | Weather::Rain);
        let color = if is_dark { CLOUD_DARK_COLOR } else { CLOUD_LIGHT_COLOR };

        for cloud in &mut self.clouds {
            cloud.x += cloud.speed;
            if cloud.x > (state.cols + 5) as f32 {
                cloud.x = -(cloud.width as f32) - 5.0;
            }
            grid.draw_art(cloud.x.floor() as i32, cloud.y, cloud.shape, color);
        }
    }
}

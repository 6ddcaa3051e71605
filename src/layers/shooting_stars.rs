/// Shooting stars: the spawn rate follows the day's token launch count,
/// and each newly appeared mint in the runner set gets its own streak.

use std::collections::HashSet;

use crossterm::style::Color;

use crate::domain::weather::Weather;
use crate::layers::gray;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

struct ShootingStar {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: i32,
    trail: Vec<(f32, f32)>,
}

const HEAD_COLOR: Color = Color::Rgb { r: 0xFF, g: 0xFF, b: 0xFF };
const TRAIL_LEN: usize = 4;

pub struct ShootingStarsLayer {
    stars: Vec<ShootingStar>,
    spawn_timer: i32,
    previous_mints: HashSet<String>,
    rng: SceneRng,
}

impl ShootingStarsLayer {
    pub fn new(rng: SceneRng) -> Self {
        ShootingStarsLayer {
            stars: Vec::new(),
            spawn_timer: 0,
            previous_mints: HashSet::new(),
            rng,
        }
    }

    fn spawn_star(&mut self, cols: i32, rows: i32) -> ShootingStar {
        let sky_height = (rows as f32 * 0.3) as i32;
        ShootingStar {
            x: self.rng.range_f32(0.0, cols as f32 * 0.5),
            y: (1 + self.rng.range_i32(0, sky_height.max(1))) as f32,
            vx: self.rng.range_f32(1.2, 2.0),
            vy: self.rng.range_f32(0.2, 0.4),
            life: 15 + self.rng.range_i32(0, 10),
            trail: Vec::with_capacity(TRAIL_LEN),
        }
    }
}

impl Layer for ShootingStarsLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        if matches!(state.weather, Weather::Thunderstorm | Weather::Overcast) {
            return;
        }

        // More launches today = busier sky.
        let launched_today = state
            .trench
            .and_then(|t| t.market.launched_today)
            .unwrap_or(10_000);
        let launches_per_hour = launched_today / 24;
        let spawn_interval = (300 - launches_per_hour as i32 / 2).max(60);

        // A streak for each mint that just appeared (max 3 per poll).
        let current_mints: HashSet<String> = state
            .trench
            .map(|t| t.runners.iter().map(|r| r.mint.clone()).collect())
            .unwrap_or_default();
        if !self.previous_mints.is_empty() {
            let new_count = current_mints
                .iter()
                .filter(|m| !self.previous_mints.contains(*m))
                .count();
            for _ in 0..new_count.min(3) {
                let star = self.spawn_star(state.cols, state.rows);
                self.stars.push(star);
            }
        }
        self.previous_mints = current_mints;

        // Regular timed spawning.
        self.spawn_timer -= 1;
        if self.spawn_timer <= 0 {
            let star = self.spawn_star(state.cols, state.rows);
            self.stars.push(star);
            self.spawn_timer = spawn_interval;
        }

        let max_y = state.rows as f32 * 0.5;
        self.stars.retain_mut(|s| {
            s.trail.push((s.x, s.y));
            if s.trail.len() > TRAIL_LEN {
                s.trail.remove(0);
            }
            s.x += s.vx;
            s.y += s.vy;
            s.life -= 1;
            s.life > 0 && s.x <= state.cols as f32 && s.y <= max_y
        });

        for s in &self.stars {
            for (t, (tx, ty)) in s.trail.iter().enumerate() {
                let brightness = (40 + (t * 60) / s.trail.len().max(1)) as u8;
                grid.set(tx.floor() as i32, ty.floor() as i32, '-', gray(brightness));
            }
            grid.set(s.x.floor() as i32, s.y.floor() as i32, '*', HEAD_COLOR);
        }
    }
}

/// Graduation fireworks: every mint that completes its bonding curve
/// between two polls gets an expanding burst somewhere in the sky.

use std::collections::HashSet;

use crossterm::style::Color;

use crate::layers::gray;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

struct Firework {
    x: i32,
    y: i32,
    frame: usize,
    color: Color,
}

const EXPLOSION_FRAMES: [&[&str]; 8] = [
    &["*"],
    &[" * ", "*.*", " * "],
    &["  |  ", r"\   /", "-- --", r"/   \", "  |  "],
    &[r"  \|/  ", "-- * --", r"  /|\  "],
    &[" . * . ", "*     *", " . * . "],
    &[" .   . ", "  . .  ", " .   . "],
    &["  .  ", " . . ", "  .  "],
    &[" . ", "   ", " . "],
];

const FIREWORK_COLORS: [Color; 6] = [
    Color::Rgb { r: 0xfb, g: 0xbf, b: 0x24 },
    Color::Rgb { r: 0xf8, g: 0x71, b: 0x71 },
    Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 },
    Color::Rgb { r: 0x60, g: 0xa5, b: 0xfa },
    Color::Rgb { r: 0xc0, g: 0x84, b: 0xfc },
    Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 },
];

pub struct FireworksLayer {
    fireworks: Vec<Firework>,
    previous_grad_mints: HashSet<String>,
    rng: SceneRng,
}

impl FireworksLayer {
    pub fn new(rng: SceneRng) -> Self {
        FireworksLayer {
            fireworks: Vec::new(),
            previous_grad_mints: HashSet::new(),
            rng,
        }
    }

    /// Launch a burst at a column, somewhere in the upper sky.
    pub fn trigger(&mut self, x: i32, sky_height: i32) {
        let y = 2 + self.rng.range_i32(0, (sky_height - 5).max(1));
        self.fireworks.push(Firework {
            x,
            y,
            frame: 0,
            color: *self.rng.pick(&FIREWORK_COLORS),
        });
    }
}

impl Layer for FireworksLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let grad_mints: HashSet<String> = state
            .trench
            .map(|t| {
                t.runners
                    .iter()
                    .filter(|r| r.is_graduated)
                    .map(|r| r.mint.clone())
                    .collect()
            })
            .unwrap_or_default();

        if !self.previous_grad_mints.is_empty() {
            let fresh: Vec<&String> = grad_mints
                .iter()
                .filter(|m| !self.previous_grad_mints.contains(*m))
                .collect();
            for _ in fresh {
                let sky_height = (state.rows as f32 * 0.4) as i32;
                let x = 5 + self.rng.range_i32(0, (state.cols - 10).max(1));
                self.trigger(x, sky_height);
            }
        }
        self.previous_grad_mints = grad_mints;

        let advance = tick % 4 == 0;
        self.fireworks.retain_mut(|fw| {
            if advance {
                fw.frame += 1;
            }
            fw.frame < EXPLOSION_FRAMES.len()
        });

        for fw in &self.fireworks {
            let pattern = EXPLOSION_FRAMES[fw.frame];
            let brightness = 1.0 - fw.frame as f32 / EXPLOSION_FRAMES.len() as f32;
            let fade = gray((brightness * 255.0) as u8);

            for (r, line) in pattern.iter().enumerate() {
                for (c, ch) in line.chars().enumerate() {
                    if ch == ' ' {
                        continue;
                    }
                    let sx = fw.x - line.chars().count() as i32 / 2 + c as i32;
                    let sy = fw.y - pattern.len() as i32 / 2 + r as i32;
                    // Full color while expanding, grayscale while dying.
                    let color = if fw.frame < 3 { fw.color } else { fade };
                    grid.set(sx, sy, ch, color);
                }
            }
        }
    }
}

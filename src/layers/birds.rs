/// Birds crossing the sky, sometimes in small flocks. Fair weather only.

use crossterm::style::Color;

use crate::domain::weather::Weather;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const BIRD_COLOR: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };

const BIRD_FRAMES_SMALL: [char; 2] = ['v', '^'];
const BIRD_FRAMES_WIDE_R: [&str; 2] = [r"\v/", r"/^\"];
const BIRD_FRAMES_WIDE_L: [&str; 2] = [r"/v\", r"\^/"];

struct Bird {
    x: f32,
    y: i32,
    direction: i32,
    frame: usize,
    move_ticks: u32,
    move_counter: u32,
    flap_counter: u32,
}

fn bird_count_for_weather(w: Weather) -> usize {
    match w {
        Weather::Clear => 3,
        Weather::PartlyCloudy => 2,
        Weather::Overcast => 1,
        Weather::Rain | Weather::Thunderstorm | Weather::Snow => 0,
    }
}

pub struct BirdsLayer {
    birds: Vec<Bird>,
    last_weather: Option<Weather>,
    spawn_timer: i32,
    rng: SceneRng,
}

impl BirdsLayer {
    pub fn new(rng: SceneRng) -> Self {
        BirdsLayer {
            birds: Vec::new(),
            last_weather: None,
            spawn_timer: 0,
            rng,
        }
    }

    fn spawn_bird(&mut self, cols: i32, rows: i32) -> Bird {
        let dir = if self.rng.chance(0.5) { 1 } else { -1 };
        let sky_height = ((rows as f32 * 0.3) as i32).min(15);
        Bird {
            x: if dir == 1 { -3.0 } else { (cols + 3) as f32 },
            y: 3 + self.rng.range_i32(0, (sky_height - 3).max(1)),
            direction: dir,
            frame: 0,
            move_ticks: 8 + self.rng.range_i32(0, 5) as u32,
            move_counter: 0,
            flap_counter: 0,
        }
    }
}

impl Layer for BirdsLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        let target = bird_count_for_weather(state.weather);

        if self.last_weather != Some(state.weather) {
            self.birds.clear();
            self.last_weather = Some(state.weather);
            self.spawn_timer = 30;
        }

        self.spawn_timer -= 1;
        if self.spawn_timer <= 0 && self.birds.len() < target {
            let lead = self.spawn_bird(state.cols, state.rows);
            let flock = matches!(state.weather, Weather::Clear | Weather::PartlyCloudy)
                && self.rng.chance(0.3);
            let (lead_x, lead_y, lead_dir) = (lead.x, lead.y, lead.direction);
            self.birds.push(lead);

            if flock {
                let flock_size = 1 + self.rng.range_i32(0, 3);
                for _ in 0..flock_size {
                    if self.birds.len() >= target + 2 {
                        break;
                    }
                    let mut member = self.spawn_bird(state.cols, state.rows);
                    member.x = lead_x + self.rng.range_f32(-3.0, 3.0);
                    member.y = lead_y + self.rng.range_i32(-1, 2);
                    member.direction = lead_dir;
                    self.birds.push(member);
                }
            }

            self.spawn_timer = 60 + self.rng.range_i32(0, 120);
        }

        let cols = state.cols;
        let rows = state.rows;
        self.birds.retain_mut(|bird| {
            bird.move_counter += 1;
            if bird.move_counter >= bird.move_ticks {
                bird.move_counter = 0;
                bird.x += bird.direction as f32;
                bird.flap_counter += 1;
                if bird.flap_counter >= 3 {
                    bird.flap_counter = 0;
                    bird.frame = 1 - bird.frame;
                }
            }
            !(bird.direction == 1 && bird.x > (cols + 5) as f32
                || bird.direction == -1 && bird.x < -5.0)
        });

        for bird in &self.birds {
            // Alternate small and wide sprites by row parity.
            let bx = bird.x.floor() as i32;
            if bird.y % 2 == 0 {
                let frames = if bird.direction == 1 {
                    BIRD_FRAMES_WIDE_R
                } else {
                    BIRD_FRAMES_WIDE_L
                };
                for (c, ch) in frames[bird.frame].chars().enumerate() {
                    let cx = bx + c as i32;
                    if cx >= 0 && cx < cols && bird.y >= 0 && bird.y < rows && ch != ' ' {
                        grid.set(cx, bird.y, ch, BIRD_COLOR);
                    }
                }
            } else if bx >= 0 && bx < cols && bird.y >= 0 && bird.y < rows {
                grid.set(bx, bird.y, BIRD_FRAMES_SMALL[bird.frame], BIRD_COLOR);
            }
        }
    }
}

/// A plane towing the forecast banner across the upper sky. Grounded in
/// bad weather, dimmed when partly cloudy.

use crossterm::style::Color;

use crate::art::art_width;
use crate::domain::weather::Weather;
use crate::layers::dim;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const PLANE: &[&str] = &[
    r#"       __        "#,
    r#"    \  \     _ _ "#,
    r#"     \**\ ___\/ \"#,
    r#"   X*#####*+^^\_ \"#,
    r#"     o/\  \      "#,
    r#"        \__\     "#,
];

/// Row within the plane art where the banner rope attaches.
const BANNER_ROW: i32 = 3;

const BANNER_TEXT: &str = "---[ TRENCH FORECAST  $FORECAST  CA: XXXX...pump ]---";

const PLANE_BODY: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const PLANE_ACCENT: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };
const BANNER_TITLE: Color = Color::Rgb { r: 0xe4, g: 0xe4, b: 0xe7 };
const BANNER_TICKER: Color = Color::Rgb { r: 0x4a, g: 0xde, b: 0x80 };
const BANNER_CA_LABEL: Color = Color::Rgb { r: 0x71, g: 0x71, b: 0x7a };
const BANNER_DEFAULT: Color = Color::Rgb { r: 0x52, g: 0x52, b: 0x5b };

struct ColorRegion {
    start: usize,
    end: usize,
    color: Color,
}

fn banner_regions() -> Vec<ColorRegion> {
    let mut regions = Vec::new();
    if let Some(i) = BANNER_TEXT.find("TRENCH FORECAST") {
        regions.push(ColorRegion { start: i, end: i + 15, color: BANNER_TITLE });
    }
    if let Some(i) = BANNER_TEXT.find("$FORECAST") {
        regions.push(ColorRegion { start: i, end: i + 9, color: BANNER_TICKER });
    }
    if let Some(i) = BANNER_TEXT.find("CA:") {
        regions.push(ColorRegion { start: i, end: i + 3, color: BANNER_CA_LABEL });
        regions.push(ColorRegion { start: i + 3, end: BANNER_TEXT.len(), color: BANNER_DEFAULT });
    }
    regions
}

fn plane_char_color(ch: char) -> Color {
    match ch {
        'X' | '*' | '#' | '+' | '^' => PLANE_BODY,
        '\\' | '/' | '_' | 'o' => PLANE_ACCENT,
        _ => PLANE_BODY,
    }
}

pub struct BannerPlaneLayer {
    /// Left edge of the whole unit: [banner]---[plane], flying rightward.
    x: f32,
    y: i32,
    speed: f32,
    pause_timer: u32,
    regions: Vec<ColorRegion>,
    rng: SceneRng,
}

impl BannerPlaneLayer {
    pub fn new(rng: SceneRng) -> Self {
        let total = BANNER_TEXT.len() as i32 + art_width(PLANE);
        BannerPlaneLayer {
            x: (-total - 10) as f32,
            y: 5,
            speed: 0.07,
            pause_timer: 0,
            regions: banner_regions(),
            rng,
        }
    }

    fn banner_char_color(&self, i: usize) -> Color {
        for region in &self.regions {
            if i >= region.start && i < region.end {
                return region.color;
            }
        }
        BANNER_DEFAULT
    }
}

impl Layer for BannerPlaneLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, _tick: u64) {
        // Grounded in anything worse than partly cloudy.
        if matches!(
            state.weather,
            Weather::Thunderstorm | Weather::Snow | Weather::Rain | Weather::Overcast
        ) {
            return;
        }

        if self.pause_timer > 0 {
            self.pause_timer -= 1;
            return;
        }

        self.x += self.speed;

        // Keep out of the building tops.
        let max_row = state.street_row - 2;
        let dimmed = state.weather == Weather::PartlyCloudy;
        let base_x = self.x.floor() as i32;

        // Plane leads on the right.
        let plane_x = base_x + BANNER_TEXT.len() as i32;
        for (row, line) in PLANE.iter().enumerate() {
            let draw_y = self.y + row as i32;
            if draw_y < 0 || draw_y >= max_row {
                continue;
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let draw_x = plane_x + col as i32;
                if draw_x < 0 || draw_x >= state.cols {
                    continue;
                }
                let mut color = plane_char_color(ch);
                if dimmed {
                    color = dim(color, 0.7);
                }
                grid.set(draw_x, draw_y, ch, color);
            }
        }

        // Banner trails flat behind the plane.
        let banner_y = self.y + BANNER_ROW;
        if banner_y >= 0 && banner_y < max_row {
            for (i, ch) in BANNER_TEXT.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let draw_x = base_x + i as i32;
                if draw_x < 0 || draw_x >= state.cols {
                    continue;
                }
                let mut color = self.banner_char_color(i);
                if dimmed {
                    color = dim(color, 0.7);
                }
                grid.set(draw_x, banner_y, ch, color);
            }
        }

        // Pause off-screen before the next pass.
        if base_x > state.cols + 10 {
            let total = BANNER_TEXT.len() as i32 + art_width(PLANE);
            self.x = (-total - 20) as f32;
            self.pause_timer = (150 + self.rng.range_i32(0, 150)) as u32;
        }
    }
}

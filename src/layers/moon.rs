/// Cratered moon in the upper-right sky.

use crossterm::style::Color;

use crate::domain::weather::Weather;
use crate::sim::scene::{Layer, SceneState};
use crate::ui::grid::Grid;

const MOON_ART: &[&str] = &[
    r#"    _.._   "#,
    r#"  .'    '. "#,
    r#" /   ()   \"#,
    r#"|  ()  ()  |"#,
    r#"|    ()    |"#,
    r#" \   ()  / "#,
    r#"  '._  _.' "#,
    r#"    ''     "#,
];
const MOON_WIDTH: i32 = 11;
const MOON_HEIGHT: i32 = 8;
const MOON_COLOR: Color = Color::Rgb { r: 0xEE, g: 0xEE, b: 0xEE };
const MOON_DIM: Color = Color::Rgb { r: 0x66, g: 0x66, b: 0x66 };
const CRATER_COLOR: Color = Color::Rgb { r: 0xFF, g: 0xFF, b: 0xEE };
const GLOW_COLOR: Color = Color::Rgb { r: 0x44, g: 0x44, b: 0x44 };

pub struct MoonLayer;

impl MoonLayer {
    pub fn new() -> Self {
        MoonLayer
    }
}

impl Default for MoonLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for MoonLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let visible = matches!(
            state.weather,
            Weather::Clear | Weather::PartlyCloudy | Weather::Snow
        );
        if !visible {
            return;
        }

        let col = state.cols - MOON_WIDTH - 8;
        let row = 2;
        let color = if state.weather == Weather::Snow {
            MOON_DIM
        } else {
            MOON_COLOR
        };

        grid.draw_art_colored(
            col,
            row,
            MOON_ART,
            color,
            &[('(', CRATER_COLOR), (')', CRATER_COLOR)],
        );

        // Subtle pulsing glow, clear nights only.
        if tick % 60 < 30 && state.weather == Weather::Clear {
            let glow = [
                (col - 1, row + 2, '.'),
                (col + MOON_WIDTH, row + 3, '.'),
                (col + 3, row - 1, '\''),
                (col + MOON_WIDTH - 3, row + MOON_HEIGHT, '\''),
            ];
            for (gc, gr, ch) in glow {
                grid.set(gc, gr, ch, GLOW_COLOR);
            }
        }
    }
}

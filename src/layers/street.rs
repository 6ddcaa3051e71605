/// Street level: sidewalk, two traffic lanes, ground texture, trees and
/// lamps in the gaps between buildings, pedestrians, and a rare animal
/// visitor. Everything weather-aware.

use crossterm::style::Color;

use crate::art::street::{
    CARS_L, CARS_R, CAR_WIDTH, CAT, DOG, FURNITURE, LAMPS, PERSON_FRAMES_L, PERSON_FRAMES_R,
    TREES, TREE_WINTER,
};
use crate::art::{art_height, art_width};
use crate::domain::weather::Weather;
use crate::sim::rng::SceneRng;
use crate::sim::scene::{BuildingSlot, Layer, SceneState};
use crate::ui::grid::Grid;

const SIDEWALK_COLOR: Color = Color::Rgb { r: 0x55, g: 0x55, b: 0x55 };
const ROAD_COLOR: Color = Color::Rgb { r: 0x33, g: 0x33, b: 0x33 };
const CENTER_LINE_COLOR: Color = Color::Rgb { r: 0x66, g: 0x66, b: 0x44 };
const GROUND_COLOR: Color = Color::Rgb { r: 0x2a, g: 0x2a, b: 0x2a };
const GROUND_ALT: Color = Color::Rgb { r: 0x22, g: 0x22, b: 0x22 };
const TREE_COLOR: Color = Color::Rgb { r: 0x33, g: 0xaa, b: 0x55 };
const TREE_TRUNK: Color = Color::Rgb { r: 0x88, g: 0x66, b: 0x44 };
const TREE_SNOW: Color = Color::Rgb { r: 0xAA, g: 0xAA, b: 0xAA };
const LAMP_COLOR: Color = Color::Rgb { r: 0x99, g: 0x99, b: 0x88 };
const LAMP_GLOW: Color = Color::Rgb { r: 0xDD, g: 0xDD, b: 0x88 };
const LAMP_GLOW_GROUND: Color = Color::Rgb { r: 0x78, g: 0x71, b: 0x6c };
const LAMP_GLOW_EDGE: Color = Color::Rgb { r: 0x5a, g: 0x53, b: 0x49 };
const CAR_COLOR: Color = Color::Rgb { r: 0x88, g: 0x88, b: 0x99 };
const CAR_TAIL: Color = Color::Rgb { r: 0xAA, g: 0x33, b: 0x33 };
const CAR_HEAD: Color = Color::Rgb { r: 0xDD, g: 0xDD, b: 0x88 };
const PERSON_COLOR: Color = Color::Rgb { r: 0x88, g: 0x88, b: 0x88 };
const FURNITURE_COLOR: Color = Color::Rgb { r: 0x66, g: 0x66, b: 0x66 };
const PUDDLE_COLOR: Color = Color::Rgb { r: 0x3a, g: 0x5a, b: 0x8a };
const SNOW_GROUND: Color = Color::Rgb { r: 0xAA, g: 0xAA, b: 0xAA };
const ANIMAL_COLOR: Color = Color::Rgb { r: 0x77, g: 0x77, b: 0x66 };

struct Car {
    x: f32,
    variant: usize,
    /// Chars per move; varies per car.
    speed: f32,
    /// Ticks between moves.
    move_ticks: u32,
    move_counter: u32,
}

struct Walker {
    x: f32,
    direction: i32,
    frame: usize,
    ticks_per_step: u32,
    step_counter: u32,
    pause_timer: u32,
    steps_until_pause: i32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Tree,
    TreeWinter,
    Lamp,
    Furniture,
}

struct StreetElement {
    col: i32,
    kind: ElementKind,
    art_idx: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AnimalKind {
    Cat,
    Dog,
}

struct Animal {
    col: i32,
    kind: AnimalKind,
    spawn_tick: u64,
}

pub struct StreetLayer {
    cars_right: Vec<Car>,
    cars_left: Vec<Car>,
    walkers: Vec<Walker>,
    elements: Vec<StreetElement>,
    last_cols: i32,
    last_weather: Option<Weather>,
    animal: Option<Animal>,
    animal_check_tick: u64,
    slot: BuildingSlot,
    rng: SceneRng,
}

impl StreetLayer {
    pub fn new(slot: BuildingSlot, rng: SceneRng) -> Self {
        StreetLayer {
            cars_right: Vec::new(),
            cars_left: Vec::new(),
            walkers: Vec::new(),
            elements: Vec::new(),
            last_cols: 0,
            last_weather: None,
            animal: None,
            animal_check_tick: 0,
            slot,
            rng,
        }
    }

    /// Place trees, lamps and furniture in the gaps between building
    /// footprints. Relaid when the width or weather changes.
    fn layout_elements(&mut self, cols: i32, weather: Weather) {
        if cols == self.last_cols && Some(weather) == self.last_weather {
            return;
        }
        self.last_cols = cols;
        self.last_weather = Some(weather);
        self.elements.clear();

        let mut positions = self.slot.borrow().clone();
        positions.sort_by_key(|p| p.col);

        let mut gaps: Vec<(i32, i32)> = Vec::new();
        if let Some(first) = positions.first() {
            if first.col > 5 {
                gaps.push((2, first.col - 1));
            }
        }
        for pair in positions.windows(2) {
            let end = pair[0].col + pair[0].width;
            let next = pair[1].col;
            if next - end > 3 {
                gaps.push((end + 1, next - 1));
            }
        }
        if let Some(last) = positions.last() {
            if last.col + last.width < cols - 5 {
                gaps.push((last.col + last.width + 1, cols - 3));
            }
        }
        // No buildings at all: spread elements across the full width.
        if positions.is_empty() {
            let mut c = 5;
            while c < cols - 5 {
                gaps.push((c, c + 12));
                c += 15;
            }
        }

        let winter = weather == Weather::Snow;
        let mut elem_idx = 0usize;
        for (start, end) in gaps {
            let gap_width = end - start;
            if gap_width < 4 {
                continue;
            }

            let tree_idx = elem_idx % TREES.len();
            let tree_art = if winter { TREE_WINTER } else { TREES[tree_idx] };
            self.elements.push(StreetElement {
                col: start + (gap_width - art_width(tree_art)) / 2,
                kind: if winter { ElementKind::TreeWinter } else { ElementKind::Tree },
                art_idx: tree_idx,
            });

            if gap_width > 10 {
                self.elements.push(StreetElement {
                    col: start + 1,
                    kind: ElementKind::Lamp,
                    art_idx: elem_idx % LAMPS.len(),
                });
            }

            if gap_width > 16 {
                let furn_idx = elem_idx % FURNITURE.len();
                self.elements.push(StreetElement {
                    col: end - art_width(FURNITURE[furn_idx]) - 1,
                    kind: ElementKind::Furniture,
                    art_idx: furn_idx,
                });
            }

            elem_idx += 1;
        }
    }

    fn has_collision(x: f32, lane: &[Car]) -> bool {
        lane.iter().any(|car| (car.x - x).abs() < (CAR_WIDTH + 5) as f32)
    }

    fn spawn_car(&mut self, cols: i32, rightward: bool) -> Car {
        let scatter = self.rng.range_i32(0, 40);
        Car {
            x: if rightward {
                (-CAR_WIDTH - scatter) as f32
            } else {
                (cols + scatter) as f32
            },
            variant: self.rng.range_i32(0, 2) as usize,
            speed: self.rng.range_f32(0.8, 1.2),
            move_ticks: 2 + self.rng.range_i32(0, 2) as u32,
            move_counter: 0,
        }
    }

    fn update_cars(&mut self, cols: i32, density: f32) {
        // CLEAR=4, OVERCAST=2, RAIN=1, SNOW=0 cars per lane.
        let max_per_lane = ((density * 4.0).ceil() as usize).min(4);

        if self.cars_right.len() < max_per_lane && self.rng.chance(0.03) {
            let car = self.spawn_car(cols, true);
            if !Self::has_collision(car.x, &self.cars_right) {
                self.cars_right.push(car);
            }
        }
        if self.cars_left.len() < max_per_lane && self.rng.chance(0.03) {
            let car = self.spawn_car(cols, false);
            if !Self::has_collision(car.x, &self.cars_left) {
                self.cars_left.push(car);
            }
        }

        // Thin out if the density dropped.
        while self.cars_right.len() > max_per_lane {
            self.cars_right.remove(0);
        }
        while self.cars_left.len() > max_per_lane {
            self.cars_left.remove(0);
        }

        for car in &mut self.cars_right {
            car.move_counter += 1;
            if car.move_counter >= car.move_ticks {
                car.move_counter = 0;
                car.x += car.speed;
            }
            if car.x > (cols + CAR_WIDTH + 10) as f32 {
                car.x = (-CAR_WIDTH - self.rng.range_i32(0, 30)) as f32;
            }
        }
        for car in &mut self.cars_left {
            car.move_counter += 1;
            if car.move_counter >= car.move_ticks {
                car.move_counter = 0;
                car.x -= car.speed;
            }
            if car.x < (-CAR_WIDTH - 10) as f32 {
                car.x = (cols + self.rng.range_i32(0, 30)) as f32;
            }
        }
    }

    fn spawn_walker(&mut self, cols: i32) -> Walker {
        let dir = if self.rng.chance(0.5) { 1 } else { -1 };
        Walker {
            x: if dir == 1 {
                (-4 - self.rng.range_i32(0, 20)) as f32
            } else {
                (cols + 4 + self.rng.range_i32(0, 20)) as f32
            },
            direction: dir,
            frame: 0,
            ticks_per_step: 20 + self.rng.range_i32(0, 25) as u32,
            step_counter: 0,
            pause_timer: 0,
            steps_until_pause: 10 + self.rng.range_i32(0, 15),
        }
    }

    fn update_walkers(&mut self, cols: i32, people_density: f32) {
        let max_people = (people_density * 6.0).ceil().max(0.0) as usize;

        if self.walkers.len() < max_people && self.rng.chance(0.02) {
            let walker = self.spawn_walker(cols);
            self.walkers.push(walker);
        }
        while self.walkers.len() > max_people {
            self.walkers.remove(0);
        }

        for w in &mut self.walkers {
            if w.pause_timer > 0 {
                w.pause_timer -= 1;
                continue;
            }

            w.step_counter += 1;
            if w.step_counter >= w.ticks_per_step {
                w.step_counter = 0;
                w.x += w.direction as f32;
                w.frame = 1 - w.frame;

                w.steps_until_pause -= 1;
                if w.steps_until_pause <= 0 {
                    w.pause_timer = (60 + self.rng.range_i32(0, 60)) as u32;
                    w.steps_until_pause = 10 + self.rng.range_i32(0, 15);
                }
            }

            if w.direction == 1 && w.x > (cols + 6) as f32 {
                w.x = -6.0;
            }
            if w.direction == -1 && w.x < -6.0 {
                w.x = (cols + 6) as f32;
            }
        }
    }

    /// Spawn/despawn the rare street animal. Checked every ~10 seconds.
    fn update_animal(&mut self, state: &SceneState, tick: u64) {
        if tick - self.animal_check_tick < 300 {
            return;
        }
        self.animal_check_tick = tick;

        match &self.animal {
            Some(animal) if tick - animal.spawn_tick > 300 => self.animal = None,
            Some(_) => {}
            None => {
                if self.rng.chance(0.1)
                    && !matches!(state.weather, Weather::Thunderstorm | Weather::Rain)
                {
                    self.animal = Some(Animal {
                        col: 10 + self.rng.range_i32(0, (state.cols - 20).max(1)),
                        kind: if self.rng.chance(0.5) { AnimalKind::Cat } else { AnimalKind::Dog },
                        spawn_tick: tick,
                    });
                }
            }
        }
    }

    fn draw_car_on_row(grid: &mut Grid, car: &Car, row: i32, art: &[&str], cols: i32) {
        let line = art[car.variant];
        let x = car.x.floor() as i32;
        let len = line.chars().count();

        for (i, ch) in line.chars().enumerate() {
            let cx = x + i as i32;
            if cx < 0 || cx >= cols || ch == ' ' {
                continue;
            }
            let color = match ch {
                // 'o' glyphs are lights: tail on the trailing half, head on the leading.
                'o' => {
                    if i < len / 2 {
                        CAR_TAIL
                    } else {
                        CAR_HEAD
                    }
                }
                '>' | '<' => CAR_HEAD,
                _ => CAR_COLOR,
            };
            grid.set(cx, row, ch, color);
        }
    }

    fn draw_element(&self, grid: &mut Grid, elem: &StreetElement, base_row: i32, cols: i32) {
        match elem.kind {
            ElementKind::Tree | ElementKind::TreeWinter => {
                let art = if elem.kind == ElementKind::TreeWinter {
                    TREE_WINTER
                } else {
                    TREES[elem.art_idx]
                };
                let top_row = base_row - art_height(art);
                for (r, line) in art.iter().enumerate() {
                    let is_trunk = r >= art.len() - 1;
                    for (i, ch) in line.chars().enumerate() {
                        if ch != ' ' {
                            let color = if is_trunk {
                                TREE_TRUNK
                            } else if elem.kind == ElementKind::TreeWinter {
                                TREE_SNOW
                            } else {
                                TREE_COLOR
                            };
                            grid.set(elem.col + i as i32, top_row + r as i32, ch, color);
                        }
                    }
                }
            }

            ElementKind::Lamp => {
                let art = LAMPS[elem.art_idx];
                let top_row = base_row - art_height(art);
                for (r, line) in art.iter().enumerate() {
                    for (i, ch) in line.chars().enumerate() {
                        if ch != ' ' {
                            let color = if r == 0 { LAMP_GLOW } else { LAMP_COLOR };
                            grid.set(elem.col + i as i32, top_row + r as i32, ch, color);
                        }
                    }
                }

                // Light pool on the ground under the lamp head.
                let center = elem.col + art_width(art) / 2;
                for c in (center - 3)..=(center + 3) {
                    if c < 0 || c >= cols {
                        continue;
                    }
                    let glow = if (c - center).abs() <= 1 {
                        LAMP_GLOW_GROUND
                    } else {
                        LAMP_GLOW_EDGE
                    };
                    let underneath = grid.get(c, base_row).map(|cell| cell.ch);
                    if matches!(underneath, Some('\u{2550}') | Some(' ') | Some('.')) {
                        grid.set(c, base_row, '.', glow);
                    }
                }
            }

            ElementKind::Furniture => {
                let art = FURNITURE[elem.art_idx];
                let top_row = base_row - art_height(art);
                for (r, line) in art.iter().enumerate() {
                    for (i, ch) in line.chars().enumerate() {
                        if ch != ' ' {
                            grid.set(elem.col + i as i32, top_row + r as i32, ch, FURNITURE_COLOR);
                        }
                    }
                }
            }
        }
    }
}

impl Layer for StreetLayer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        let street_row = state.street_row;
        self.layout_elements(state.cols, state.weather);
        self.update_cars(state.cols, state.car_density);
        self.update_walkers(state.cols, state.people_density);

        // Four ground rows: bases/sidewalk, right lane, left lane, texture.
        let base_row = street_row;
        let lane1_row = street_row + 1;
        let lane2_row = street_row + 2;
        let ground_row = street_row + 3;

        for c in 0..state.cols {
            grid.set(c, base_row, '\u{2550}', SIDEWALK_COLOR);
        }
        for c in 0..state.cols {
            grid.set(c, lane1_row, ' ', ROAD_COLOR);
        }
        for c in 0..state.cols {
            let is_dash = c % 4 < 2;
            grid.set(
                c,
                lane2_row,
                if is_dash { '-' } else { ' ' },
                if is_dash { CENTER_LINE_COLOR } else { ROAD_COLOR },
            );
        }
        for c in 0..state.cols {
            let (ch, color) = match (c * 7 + 3) % 6 {
                0 => ('^', GROUND_COLOR),
                1 => ('^', GROUND_ALT),
                2 => ('.', GROUND_COLOR),
                3 => ('*', GROUND_ALT),
                4 => ('^', GROUND_COLOR),
                _ => ('.', GROUND_ALT),
            };
            grid.set(c, ground_row, ch, color);
        }

        for elem in &self.elements {
            self.draw_element(grid, elem, base_row, state.cols);
        }

        self.update_animal(state, tick);
        if let Some(animal) = &self.animal {
            let art = if animal.kind == AnimalKind::Cat { CAT } else { DOG };
            for (r, line) in art.iter().enumerate() {
                for (i, ch) in line.chars().enumerate() {
                    let cx = animal.col + i as i32;
                    if cx >= 0 && cx < state.cols && ch != ' ' {
                        grid.set(cx, base_row - art.len() as i32 + r as i32, ch, ANIMAL_COLOR);
                    }
                }
            }
        }

        for w in &self.walkers {
            let frames = if w.direction == 1 { PERSON_FRAMES_R } else { PERSON_FRAMES_L };
            let art = frames[w.frame];
            let x = w.x.floor() as i32;
            let y = base_row - art_height(art);
            for (r, line) in art.iter().enumerate() {
                for (i, ch) in line.chars().enumerate() {
                    let cx = x + i as i32;
                    if cx >= 0 && cx < state.cols && ch != ' ' {
                        grid.set(cx, y + r as i32, ch, PERSON_COLOR);
                    }
                }
            }
        }

        for car in &self.cars_right {
            Self::draw_car_on_row(grid, car, lane1_row, CARS_R, state.cols);
        }
        for car in &self.cars_left {
            Self::draw_car_on_row(grid, car, lane2_row, CARS_L, state.cols);
        }

        // Rain shimmer on the road.
        if matches!(state.weather, Weather::Rain | Weather::Thunderstorm) {
            for c in 0..state.cols {
                if (c as u64 + tick) % 5 == 0 {
                    grid.set(c, lane1_row, '~', PUDDLE_COLOR);
                }
                if (c as u64 + tick * 2) % 7 == 0 {
                    grid.set(c, lane2_row, '\u{2248}', PUDDLE_COLOR);
                }
            }
        }

        // Snow dusting.
        if state.weather == Weather::Snow {
            for c in 0..state.cols {
                if (c * 7 + 3) % 3 == 0 {
                    grid.set(c, base_row, '.', SNOW_GROUND);
                }
                if (c * 13 + 5) % 4 == 0 {
                    grid.set(c, ground_row, '*', SNOW_GROUND);
                }
            }
        }
    }
}

/// Scene composition: the per-tick state snapshot, the layer capability,
/// and the ordered composer that runs every layer back-to-front.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::market::{TrenchState, TrendSnapshot};
use crate::domain::weather::Weather;
use crate::ui::grid::Grid;

/// Ticker + footer occupy the bottom rows.
pub const TICKER_ROWS: i32 = 2;
/// Street level: bases, two road lanes, ground texture.
pub const GROUND_ROWS: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherMode {
    /// Weather tracks the feed's classification.
    Auto,
    /// User-pinned via the cycle key.
    Manual,
}

/// Oracle overlay tri-state: closed, loading, or showing a reading.
#[derive(Clone, Debug, Default)]
pub struct OracleState {
    pub visible: bool,
    pub loading: bool,
    pub reading: Option<String>,
}

/// On-screen footprint of one placed building, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingPos {
    pub col: i32,
    pub width: i32,
}

/// The one intentional cross-layer channel: the buildings layer writes
/// its placed footprints here each layout; the street layer and the
/// token-detail overlay read them. Handed to exactly those layers at
/// construction rather than riding in the snapshot.
pub type BuildingSlot = Rc<RefCell<Vec<BuildingPos>>>;

pub fn building_slot() -> BuildingSlot {
    Rc::new(RefCell::new(Vec::new()))
}

/// Immutable-per-tick bundle of derived values assembled by the host and
/// passed to every layer. Layers only read it.
pub struct SceneState<'a> {
    pub cols: i32,
    pub rows: i32,
    pub weather: Weather,
    /// Total ground rows (street area above the ticker).
    pub ground_rows: i32,
    /// Row where the street starts: rows - ground_rows - TICKER_ROWS.
    pub street_row: i32,
    /// Total bottom reserved zone: ground_rows + TICKER_ROWS.
    pub bottom_zone: i32,
    /// Densities 0-1, sampled from the weather on each transition.
    pub car_density: f32,
    pub window_brightness: f32,
    pub people_density: f32,
    /// Rain/snow density 0-1 for the current weather band.
    pub particle_intensity: f32,
    /// Cloud target for the current weather (includes the ±1 variance).
    pub cloud_count: u32,
    pub trench: Option<&'a TrenchState>,
    /// Rolling trend snapshots, most recent last (max 4).
    pub trend_history: &'a [TrendSnapshot],
    /// Buy-ratio sparkline history (max 12 points).
    pub sparkline: &'a [f32],
    pub weather_mode: WeatherMode,
    pub oracle: &'a OracleState,
    pub docs_visible: bool,
    /// Currently selected building index in display order.
    pub selected_building: Option<usize>,
}

pub trait Layer {
    fn draw(&mut self, grid: &mut Grid, state: &SceneState, tick: u64);
}

/// Ordered layer list; registration order is back-to-front draw order:
/// sky layers first, overlays last. A layer earlier in the list may be
/// fully overdrawn by a later one.
pub struct SceneComposer {
    layers: Vec<Box<dyn Layer>>,
}

impl SceneComposer {
    pub fn new() -> Self {
        SceneComposer { layers: Vec::new() }
    }

    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    /// Invoke every layer in order. The host clears the grid beforehand.
    pub fn draw_all(&mut self, grid: &mut Grid, state: &SceneState, tick: u64) {
        for layer in &mut self.layers {
            layer.draw(grid, state, tick);
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    struct Tag(char);
    impl Layer for Tag {
        fn draw(&mut self, grid: &mut Grid, _state: &SceneState, _tick: u64) {
            grid.set(0, 0, self.0, Color::White);
        }
    }

    fn bare_state<'a>(oracle: &'a OracleState) -> SceneState<'a> {
        SceneState {
            cols: 10,
            rows: 10,
            weather: Weather::Clear,
            ground_rows: GROUND_ROWS,
            street_row: 4,
            bottom_zone: GROUND_ROWS + TICKER_ROWS,
            car_density: 0.0,
            window_brightness: 0.0,
            people_density: 0.0,
            particle_intensity: 0.0,
            cloud_count: 0,
            trench: None,
            trend_history: &[],
            sparkline: &[],
            weather_mode: WeatherMode::Auto,
            oracle,
            docs_visible: false,
            selected_building: None,
        }
    }

    #[test]
    fn later_layers_overdraw_earlier_ones() {
        let mut composer = SceneComposer::new();
        composer.add_layer(Box::new(Tag('a')));
        composer.add_layer(Box::new(Tag('b')));

        let oracle = OracleState::default();
        let state = bare_state(&oracle);
        let mut grid = Grid::new(10, 10);
        composer.draw_all(&mut grid, &state, 0);
        assert_eq!(grid.get(0, 0).unwrap().ch, 'b');
    }
}

/// End-to-end scenarios: drive the layers headlessly against synthetic
/// market snapshots and assert on the composed grid.

use trenchscape::art::buildings::{construction, ranked_styles};
use trenchscape::domain::market::{MarketState, Runner, TrenchState};
use trenchscape::domain::weather::{Weather, WeatherParams, WEATHER_ORDER};
use trenchscape::layers::{
    BirdsLayer, BuildingsLayer, CloudsLayer, StreetLayer, TickerLayer, WeatherFxLayer,
};
use trenchscape::sim::feed::baseline_state;
use trenchscape::sim::rng::SceneRng;
use trenchscape::sim::scene::{
    building_slot, Layer, OracleState, SceneState, WeatherMode, GROUND_ROWS, TICKER_ROWS,
};
use trenchscape::ui::grid::Grid;

const COLS: i32 = 160;
const ROWS: i32 = 48;

fn runner(symbol: &str, volume_24h: f64, mcap: f64) -> Runner {
    Runner {
        symbol: symbol.to_string(),
        mint: format!("{}_mint", symbol),
        volume_24h,
        volume_1h: volume_24h / 20.0,
        volume_5m: volume_24h / 200.0,
        pct_change_5m: 1.0,
        pct_change_1h: 5.0,
        mcap,
        fdv: 0.0,
        buys_1h: 100,
        sells_1h: 80,
        age: "2h".to_string(),
        is_new: false,
        is_graduated: false,
        is_rugged: false,
    }
}

fn trench_with(runners: Vec<Runner>) -> TrenchState {
    let mut state = baseline_state();
    state.market = MarketState {
        buy_ratio: 55.0,
        total_volume_5m: 2_000_000.0,
        total_volume_1h: 10_000_000.0,
        launched_today: Some(10_000),
        graduated_today: Some(200),
        grad_rate: Some(2.0),
        weather: Weather::PartlyCloudy,
    };
    state.runners = runners;
    state
}

struct SceneFixture {
    trench: Option<TrenchState>,
    oracle: OracleState,
    weather: Weather,
    window_brightness: f32,
    particle_intensity: f32,
    cloud_count: u32,
}

impl SceneFixture {
    fn new(weather: Weather, trench: Option<TrenchState>) -> Self {
        SceneFixture {
            trench,
            oracle: OracleState::default(),
            weather,
            window_brightness: 1.0,
            particle_intensity: 0.5,
            cloud_count: 2,
        }
    }

    fn state(&self) -> SceneState<'_> {
        SceneState {
            cols: COLS,
            rows: ROWS,
            weather: self.weather,
            ground_rows: GROUND_ROWS,
            street_row: ROWS - GROUND_ROWS - TICKER_ROWS,
            bottom_zone: GROUND_ROWS + TICKER_ROWS,
            car_density: 0.8,
            window_brightness: self.window_brightness,
            people_density: 1.0,
            particle_intensity: self.particle_intensity,
            cloud_count: self.cloud_count,
            trench: self.trench.as_ref(),
            trend_history: &[],
            sparkline: &[],
            weather_mode: WeatherMode::Auto,
            oracle: &self.oracle,
            docs_visible: false,
            selected_building: None,
        }
    }
}

fn cells_above_street(grid: &Grid, street_row: i32) -> usize {
    let mut count = 0;
    for r in 0..street_row {
        for c in 0..grid.cols() {
            if grid.get(c, r).map(|cell| cell.ch != ' ').unwrap_or(false) {
                count += 1;
            }
        }
    }
    count
}

fn non_blank_cells(grid: &Grid) -> usize {
    let mut count = 0;
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.get(c, r).map(|cell| cell.ch != ' ').unwrap_or(false) {
                count += 1;
            }
        }
    }
    count
}

// ── Scenario A: strong buy pressure on real volume ──

#[test]
fn scenario_a_clear_weather_with_active_sky() {
    let demo = baseline_state();
    assert_eq!(demo.market.buy_ratio, 72.0);
    assert_eq!(demo.market.total_volume_5m, 8_400_000.0);
    assert_eq!(
        Weather::classify(demo.market.buy_ratio, demo.market.total_volume_5m),
        Weather::Clear
    );

    // CLEAR parameter bundle: cloud base 1 (±1 variance), full brightness.
    let mut rng = SceneRng::seeded(3, "params");
    let params = WeatherParams::sample(Weather::Clear, &mut rng);
    assert!(params.cloud_count <= 2);
    assert_eq!(params.window_brightness, 1.0);

    // Birds actually show up in a CLEAR sky (target 3).
    let mut fixture = SceneFixture::new(Weather::Clear, Some(demo));
    fixture.cloud_count = params.cloud_count.max(1);
    let mut birds = BirdsLayer::new(SceneRng::seeded(3, "birds"));
    let mut clouds = CloudsLayer::new();
    let mut saw_bird = false;
    let mut saw_cloud = false;
    for tick in 0..600 {
        let mut grid = Grid::new(COLS as usize, ROWS as usize);
        let state = fixture.state();
        clouds.draw(&mut grid, &state, tick);
        saw_cloud |= cells_above_street(&grid, state.street_row) > 0;
        let mut bird_grid = Grid::new(COLS as usize, ROWS as usize);
        birds.draw(&mut bird_grid, &state, tick);
        saw_bird |= cells_above_street(&bird_grid, state.street_row) > 0;
    }
    assert!(saw_cloud, "CLEAR sky should carry at least one cloud");
    assert!(saw_bird, "CLEAR sky should spawn birds");
}

// ── Scenario B: dead market ──

#[test]
fn scenario_b_low_volume_is_always_snow() {
    for ratio in [5.0_f32, 40.0, 55.0, 72.0, 95.0] {
        assert_eq!(Weather::classify(ratio, 100_000.0), Weather::Snow);
    }
}

// ── Scenario C: full monotonic height-to-rank mapping ──

#[test]
fn scenario_c_mcap_rank_maps_to_height() {
    // Volume order is deliberately different from mcap order.
    let mut runners = Vec::new();
    for i in 0..10 {
        let volume = 10_000_000.0 - i as f64 * 500_000.0;
        let mcap = 100_000.0 * (i as f64 + 1.0); // reversed: lowest volume = highest mcap
        runners.push(runner(&format!("TOK{}", i), volume, mcap));
    }
    let trench = trench_with(runners);

    let slot = building_slot();
    let mut layer = BuildingsLayer::new(slot, SceneRng::seeded(1, "buildings"));
    let fixture = SceneFixture::new(Weather::Clear, Some(trench));
    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    layer.draw(&mut grid, &fixture.state(), 1);

    let styles = layer.assigned_styles();
    assert_eq!(styles.len(), 10);

    // Display order is volume order: TOK0 (highest volume, lowest mcap)
    // must get the shortest style; TOK9 the tallest.
    let ranked = ranked_styles();
    assert_eq!(styles[0].height, ranked[9].height);
    assert_eq!(styles[9].height, ranked[0].height);
    // And the full mapping is monotone: higher mcap, taller building.
    for i in 0..10 {
        assert_eq!(styles[i].height, ranked[9 - i].height);
    }
}

// ── Scenario D: new tokens always get the construction style ──

#[test]
fn scenario_d_new_token_overrides_mcap_rank() {
    let mut runners: Vec<Runner> = (0..10)
        .map(|i| {
            runner(
                &format!("TOK{}", i),
                10_000_000.0 - i as f64 * 500_000.0,
                10_000_000.0 - i as f64 * 900_000.0,
            )
        })
        .collect();
    // The highest-mcap runner is brand new.
    runners[0].is_new = true;

    let slot = building_slot();
    let mut layer = BuildingsLayer::new(slot, SceneRng::seeded(2, "buildings"));
    let fixture = SceneFixture::new(Weather::Clear, Some(trench_with(runners)));
    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    layer.draw(&mut grid, &fixture.state(), 1);

    let styles = layer.assigned_styles();
    assert_eq!(styles[0].name, construction().name);
    // Everyone else keeps a regular style.
    assert!(styles[1..].iter().all(|s| s.name != construction().name));
}

// ── Layout rebuild cache ──

#[test]
fn layout_rebuilds_only_when_the_symbol_set_changes() {
    let runners: Vec<Runner> = (0..5)
        .map(|i| runner(&format!("TOK{}", i), 1_000_000.0 - i as f64 * 1_000.0, 500_000.0))
        .collect();
    let trench = trench_with(runners.clone());

    let slot = building_slot();
    let mut layer = BuildingsLayer::new(slot, SceneRng::seeded(3, "buildings"));
    let fixture = SceneFixture::new(Weather::Clear, Some(trench));

    for tick in 0..100 {
        let mut grid = Grid::new(COLS as usize, ROWS as usize);
        layer.draw(&mut grid, &fixture.state(), tick);
    }
    assert_eq!(layer.rebuild_count(), 1);

    // Changing one symbol triggers exactly one more rebuild.
    let mut changed = runners;
    changed[2].symbol = "SWAPPED".to_string();
    let fixture2 = SceneFixture::new(Weather::Clear, Some(trench_with(changed)));
    for tick in 100..200 {
        let mut grid = Grid::new(COLS as usize, ROWS as usize);
        layer.draw(&mut grid, &fixture2.state(), tick);
    }
    assert_eq!(layer.rebuild_count(), 2);
}

// ── Rug-sink animation ──

#[test]
fn rugged_building_fully_submerges() {
    let mut rugged = runner("RUGGED", 1_000_000.0, 500_000.0);
    rugged.is_rugged = true;
    let trench = trench_with(vec![rugged]);

    let slot = building_slot();
    let mut layer = BuildingsLayer::new(slot, SceneRng::seeded(4, "buildings"));
    let fixture = SceneFixture::new(Weather::Clear, Some(trench));

    // Single runner: mcap rank 0, so the tallest style.
    let height = ranked_styles()[0].height;
    let submerged_at = 15 * (height as u64 + 3);

    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    for tick in 1..submerged_at {
        grid.clear();
        layer.draw(&mut grid, &fixture.state(), tick);
    }
    // One tick before the threshold something of the facade remains.
    assert!(non_blank_cells(&grid) > 0);

    for tick in submerged_at..submerged_at + 10 {
        grid.clear();
        layer.draw(&mut grid, &fixture.state(), tick);
        assert_eq!(non_blank_cells(&grid), 0, "building still rendered at tick {}", tick);
    }
}

// ── Demo skyline fallback ──

#[test]
fn no_data_draws_the_demo_skyline_and_publishes_positions() {
    let slot = building_slot();
    let mut layer = BuildingsLayer::new(slot.clone(), SceneRng::seeded(5, "buildings"));
    let fixture = SceneFixture::new(Weather::Clear, None);

    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    layer.draw(&mut grid, &fixture.state(), 10);

    assert!(cells_above_street(&grid, fixture.state().street_row) > 100);
    let positions = slot.borrow();
    assert_eq!(positions.len(), ranked_styles().len());
    // Positions are laid out left to right without overlap.
    for pair in positions.windows(2) {
        assert!(pair[0].col + pair[0].width < pair[1].col + pair[1].width);
        assert!(pair[0].col < pair[1].col);
    }
}

#[test]
fn demo_flicker_is_deterministic_across_instances() {
    let fixture = SceneFixture::new(Weather::Clear, None);

    let mut a = BuildingsLayer::new(building_slot(), SceneRng::seeded(1, "a"));
    let mut b = BuildingsLayer::new(building_slot(), SceneRng::seeded(99, "b"));

    for tick in [0, 17, 58, 123] {
        let mut grid_a = Grid::new(COLS as usize, ROWS as usize);
        let mut grid_b = Grid::new(COLS as usize, ROWS as usize);
        a.draw(&mut grid_a, &fixture.state(), tick);
        b.draw(&mut grid_b, &fixture.state(), tick);
        for r in 0..ROWS {
            for c in 0..COLS {
                assert_eq!(grid_a.get(c, r), grid_b.get(c, r), "mismatch at ({}, {})", c, r);
            }
        }
    }
}

// ── Street ──

#[test]
fn street_paints_sidewalk_and_ground_texture() {
    let slot = building_slot();
    let mut buildings = BuildingsLayer::new(slot.clone(), SceneRng::seeded(6, "buildings"));
    let mut street = StreetLayer::new(slot.clone(), SceneRng::seeded(6, "street"));
    let fixture = SceneFixture::new(Weather::Clear, None);

    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    let state = fixture.state();
    buildings.draw(&mut grid, &state, 1);
    street.draw(&mut grid, &state, 1);

    for c in 0..COLS {
        // Sidewalk row: pavement, or a lamp's glow pool.
        let base = grid.get(c, state.street_row).unwrap();
        assert!(base.ch != ' ', "bare sidewalk at col {}", c);
        // Texture row only carries its fixed glyph set.
        let ground = grid.get(c, state.street_row + 3).unwrap();
        assert!(matches!(ground.ch, '^' | '.' | '*'), "unexpected ground glyph {:?}", ground.ch);
    }
}

#[test]
fn street_weather_swaps_trees_for_winter() {
    // Trees are placed in building gaps; with no buildings the layout
    // spreads across the width, so a tree is guaranteed.
    let slot = building_slot();
    let mut street = StreetLayer::new(slot, SceneRng::seeded(7, "street"));

    let snow_fixture = SceneFixture::new(Weather::Snow, None);
    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    let state = snow_fixture.state();
    street.draw(&mut grid, &state, 1);

    // Winter trees have no foliage glyphs ('%' or '@').
    let mut foliage = 0;
    for r in 0..state.street_row {
        for c in 0..COLS {
            let ch = grid.get(c, r).unwrap().ch;
            if ch == '%' || ch == '@' {
                foliage += 1;
            }
        }
    }
    assert_eq!(foliage, 0, "snow scene should use bare trees");
}

// ── Weather effects ──

#[test]
fn rain_never_crosses_the_street_row() {
    let mut fx = WeatherFxLayer::new(SceneRng::seeded(8, "weather"));
    let fixture = SceneFixture::new(Weather::Rain, None);

    for tick in 0..300 {
        let mut grid = Grid::new(COLS as usize, ROWS as usize);
        let state = fixture.state();
        fx.draw(&mut grid, &state, tick);
        for r in state.street_row..ROWS {
            for c in 0..COLS {
                let ch = grid.get(c, r).unwrap().ch;
                assert!(ch == ' ', "rain glyph {:?} below street at row {}", ch, r);
            }
        }
    }
}

#[test]
fn weather_change_clears_precipitation() {
    let mut fx = WeatherFxLayer::new(SceneRng::seeded(9, "weather"));
    let rain = SceneFixture::new(Weather::Rain, None);
    for tick in 0..60 {
        let mut grid = Grid::new(COLS as usize, ROWS as usize);
        fx.draw(&mut grid, &rain.state(), tick);
    }

    // Switch to CLEAR: the very next frame must be empty.
    let clear = SceneFixture::new(Weather::Clear, None);
    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    fx.draw(&mut grid, &clear.state(), 61);
    assert_eq!(cells_above_street(&grid, clear.state().street_row), 0);
}

// ── Determinism ──

#[test]
fn same_seed_reproduces_the_same_skyline_animation() {
    let runners: Vec<Runner> = (0..8)
        .map(|i| runner(&format!("TOK{}", i), 5_000_000.0 - i as f64 * 100_000.0, 300_000.0 * (i as f64 + 1.0)))
        .collect();
    let fixture = SceneFixture::new(Weather::Clear, Some(trench_with(runners)));

    let mut a = BuildingsLayer::new(building_slot(), SceneRng::seeded(42, "buildings"));
    let mut b = BuildingsLayer::new(building_slot(), SceneRng::seeded(42, "buildings"));

    for tick in 0..120 {
        let mut grid_a = Grid::new(COLS as usize, ROWS as usize);
        let mut grid_b = Grid::new(COLS as usize, ROWS as usize);
        a.draw(&mut grid_a, &fixture.state(), tick);
        b.draw(&mut grid_b, &fixture.state(), tick);
        for r in 0..ROWS {
            for c in 0..COLS {
                assert_eq!(grid_a.get(c, r), grid_b.get(c, r));
            }
        }
    }
}

// ── Ticker ──

#[test]
fn ticker_buffer_reaches_double_viewport_width() {
    let fixture = SceneFixture::new(Weather::Clear, Some(baseline_state()));
    let state = fixture.state();
    let buffer = TickerLayer::build_buffer(&state);
    assert!(buffer.len() as i32 >= state.cols * 2);
}

#[test]
fn ticker_paints_the_full_bottom_row() {
    let mut ticker = TickerLayer::new();
    let fixture = SceneFixture::new(Weather::Clear, None);
    let mut grid = Grid::new(COLS as usize, ROWS as usize);
    ticker.draw(&mut grid, &fixture.state(), 3);

    for c in 0..COLS {
        let cell = grid.get(c, ROWS - 1).unwrap();
        assert!(cell.bg.is_some(), "ticker row missing background at col {}", c);
    }
}

// ── Cycle closure (restated end to end) ──

#[test]
fn manual_cycle_visits_every_weather_once() {
    let mut seen = Vec::new();
    let mut w = Weather::Clear;
    for _ in 0..WEATHER_ORDER.len() {
        seen.push(w);
        w = w.cycle();
    }
    assert_eq!(w, Weather::Clear);
    for expected in WEATHER_ORDER {
        assert!(seen.contains(&expected));
    }
}

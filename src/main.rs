/// Entry point and frame loop: assembles the scene each tick, feeds it
/// market snapshots, and blits the grid to the terminal.

use std::error::Error;
use std::thread;
use std::time::Duration;

use crossterm::event::KeyCode;

use trenchscape::config::ForecastConfig;
use trenchscape::domain::market::{now_ms, TrenchState, TrendSnapshot};
use trenchscape::domain::weather::{Weather, WeatherParams};
use trenchscape::layers::oracle::{compose_reading, COOLDOWN_READING, NO_DATA_READING};
use trenchscape::layers::{
    BannerPlaneLayer, BirdsLayer, BuildingsLayer, CloudsLayer, DocsOverlayLayer, FireworksLayer,
    HotTokensPanelLayer, MetricsPanelLayer, MoonLayer, OracleOverlayLayer, ShootingStarsLayer,
    StarsLayer, StreetLayer, TickerLayer, TokenDetailLayer, WeatherFxLayer,
};
use trenchscape::sim::clock::FrameClock;
use trenchscape::sim::feed::{MockSource, Poller};
use trenchscape::sim::rng::SceneRng;
use trenchscape::sim::scene::{
    building_slot, OracleState, SceneComposer, SceneState, WeatherMode, GROUND_ROWS, TICKER_ROWS,
};
use trenchscape::sim::store;
use trenchscape::ui::grid::Grid;
use trenchscape::ui::input::InputState;
use trenchscape::ui::screen::Screen;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

const MAX_TREND_SNAPSHOTS: usize = 4;
const TREND_INTERVAL_MS: u64 = 15 * 60 * 1000;
const MAX_SPARKLINE_POINTS: usize = store::MAX_POINTS;
const SPARKLINE_INTERVAL_MS: u64 = 5 * 60 * 1000;
/// Dense collection until the sparkline has a usable shape.
const SPARKLINE_WARMUP_MS: u64 = 30_000;
const ORACLE_COOLDOWN_MS: u64 = 30_000;
const ORACLE_CACHE_TTL_MS: u64 = 60_000;
/// Ticks of the reading animation before the oracle answers.
const ORACLE_LOADING_TICKS: u64 = 45;

fn main() {
    let config = ForecastConfig::load();

    let mut screen = Screen::new();
    if let Err(e) = screen.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = run(&mut screen, &config);

    if let Err(e) = screen.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Renderer error: {e}");
    }
}

// ── Host state carried across ticks ──

struct Host {
    weather: Weather,
    mode: WeatherMode,
    params: WeatherParams,
    trench: Option<TrenchState>,
    data_enabled: bool,
    trend: Vec<TrendSnapshot>,
    last_trend_ms: u64,
    sparkline: Vec<f32>,
    last_spark_ms: u64,
    oracle: OracleState,
    oracle_ready_tick: Option<u64>,
    oracle_last_call_tick: Option<u64>,
    oracle_cache: Option<(String, u64)>,
    docs_visible: bool,
    selected: Option<usize>,
    rng: SceneRng,
}

impl Host {
    fn new(config: &ForecastConfig, master_seed: u64) -> Self {
        let mut rng = SceneRng::seeded(master_seed, "host");
        let (weather, mode) = match config.weather_override {
            Some(w) => (w, WeatherMode::Manual),
            None => (Weather::Clear, WeatherMode::Auto),
        };
        let params = WeatherParams::sample(weather, &mut rng);
        Host {
            weather,
            mode,
            params,
            trench: None,
            data_enabled: config.data_enabled,
            trend: Vec::new(),
            last_trend_ms: 0,
            sparkline: Vec::new(),
            last_spark_ms: 0,
            oracle: OracleState::default(),
            oracle_ready_tick: None,
            oracle_last_call_tick: None,
            oracle_cache: None,
            docs_visible: false,
            selected: None,
            rng,
        }
    }

    /// Last-writer-wins adoption of a fresh snapshot, plus the rolling
    /// trend and sparkline bookkeeping that hangs off each poll.
    fn adopt(&mut self, state: TrenchState) {
        let now = now_ms();

        if self.mode == WeatherMode::Auto {
            self.weather = state.market.weather;
        }

        if now.saturating_sub(self.last_trend_ms) >= TREND_INTERVAL_MS || self.last_trend_ms == 0 {
            self.last_trend_ms = now;
            self.trend.push(TrendSnapshot {
                timestamp_ms: now,
                buy_ratio: state.market.buy_ratio,
                volume_5m: state.market.total_volume_5m,
                weather: state.market.weather,
            });
            let overflow = self.trend.len().saturating_sub(MAX_TREND_SNAPSHOTS);
            if overflow > 0 {
                self.trend.drain(..overflow);
            }
        }

        if self.sparkline.is_empty() {
            // First data: restore the session history, or synthesize a
            // plausible seed series around the current value.
            if let Some(cached) = store::load_sparkline() {
                self.sparkline = cached;
            } else {
                let base = state.market.buy_ratio;
                for _ in 0..5 {
                    self.sparkline
                        .push((base + self.rng.range_f32(-3.0, 3.0)).clamp(0.0, 100.0));
                }
                self.sparkline.push(base);
            }
            self.last_spark_ms = now;
        } else {
            let interval = if self.sparkline.len() < 6 {
                SPARKLINE_WARMUP_MS
            } else {
                SPARKLINE_INTERVAL_MS
            };
            if now.saturating_sub(self.last_spark_ms) >= interval {
                self.last_spark_ms = now;
                self.sparkline.push(state.market.buy_ratio);
                let overflow = self.sparkline.len().saturating_sub(MAX_SPARKLINE_POINTS);
                if overflow > 0 {
                    self.sparkline.drain(..overflow);
                }
                store::save_sparkline(&self.sparkline);
            }
        }

        self.trench = Some(state);
    }

    /// [I]: toggle the oracle overlay, with cooldown and a short cache.
    fn toggle_oracle(&mut self, tick: u64, cooldown_ticks: u64, cache_ticks: u64) {
        if self.oracle.visible {
            self.oracle = OracleState::default();
            self.oracle_ready_tick = None;
            return;
        }

        if let Some(last) = self.oracle_last_call_tick {
            if tick.saturating_sub(last) < cooldown_ticks {
                self.oracle = OracleState {
                    visible: true,
                    loading: false,
                    reading: Some(COOLDOWN_READING.to_string()),
                };
                return;
            }
        }

        if let Some((reading, cached_at)) = &self.oracle_cache {
            if tick.saturating_sub(*cached_at) < cache_ticks {
                self.oracle = OracleState {
                    visible: true,
                    loading: false,
                    reading: Some(reading.clone()),
                };
                return;
            }
        }

        if self.trench.is_none() {
            self.oracle = OracleState {
                visible: true,
                loading: false,
                reading: Some(NO_DATA_READING.to_string()),
            };
            return;
        }

        self.oracle = OracleState {
            visible: true,
            loading: true,
            reading: None,
        };
        self.oracle_last_call_tick = Some(tick);
        self.oracle_ready_tick = Some(tick + ORACLE_LOADING_TICKS);
    }

    /// Resolve a pending oracle reading once the loading delay elapses.
    fn tick_oracle(&mut self, tick: u64) {
        if !self.oracle.loading {
            return;
        }
        if let Some(ready) = self.oracle_ready_tick {
            if tick >= ready {
                let reading = match &self.trench {
                    Some(state) => compose_reading(state),
                    None => NO_DATA_READING.to_string(),
                };
                self.oracle_cache = Some((reading.clone(), tick));
                self.oracle = OracleState {
                    visible: true,
                    loading: false,
                    reading: Some(reading),
                };
                self.oracle_ready_tick = None;
            }
        }
    }

    /// [←]/[→]: move the building selection, deselecting past the edges.
    fn move_selection(&mut self, right: bool) {
        let count = match &self.trench {
            Some(t) if !t.runners.is_empty() => t.runners.len().min(10),
            _ => return,
        };
        let max_idx = count - 1;

        self.selected = match (self.selected, right) {
            (None, true) => Some(0),
            (Some(i), true) if i >= max_idx => None,
            (Some(i), true) => Some(i + 1),
            (None, false) => Some(max_idx),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }
}

fn run(screen: &mut Screen, config: &ForecastConfig) -> Result<(), Box<dyn Error>> {
    let master_seed = if config.seed != 0 {
        config.seed
    } else {
        rand::random()
    };

    let slot = building_slot();
    let mut composer = SceneComposer::new();
    composer.add_layer(Box::new(StarsLayer::new(SceneRng::seeded(master_seed, "stars"))));
    composer.add_layer(Box::new(MoonLayer::new()));
    composer.add_layer(Box::new(BannerPlaneLayer::new(SceneRng::seeded(master_seed, "banner"))));
    composer.add_layer(Box::new(CloudsLayer::new()));
    composer.add_layer(Box::new(ShootingStarsLayer::new(SceneRng::seeded(master_seed, "shooting"))));
    composer.add_layer(Box::new(FireworksLayer::new(SceneRng::seeded(master_seed, "fireworks"))));
    composer.add_layer(Box::new(BirdsLayer::new(SceneRng::seeded(master_seed, "birds"))));
    composer.add_layer(Box::new(BuildingsLayer::new(
        slot.clone(),
        SceneRng::seeded(master_seed, "buildings"),
    )));
    composer.add_layer(Box::new(StreetLayer::new(
        slot.clone(),
        SceneRng::seeded(master_seed, "street"),
    )));
    composer.add_layer(Box::new(WeatherFxLayer::new(SceneRng::seeded(master_seed, "weather"))));
    composer.add_layer(Box::new(MetricsPanelLayer::new()));
    composer.add_layer(Box::new(HotTokensPanelLayer::new()));
    composer.add_layer(Box::new(TickerLayer::new()));
    composer.add_layer(Box::new(TokenDetailLayer::new(slot.clone())));
    composer.add_layer(Box::new(OracleOverlayLayer::new()));
    composer.add_layer(Box::new(DocsOverlayLayer::new()));

    let mut host = Host::new(config, master_seed);
    let mut poller = Poller::new(
        MockSource::new(SceneRng::seeded(master_seed, "feed")),
        config.poll_secs * 1000 / config.tick_ms,
    );
    let cooldown_ticks = ORACLE_COOLDOWN_MS / config.tick_ms;
    let cache_ticks = ORACLE_CACHE_TTL_MS / config.tick_ms;

    let (cols, rows) = screen.sync_size()?;
    let mut grid = Grid::new(cols, rows);
    let mut input = InputState::new();
    let mut clock = FrameClock::new(config.tick_ms);
    clock.start();

    loop {
        input.drain_events();
        if input.ctrl_c_pressed()
            || input.any_pressed(&[KeyCode::Char('q'), KeyCode::Char('Q')])
        {
            break;
        }
        handle_keys(&mut host, &mut poller, &input, clock.tick(), cooldown_ticks, cache_ticks);

        if let Some(tick) = clock.poll_tick() {
            // Polling and render never share a partially written
            // snapshot: the reference is replaced wholesale here.
            if host.data_enabled {
                if let Some(state) = poller.poll(tick) {
                    host.adopt(state);
                }
            }
            host.tick_oracle(tick);

            // Weather transitions resample the parameter bundle.
            if host.params.weather != host.weather {
                host.params = WeatherParams::sample(host.weather, &mut host.rng);
            }

            let (cols, rows) = screen.sync_size()?;
            if cols as i32 != grid.cols() || rows as i32 != grid.rows() {
                grid.resize(cols, rows);
            }

            let street_row = grid.rows() - GROUND_ROWS - TICKER_ROWS;
            let state = SceneState {
                cols: grid.cols(),
                rows: grid.rows(),
                weather: host.weather,
                ground_rows: GROUND_ROWS,
                street_row,
                bottom_zone: GROUND_ROWS + TICKER_ROWS,
                car_density: host.params.car_density,
                window_brightness: host.params.window_brightness,
                people_density: host.params.people_density,
                particle_intensity: host.params.particle_intensity,
                cloud_count: host.params.cloud_count,
                trench: host.trench.as_ref(),
                trend_history: &host.trend,
                sparkline: if host.sparkline.len() >= 2 { &host.sparkline } else { &[] },
                weather_mode: host.mode,
                oracle: &host.oracle,
                docs_visible: host.docs_visible,
                selected_building: host.selected,
            };

            grid.clear();
            composer.draw_all(&mut grid, &state, tick);
            screen.render(&grid)?;
        }

        thread::sleep(FRAME_SLEEP);
    }

    if host.sparkline.len() >= 2 {
        store::save_sparkline(&host.sparkline);
    }

    Ok(())
}

fn handle_keys(
    host: &mut Host,
    poller: &mut Poller<MockSource>,
    input: &InputState,
    tick: u64,
    cooldown_ticks: u64,
    cache_ticks: u64,
) {
    // [?] docs toggle.
    if input.was_pressed(KeyCode::Char('?')) {
        host.docs_visible = !host.docs_visible;
        return;
    }

    // [I] oracle toggle.
    if input.any_pressed(&[KeyCode::Char('i'), KeyCode::Char('I')]) {
        host.toggle_oracle(tick, cooldown_ticks, cache_ticks);
        return;
    }

    // ESC closes the topmost thing: docs, then oracle, then selection.
    if input.was_pressed(KeyCode::Esc) {
        if host.docs_visible {
            host.docs_visible = false;
        } else if host.oracle.visible {
            host.oracle = OracleState::default();
            host.oracle_ready_tick = None;
        } else if host.selected.is_some() {
            host.selected = None;
        }
        return;
    }

    // Other keys are inert while an overlay is open.
    if host.docs_visible || host.oracle.visible {
        return;
    }

    if input.was_pressed(KeyCode::Left) {
        host.move_selection(false);
    }
    if input.was_pressed(KeyCode::Right) {
        host.move_selection(true);
    }

    // [W] cycle weather, pinning manual mode.
    if input.any_pressed(&[KeyCode::Char('w'), KeyCode::Char('W')]) {
        host.weather = host.weather.cycle();
        host.mode = WeatherMode::Manual;
    }

    // [A] toggle auto/manual; auto re-adopts the feed's classification.
    if input.any_pressed(&[KeyCode::Char('a'), KeyCode::Char('A')]) {
        host.mode = match host.mode {
            WeatherMode::Auto => WeatherMode::Manual,
            WeatherMode::Manual => {
                if let Some(t) = &host.trench {
                    host.weather = t.market.weather;
                }
                WeatherMode::Auto
            }
        };
    }

    // [D] toggle the data feed.
    if input.any_pressed(&[KeyCode::Char('d'), KeyCode::Char('D')]) {
        host.data_enabled = !host.data_enabled;
        if host.data_enabled {
            poller.force_next();
        } else {
            host.trench = None;
            host.selected = None;
        }
    }
}

/// Market data feed. The real aggregation pipeline lives behind an HTTP
/// endpoint and is out of scope here; `MarketSource` is the seam, and
/// `MockSource` stands in with the demo dataset, evolved a little on
/// every fetch so the townscape stays alive: sentiment drifts, volumes
/// breathe, tokens graduate and fresh ones launch.

use std::error::Error;
use std::fmt;

use crate::domain::market::{
    now_ms, EventKind, HotToken, MajorPrices, MarketState, Runner, TrenchEvent, TrenchState,
};
use crate::domain::weather::Weather;
use crate::sim::rng::SceneRng;

#[derive(Debug)]
pub struct FeedError(pub String);

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feed error: {}", self.0)
    }
}

impl Error for FeedError {}

pub trait MarketSource {
    fn fetch(&mut self) -> Result<TrenchState, FeedError>;
}

// ── Mock source ──

struct SeedRunner {
    symbol: &'static str,
    mint: &'static str,
    volume_24h: f64,
    volume_1h: f64,
    pct_change_5m: f32,
    pct_change_1h: f32,
    mcap: f64,
    buys_1h: u32,
    sells_1h: u32,
    age: &'static str,
    is_new: bool,
    is_rugged: bool,
}

const SEED_RUNNERS: [SeedRunner; 10] = [
    SeedRunner { symbol: "MOONDOG", mint: "moon1", volume_24h: 8_200_000.0, volume_1h: 1_200_000.0, pct_change_5m: 12.4, pct_change_1h: 34.2, mcap: 4_500_000.0, buys_1h: 340, sells_1h: 120, age: "6h", is_new: false, is_rugged: false },
    SeedRunner { symbol: "GROK", mint: "grok1", volume_24h: 3_100_000.0, volume_1h: 890_000.0, pct_change_5m: -3.2, pct_change_1h: -8.1, mcap: 12_000_000.0, buys_1h: 210, sells_1h: 180, age: "2d", is_new: false, is_rugged: false },
    SeedRunner { symbol: "CATGPT", mint: "cat1", volume_24h: 1_800_000.0, volume_1h: 445_000.0, pct_change_5m: 45.1, pct_change_1h: 128.0, mcap: 800_000.0, buys_1h: 520, sells_1h: 90, age: "45m", is_new: true, is_rugged: false },
    SeedRunner { symbol: "SOLDOG", mint: "sol1", volume_24h: 950_000.0, volume_1h: 320_000.0, pct_change_5m: -8.7, pct_change_1h: -12.3, mcap: 2_100_000.0, buys_1h: 80, sells_1h: 190, age: "1d", is_new: false, is_rugged: false },
    SeedRunner { symbol: "PEPE2", mint: "pepe1", volume_24h: 620_000.0, volume_1h: 180_000.0, pct_change_5m: 2.3, pct_change_1h: 15.4, mcap: 950_000.0, buys_1h: 150, sells_1h: 140, age: "4h", is_new: false, is_rugged: false },
    SeedRunner { symbol: "BONK3", mint: "bonk1", volume_24h: 410_000.0, volume_1h: 95_000.0, pct_change_5m: -1.1, pct_change_1h: 8.2, mcap: 500_000.0, buys_1h: 100, sells_1h: 105, age: "8h", is_new: false, is_rugged: false },
    SeedRunner { symbol: "RUGME", mint: "rug1", volume_24h: 180_000.0, volume_1h: 60_000.0, pct_change_5m: -42.0, pct_change_1h: -67.0, mcap: 50_000.0, buys_1h: 10, sells_1h: 300, age: "20m", is_new: false, is_rugged: true },
    SeedRunner { symbol: "FREN", mint: "fren1", volume_24h: 90_000.0, volume_1h: 40_000.0, pct_change_5m: 5.5, pct_change_1h: 23.0, mcap: 120_000.0, buys_1h: 60, sells_1h: 30, age: "3h", is_new: false, is_rugged: false },
    SeedRunner { symbol: "WIZDOG", mint: "wiz1", volume_24h: 75_000.0, volume_1h: 28_000.0, pct_change_5m: 8.3, pct_change_1h: 42.0, mcap: 85_000.0, buys_1h: 45, sells_1h: 20, age: "2h", is_new: false, is_rugged: false },
    SeedRunner { symbol: "PUMPCAT", mint: "pump1", volume_24h: 55_000.0, volume_1h: 15_000.0, pct_change_5m: -2.0, pct_change_1h: 11.5, mcap: 65_000.0, buys_1h: 35, sells_1h: 28, age: "5h", is_new: false, is_rugged: false },
];

const LAUNCH_SYMBOLS: [&str; 8] = [
    "DOGWIF", "PONKE", "MEWING", "GIGACHAD", "SLOP", "BASEDCAT", "WAGMI2", "NGMI",
];

pub struct MockSource {
    state: TrenchState,
    rng: SceneRng,
    launch_counter: u32,
}

impl MockSource {
    pub fn new(rng: SceneRng) -> Self {
        MockSource {
            state: baseline_state(),
            rng,
            launch_counter: 0,
        }
    }

    fn drift(&mut self) {
        let market = &mut self.state.market;
        market.buy_ratio = (market.buy_ratio + self.rng.range_f32(-4.0, 4.0)).clamp(20.0, 85.0);
        market.total_volume_5m = (market.total_volume_5m * self.rng.range_f32(0.9, 1.15) as f64)
            .max(150_000.0);
        market.total_volume_1h =
            (market.total_volume_1h * self.rng.range_f32(0.95, 1.08) as f64).max(1_000_000.0);
        if let Some(launched) = &mut market.launched_today {
            *launched += self.rng.range_i32(3, 40) as u32;
        }
        market.weather = Weather::classify(market.buy_ratio, market.total_volume_5m);

        for runner in &mut self.state.runners {
            runner.pct_change_5m += self.rng.range_f32(-6.0, 6.0);
            runner.pct_change_1h =
                (runner.pct_change_1h + self.rng.range_f32(-5.0, 5.0)).clamp(-95.0, 400.0);
            runner.volume_24h = (runner.volume_24h * self.rng.range_f32(0.95, 1.07) as f64).max(10_000.0);
            runner.mcap = (runner.mcap * self.rng.range_f32(0.93, 1.1) as f64).max(20_000.0);
        }

        // Occasionally a token completes its bonding curve.
        if self.rng.chance(0.08) {
            if let Some(runner) = self
                .state
                .runners
                .iter_mut()
                .find(|r| !r.is_graduated && !r.is_rugged && r.cap() > 500_000.0)
            {
                runner.is_graduated = true;
                runner.is_new = false;
                let text = format!("${} graduated to PumpSwap", runner.symbol);
                push_event(&mut self.state.events, EventKind::Graduation, text);
                if let Some(grads) = &mut self.state.market.graduated_today {
                    *grads += 1;
                }
            }
        }

        // And occasionally a fresh launch replaces the quietest runner.
        if self.rng.chance(0.06) {
            let symbol = LAUNCH_SYMBOLS[self.launch_counter as usize % LAUNCH_SYMBOLS.len()];
            self.launch_counter += 1;
            let mint = format!("launch{}", self.launch_counter);
            let fresh = Runner {
                symbol: symbol.to_string(),
                mint,
                volume_24h: self.rng.range_f32(40_000.0, 120_000.0) as f64,
                volume_1h: self.rng.range_f32(10_000.0, 50_000.0) as f64,
                volume_5m: self.rng.range_f32(2_000.0, 15_000.0) as f64,
                pct_change_5m: self.rng.range_f32(5.0, 80.0),
                pct_change_1h: self.rng.range_f32(10.0, 150.0),
                mcap: self.rng.range_f32(30_000.0, 90_000.0) as f64,
                fdv: 0.0,
                buys_1h: self.rng.range_i32(30, 120) as u32,
                sells_1h: self.rng.range_i32(5, 40) as u32,
                age: "5m".to_string(),
                is_new: true,
                is_graduated: false,
                is_rugged: false,
            };
            if let Some(quietest) = self
                .state
                .runners
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.volume_24h.total_cmp(&b.volume_24h))
                .map(|(i, _)| i)
            {
                let text = format!("${} launched on Pump.fun", fresh.symbol);
                self.state.runners[quietest] = fresh;
                push_event(&mut self.state.events, EventKind::NewLaunch, text);
            }
        }

        // Grad rate follows the counters.
        let market = &mut self.state.market;
        if let (Some(launched), Some(grads)) = (market.launched_today, market.graduated_today) {
            if launched > 0 {
                market.grad_rate = Some((grads as f32 / launched as f32 * 1000.0).round() / 10.0);
            }
        }

        // Keep the hot list in step with the runners.
        self.state.hot_tokens = self
            .state
            .runners
            .iter()
            .take(8)
            .map(|r| HotToken {
                symbol: r.symbol.clone(),
                pct_change_1h: r.pct_change_1h,
                volume_1h: r.volume_1h,
            })
            .collect();
    }
}

fn push_event(events: &mut Vec<TrenchEvent>, kind: EventKind, text: String) {
    events.insert(0, TrenchEvent { kind, text, timestamp_ms: now_ms() });
    events.truncate(8);
}

impl MarketSource for MockSource {
    fn fetch(&mut self) -> Result<TrenchState, FeedError> {
        self.drift();
        Ok(self.state.clone())
    }
}

/// The canonical demo snapshot.
pub fn baseline_state() -> TrenchState {
    let now = now_ms();
    let runners = SEED_RUNNERS
        .iter()
        .map(|s| Runner {
            symbol: s.symbol.to_string(),
            mint: s.mint.to_string(),
            volume_24h: s.volume_24h,
            volume_1h: s.volume_1h,
            volume_5m: s.volume_1h / 12.0,
            pct_change_5m: s.pct_change_5m,
            pct_change_1h: s.pct_change_1h,
            mcap: s.mcap,
            fdv: 0.0,
            buys_1h: s.buys_1h,
            sells_1h: s.sells_1h,
            age: s.age.to_string(),
            is_new: s.is_new,
            is_graduated: false,
            is_rugged: s.is_rugged,
        })
        .collect::<Vec<_>>();

    let hot_tokens = runners
        .iter()
        .take(8)
        .map(|r| HotToken {
            symbol: r.symbol.clone(),
            pct_change_1h: r.pct_change_1h,
            volume_1h: r.volume_1h,
        })
        .collect();

    let events = vec![
        TrenchEvent { kind: EventKind::Graduation, text: "$MOONDOG graduated to PumpSwap".into(), timestamp_ms: now.saturating_sub(60_000) },
        TrenchEvent { kind: EventKind::Alert, text: "Volume spike: $MOONDOG +340% in 5m".into(), timestamp_ms: now.saturating_sub(120_000) },
        TrenchEvent { kind: EventKind::NewLaunch, text: "$CATGPT launched on Pump.fun".into(), timestamp_ms: now.saturating_sub(300_000) },
        TrenchEvent { kind: EventKind::Rug, text: "$RUGME dev dumped 100% - RIP".into(), timestamp_ms: now.saturating_sub(600_000) },
        TrenchEvent { kind: EventKind::Graduation, text: "$GROK graduated to Raydium".into(), timestamp_ms: now.saturating_sub(900_000) },
        TrenchEvent { kind: EventKind::Alert, text: "14,847 launched \u{2014} 2.1% grad rate".into(), timestamp_ms: now.saturating_sub(1_200_000) },
    ];

    TrenchState {
        market: MarketState {
            buy_ratio: 72.0,
            total_volume_5m: 8_400_000.0,
            total_volume_1h: 42_000_000.0,
            launched_today: Some(14_847),
            graduated_today: Some(312),
            grad_rate: Some(2.1),
            weather: Weather::Clear,
        },
        runners,
        hot_tokens,
        events,
        prices: Some(MajorPrices {
            btc_usd: 97_420.0,
            btc_change_24h: 1.8,
            sol_usd: 188.45,
            sol_change_24h: -2.3,
        }),
    }
}

// ── Poller ──

/// Tick-cadenced polling wrapper. Fetch failures never interrupt the
/// render loop: the previous snapshot stays live and the error hook
/// records what happened for the next successful poll to supersede.
pub struct Poller<S: MarketSource> {
    source: S,
    interval_ticks: u64,
    last_poll: Option<u64>,
    pub errors: u32,
    pub last_error: Option<String>,
}

impl<S: MarketSource> Poller<S> {
    pub fn new(source: S, interval_ticks: u64) -> Self {
        Poller {
            source,
            interval_ticks: interval_ticks.max(1),
            last_poll: None,
            errors: 0,
            last_error: None,
        }
    }

    /// Force the next `poll` call to fetch regardless of cadence.
    pub fn force_next(&mut self) {
        self.last_poll = None;
    }

    /// Fetch when due. Returns a fresh snapshot or `None` (not due yet,
    /// or the fetch failed and was absorbed).
    pub fn poll(&mut self, tick: u64) -> Option<TrenchState> {
        let due = match self.last_poll {
            None => true,
            Some(last) => tick.saturating_sub(last) >= self.interval_ticks,
        };
        if !due {
            return None;
        }
        self.last_poll = Some(tick);

        match self.source.fetch() {
            Ok(state) => Some(state),
            Err(e) => {
                self.errors += 1;
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakySource {
        calls: u32,
    }

    impl MarketSource for FlakySource {
        fn fetch(&mut self) -> Result<TrenchState, FeedError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(FeedError("upstream 502".into()))
            } else {
                Ok(baseline_state())
            }
        }
    }

    #[test]
    fn baseline_matches_demo_dataset() {
        let state = baseline_state();
        assert_eq!(state.runners.len(), 10);
        assert_eq!(state.market.buy_ratio, 72.0);
        assert_eq!(state.market.weather, Weather::Clear);
        assert!(state.runners.iter().any(|r| r.is_new));
        assert!(state.runners.iter().any(|r| r.is_rugged));
    }

    #[test]
    fn mock_source_keeps_ten_runners() {
        let mut source = MockSource::new(SceneRng::seeded(5, "feed"));
        for _ in 0..50 {
            let state = source.fetch().unwrap();
            assert_eq!(state.runners.len(), 10);
            assert!(state.market.buy_ratio >= 20.0 && state.market.buy_ratio <= 85.0);
        }
    }

    #[test]
    fn mock_source_weather_tracks_classifier() {
        let mut source = MockSource::new(SceneRng::seeded(11, "feed"));
        for _ in 0..20 {
            let state = source.fetch().unwrap();
            assert_eq!(
                state.market.weather,
                Weather::classify(state.market.buy_ratio, state.market.total_volume_5m)
            );
        }
    }

    #[test]
    fn poller_respects_cadence() {
        let mut poller = Poller::new(MockSource::new(SceneRng::seeded(1, "feed")), 10);
        assert!(poller.poll(1).is_some());
        assert!(poller.poll(5).is_none());
        assert!(poller.poll(11).is_some());
    }

    #[test]
    fn poller_absorbs_errors_and_counts_them() {
        let mut poller = Poller::new(FlakySource { calls: 0 }, 1);
        let first = poller.poll(1);
        assert!(first.is_some());
        let second = poller.poll(2);
        assert!(second.is_none());
        assert_eq!(poller.errors, 1);
        assert!(poller.last_error.as_deref().unwrap().contains("502"));
        // Next poll succeeds again.
        assert!(poller.poll(3).is_some());
    }

    #[test]
    fn force_next_overrides_cadence() {
        let mut poller = Poller::new(MockSource::new(SceneRng::seeded(2, "feed")), 1000);
        assert!(poller.poll(1).is_some());
        assert!(poller.poll(2).is_none());
        poller.force_next();
        assert!(poller.poll(3).is_some());
    }
}

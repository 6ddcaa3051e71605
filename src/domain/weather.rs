/// Weather: the enum-valued visual mood driven by aggregate market
/// sentiment, plus the deterministic parameter bundle each value maps to.

use crate::sim::rng::SceneRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    PartlyCloudy,
    Overcast,
    Rain,
    Thunderstorm,
    Snow,
}

/// Fixed total order for manual cycling.
pub const WEATHER_ORDER: [Weather; 6] = [
    Weather::Clear,
    Weather::PartlyCloudy,
    Weather::Overcast,
    Weather::Rain,
    Weather::Thunderstorm,
    Weather::Snow,
];

impl Weather {
    /// Map market aggregates to a weather value.
    ///
    /// Very low 5-minute volume overrides everything to SNOW (dead
    /// market); otherwise the buy ratio is bucketed into five contiguous
    /// bands from THUNDERSTORM (sell pressure) to CLEAR (buy pressure).
    pub fn classify(buy_ratio: f32, total_volume_5m: f64) -> Weather {
        if total_volume_5m < 200_000.0 {
            return Weather::Snow;
        }
        if buy_ratio < 38.0 {
            Weather::Thunderstorm
        } else if buy_ratio < 46.0 {
            Weather::Rain
        } else if buy_ratio < 52.0 {
            Weather::Overcast
        } else if buy_ratio < 60.0 {
            Weather::PartlyCloudy
        } else {
            Weather::Clear
        }
    }

    /// Advance to the next weather in the fixed cycle order.
    pub fn cycle(self) -> Weather {
        let idx = WEATHER_ORDER.iter().position(|w| *w == self).unwrap_or(0);
        WEATHER_ORDER[(idx + 1) % WEATHER_ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "CLEAR",
            Weather::PartlyCloudy => "PARTLY_CLOUDY",
            Weather::Overcast => "OVERCAST",
            Weather::Rain => "RAIN",
            Weather::Thunderstorm => "THUNDERSTORM",
            Weather::Snow => "SNOW",
        }
    }

    /// Abbreviation used by the metrics panel.
    pub fn abbrev(self) -> &'static str {
        match self {
            Weather::Clear => "CLEAR",
            Weather::PartlyCloudy => "PT.CLOUD",
            Weather::Overcast => "OVERCAST",
            Weather::Rain => "RAIN",
            Weather::Thunderstorm => "T-STORM",
            Weather::Snow => "SNOW",
        }
    }

    /// Tight abbreviation for the oracle footer.
    pub fn short(self) -> &'static str {
        match self {
            Weather::Clear => "CLR",
            Weather::PartlyCloudy => "PT.CLD",
            Weather::Overcast => "OVCST",
            Weather::Rain => "RAIN",
            Weather::Thunderstorm => "T-STM",
            Weather::Snow => "SNOW",
        }
    }

    /// Parse a config-file value. Case-insensitive, both label styles.
    pub fn parse(s: &str) -> Option<Weather> {
        match s.to_ascii_uppercase().as_str() {
            "CLEAR" => Some(Weather::Clear),
            "PARTLY_CLOUDY" | "PARTLY-CLOUDY" | "PT.CLOUD" => Some(Weather::PartlyCloudy),
            "OVERCAST" => Some(Weather::Overcast),
            "RAIN" => Some(Weather::Rain),
            "THUNDERSTORM" | "T-STORM" => Some(Weather::Thunderstorm),
            "SNOW" => Some(Weather::Snow),
            _ => None,
        }
    }
}

/// The parameter bundle a weather value maps to. Sampled once per weather
/// transition: the stochastic pieces (cloud variance, particle intensity
/// bands) are fixed until the weather changes again.
#[derive(Clone, Copy, Debug)]
pub struct WeatherParams {
    pub weather: Weather,
    pub ground_rows: i32,
    pub cloud_count: u32,
    /// Rain/snow density 0-1.
    pub particle_intensity: f32,
    pub star_brightness: f32,
    pub car_density: f32,
    pub window_brightness: f32,
    pub tree_sway: bool,
    pub puddle_effect: bool,
    pub snow_accumulation: bool,
    pub people_density: f32,
}

/// Micro-variation: base count ± variance, floored at zero.
fn vary_count(base: i32, variance: i32, rng: &mut SceneRng) -> u32 {
    (base + rng.range_i32(-variance, variance + 1)).max(0) as u32
}

impl WeatherParams {
    pub fn sample(weather: Weather, rng: &mut SceneRng) -> WeatherParams {
        match weather {
            Weather::Clear => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(1, 1, rng),
                particle_intensity: 0.0,
                star_brightness: 1.0,
                car_density: 0.8,
                window_brightness: 1.0,
                tree_sway: false,
                puddle_effect: false,
                snow_accumulation: false,
                people_density: 1.0,
            },
            Weather::PartlyCloudy => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(3, 1, rng),
                particle_intensity: 0.0,
                star_brightness: 0.7,
                car_density: 0.6,
                window_brightness: 0.85,
                tree_sway: false,
                puddle_effect: false,
                snow_accumulation: false,
                people_density: 0.7,
            },
            Weather::Overcast => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(5, 1, rng),
                particle_intensity: 0.0,
                star_brightness: 0.2,
                car_density: 0.4,
                window_brightness: 0.6,
                tree_sway: false,
                puddle_effect: false,
                snow_accumulation: false,
                people_density: 0.5,
            },
            Weather::Rain => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(4, 1, rng),
                particle_intensity: rng.range_f32(0.3, 0.7),
                star_brightness: 0.1,
                car_density: 0.2,
                window_brightness: 0.5,
                tree_sway: true,
                puddle_effect: true,
                snow_accumulation: false,
                people_density: 0.15,
            },
            Weather::Thunderstorm => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(6, 1, rng),
                particle_intensity: rng.range_f32(0.7, 1.0),
                star_brightness: 0.0,
                car_density: 0.05,
                window_brightness: 0.3,
                tree_sway: true,
                puddle_effect: true,
                snow_accumulation: false,
                people_density: 0.0,
            },
            Weather::Snow => WeatherParams {
                weather,
                ground_rows: 4,
                cloud_count: vary_count(2, 1, rng),
                particle_intensity: rng.range_f32(0.2, 0.4),
                star_brightness: 0.5,
                car_density: 0.0,
                window_brightness: 0.6,
                tree_sway: false,
                puddle_effect: false,
                snow_accumulation: true,
                people_density: 0.05,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_pure() {
        for _ in 0..3 {
            assert_eq!(Weather::classify(72.0, 8_400_000.0), Weather::Clear);
            assert_eq!(Weather::classify(50.0, 1_000_000.0), Weather::Overcast);
            assert_eq!(Weather::classify(30.0, 1_000_000.0), Weather::Thunderstorm);
        }
    }

    #[test]
    fn dead_market_overrides_to_snow() {
        for ratio in [0.0_f32, 30.0, 50.0, 72.0, 100.0] {
            assert_eq!(Weather::classify(ratio, 100_000.0), Weather::Snow);
        }
    }

    #[test]
    fn band_edges() {
        let v = 1_000_000.0;
        assert_eq!(Weather::classify(37.9, v), Weather::Thunderstorm);
        assert_eq!(Weather::classify(38.0, v), Weather::Rain);
        assert_eq!(Weather::classify(45.9, v), Weather::Rain);
        assert_eq!(Weather::classify(46.0, v), Weather::Overcast);
        assert_eq!(Weather::classify(51.9, v), Weather::Overcast);
        assert_eq!(Weather::classify(52.0, v), Weather::PartlyCloudy);
        assert_eq!(Weather::classify(59.9, v), Weather::PartlyCloudy);
        assert_eq!(Weather::classify(60.0, v), Weather::Clear);
    }

    #[test]
    fn cycle_closes_after_six_steps() {
        for start in WEATHER_ORDER {
            let mut w = start;
            for _ in 0..6 {
                w = w.cycle();
            }
            assert_eq!(w, start);
        }
    }

    #[test]
    fn clear_params_bundle() {
        let mut rng = SceneRng::seeded(42, "params");
        let p = WeatherParams::sample(Weather::Clear, &mut rng);
        // Base 1 with ±1 variance.
        assert!(p.cloud_count <= 2);
        assert_eq!(p.particle_intensity, 0.0);
        assert_eq!(p.star_brightness, 1.0);
        assert_eq!(p.window_brightness, 1.0);
        assert!(!p.puddle_effect && !p.snow_accumulation && !p.tree_sway);
    }

    #[test]
    fn rain_intensity_stays_in_band() {
        let mut rng = SceneRng::seeded(9, "params");
        for _ in 0..32 {
            let p = WeatherParams::sample(Weather::Rain, &mut rng);
            assert!(p.particle_intensity >= 0.3 && p.particle_intensity < 0.7);
            assert!(p.puddle_effect && p.tree_sway);
        }
    }
}

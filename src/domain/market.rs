/// Market data model: the snapshot bundle the render loop consumes.
/// Created by the data feed each poll; layers read it and never mutate it
/// (the buildings layer keeps its own per-instance animation state).

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::weather::Weather;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Graduation,
    NewLaunch,
    Rug,
    Alert,
}

#[derive(Clone, Debug)]
pub struct TrenchEvent {
    pub kind: EventKind,
    pub text: String,
    pub timestamp_ms: u64,
}

/// A tracked token and its current metrics.
#[derive(Clone, Debug)]
pub struct Runner {
    pub symbol: String,
    pub mint: String,
    pub volume_24h: f64,
    pub volume_1h: f64,
    pub volume_5m: f64,
    pub pct_change_5m: f32,
    pub pct_change_1h: f32,
    pub mcap: f64,
    pub fdv: f64,
    pub buys_1h: u32,
    pub sells_1h: u32,
    pub age: String,
    pub is_new: bool,
    pub is_graduated: bool,
    pub is_rugged: bool,
}

impl Runner {
    /// Market cap with FDV fallback.
    #[inline]
    pub fn cap(&self) -> f64 {
        if self.mcap > 0.0 {
            self.mcap
        } else {
            self.fdv
        }
    }
}

#[derive(Clone, Debug)]
pub struct HotToken {
    pub symbol: String,
    pub pct_change_1h: f32,
    pub volume_1h: f64,
}

/// Reference-asset prices for the side panel.
#[derive(Clone, Copy, Debug)]
pub struct MajorPrices {
    pub btc_usd: f64,
    pub btc_change_24h: f32,
    pub sol_usd: f64,
    pub sol_change_24h: f32,
}

#[derive(Clone, Debug)]
pub struct MarketState {
    /// Aggregate buy pressure, 0-100.
    pub buy_ratio: f32,
    pub total_volume_5m: f64,
    pub total_volume_1h: f64,
    pub launched_today: Option<u32>,
    pub graduated_today: Option<u32>,
    pub grad_rate: Option<f32>,
    pub weather: Weather,
}

/// One reading for the trend history panel.
#[derive(Clone, Copy, Debug)]
pub struct TrendSnapshot {
    pub timestamp_ms: u64,
    pub buy_ratio: f32,
    pub volume_5m: f64,
    pub weather: Weather,
}

/// The full polled snapshot.
#[derive(Clone, Debug)]
pub struct TrenchState {
    pub market: MarketState,
    pub runners: Vec<Runner>,
    pub hot_tokens: Vec<HotToken>,
    pub events: Vec<TrenchEvent>,
    pub prices: Option<MajorPrices>,
}

// ── Formatting helpers shared by the label-drawing layers ──

/// $1.2M / $340K / $55
pub fn format_usd_short(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("${:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("${:.0}K", v / 1_000.0)
    } else {
        format!("${:.0}", v)
    }
}

/// MC $4.5M / MC $800K
pub fn format_mcap(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("MC ${:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("MC ${:.0}K", v / 1_000.0)
    } else {
        format!("MC ${:.0}", v)
    }
}

/// Reference-asset price: $104,231 / $1.23 / $0.0042
pub fn format_price(v: f64) -> String {
    if v >= 10_000.0 {
        let n = v.round() as i64;
        let mut s = String::new();
        let digits = n.to_string();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                s.push(',');
            }
            s.push(ch);
        }
        format!("${}", s)
    } else if v >= 1.0 {
        format!("${:.2}", v)
    } else {
        format!("${:.4}", v)
    }
}

/// Signed percent: +12.4% / -3.2%
pub fn format_pct(v: f32) -> String {
    if v >= 0.0 {
        format!("+{:.1}%", v)
    } else {
        format!("{:.1}%", v)
    }
}

/// Thousands-grouped count for the metrics panel.
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut s = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            s.push(',');
        }
        s.push(ch);
    }
    s
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_short_suffixes() {
        assert_eq!(format_usd_short(8_400_000.0), "$8.4M");
        assert_eq!(format_usd_short(445_000.0), "$445K");
        assert_eq!(format_usd_short(55.0), "$55");
    }

    #[test]
    fn mcap_format() {
        assert_eq!(format_mcap(4_500_000.0), "MC $4.5M");
        assert_eq!(format_mcap(800_000.0), "MC $800K");
    }

    #[test]
    fn price_format_tiers() {
        assert_eq!(format_price(104_231.4), "$104,231");
        assert_eq!(format_price(1.234), "$1.23");
        assert_eq!(format_price(0.00421), "$0.0042");
    }

    #[test]
    fn pct_sign() {
        assert_eq!(format_pct(12.44), "+12.4%");
        assert_eq!(format_pct(-3.21), "-3.2%");
    }

    #[test]
    fn count_grouping() {
        assert_eq!(format_count(14_847), "14,847");
        assert_eq!(format_count(312), "312");
    }

    #[test]
    fn cap_falls_back_to_fdv() {
        let mut r = Runner {
            symbol: "X".into(),
            mint: "x".into(),
            volume_24h: 0.0,
            volume_1h: 0.0,
            volume_5m: 0.0,
            pct_change_5m: 0.0,
            pct_change_1h: 0.0,
            mcap: 0.0,
            fdv: 9_000.0,
            buys_1h: 0,
            sells_1h: 0,
            age: "1h".into(),
            is_new: false,
            is_graduated: false,
            is_rugged: false,
        };
        assert_eq!(r.cap(), 9_000.0);
        r.mcap = 5_000.0;
        assert_eq!(r.cap(), 5_000.0);
    }
}

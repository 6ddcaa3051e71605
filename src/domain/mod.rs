pub mod market;
pub mod weather;

pub use market::{
    EventKind, HotToken, MajorPrices, MarketState, Runner, TrenchEvent, TrenchState, TrendSnapshot,
};
pub use weather::{Weather, WeatherParams};

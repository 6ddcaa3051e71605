pub mod banner;
pub mod birds;
pub mod buildings;
pub mod clouds;
pub mod docs;
pub mod fireworks;
pub mod hot_tokens;
pub mod metrics;
pub mod moon;
pub mod oracle;
pub mod shooting_stars;
pub mod stars;
pub mod street;
pub mod ticker;
pub mod token_detail;
pub mod weather_fx;

pub use banner::BannerPlaneLayer;
pub use birds::BirdsLayer;
pub use buildings::BuildingsLayer;
pub use clouds::CloudsLayer;
pub use docs::DocsOverlayLayer;
pub use fireworks::FireworksLayer;
pub use hot_tokens::HotTokensPanelLayer;
pub use metrics::MetricsPanelLayer;
pub use moon::MoonLayer;
pub use oracle::OracleOverlayLayer;
pub use shooting_stars::ShootingStarsLayer;
pub use stars::StarsLayer;
pub use street::StreetLayer;
pub use ticker::TickerLayer;
pub use token_detail::TokenDetailLayer;
pub use weather_fx::WeatherFxLayer;

use crossterm::style::Color;

/// Grayscale shorthand.
pub(crate) fn gray(v: u8) -> Color {
    Color::Rgb { r: v, g: v, b: v }
}

/// Dim an RGB color by a multiplier in 0-1. Non-RGB colors pass through.
pub(crate) fn dim(color: Color, mult: f32) -> Color {
    match color {
        Color::Rgb { r, g, b } => Color::Rgb {
            r: (r as f32 * mult) as u8,
            g: (g as f32 * mult) as u8,
            b: (b as f32 * mult) as u8,
        },
        other => other,
    }
}

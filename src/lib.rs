/// Trenchscape: a layered ASCII townscape renderer driven by market data.
///
/// The scene is composed of independently stateful layers (sky, weather,
/// buildings, street, overlays) drawing back-to-front into a character
/// grid once per fixed-timestep tick. The binary in `main.rs` hosts the
/// loop on a terminal; everything here is display-surface agnostic and
/// can be driven headlessly by the integration tests.

pub mod art;
pub mod config;
pub mod domain;
pub mod layers;
pub mod sim;
pub mod ui;

pub mod clock;
pub mod feed;
pub mod particles;
pub mod rng;
pub mod scene;
pub mod store;

pub use clock::FrameClock;
pub use particles::{Particle, ParticleSystem};
pub use rng::SceneRng;
pub use scene::{
    building_slot, BuildingPos, BuildingSlot, Layer, OracleState, SceneComposer, SceneState,
    WeatherMode, GROUND_ROWS, TICKER_ROWS,
};

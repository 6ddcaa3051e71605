pub mod grid;
pub mod input;
pub mod screen;

pub use grid::{Cell, Grid};
pub use screen::Screen;

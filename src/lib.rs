pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod sim;
pub mod stage;

pub use config::SimConfig;
pub use driver::{Driver, Snapshot};
pub use scenes::{DonutEffect, Effect, GalleryEffect, Input, LandingEffect, Signal};

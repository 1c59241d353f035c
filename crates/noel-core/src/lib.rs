pub mod config;
pub mod constants;
pub mod dispersion;
pub mod error;
pub mod generator;
pub mod gesture;
pub mod letter;
pub mod memories;
pub mod scene;
pub mod snow;
pub mod view;
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use config::*;
pub use constants::*;
pub use dispersion::DispersionController;
pub use error::ConfigError;
pub use generator::{PointAttributes, PointCloud};
pub use gesture::{GestureOutcome, PointerClassifier, PointerGesture};
pub use letter::{LetterMachine, LetterStep, Transition, TransitionCause};
pub use memories::{Memory, MEMORIES};
pub use scene::{FrameCommands, Scene};
pub use snow::SnowField;
pub use view::*;

pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod navigation;
pub mod tour;

pub use audio::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use navigation::*;
pub use tour::*;

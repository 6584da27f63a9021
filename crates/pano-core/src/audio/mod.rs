//! Per-state background audio.
//!
//! A [`BackgroundAudioView`] owns one [`AudioContainer`] per distinct
//! background-audio id and decides which of them, if any, is audible.
//! Containers only talk back through [`PlaybackStateChanged`] messages.

mod container;
mod gesture;
mod position;
mod source;
mod view;

pub use container::*;
pub use gesture::*;
pub use position::*;
pub use source::*;
pub use view::*;

use std::cell::Cell;
use std::rc::Rc;

/// Session-wide, one-way flag recording that the browser's autoplay
/// restriction has been lifted by a user gesture.
///
/// Cloning shares the flag; containers hold a clone to check it before
/// starting playback.
#[derive(Clone, Debug, Default)]
pub struct GestureLatch(Rc<Cell<bool>>);

impl GestureLatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_granted(&self) -> bool {
        self.0.get()
    }

    /// Latch the flag. Returns true only for the call that flipped it.
    pub fn grant(&self) -> bool {
        !self.0.replace(true)
    }
}

use crate::tour::BackgroundAudioInfo;

/// Handle to one loaded (or loading) audio asset.
///
/// Implementations wrap whatever the platform offers; the core only needs
/// these few operations. None of them may fail loudly.
pub trait AudioSource {
    /// False while the asset cannot be played yet, or failed to load. Play
    /// requests are dropped in that case.
    fn is_ready(&self) -> bool;
    /// The asset broke after playback was requested (load error, refused
    /// start). A playing pack is reported silent once this turns true.
    fn has_failed(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Current playback offset in seconds.
    fn position(&self) -> f64;
    fn seek(&mut self, seconds: f64);
    /// True once playback has run to the end of the asset.
    fn has_ended(&self) -> bool;
}

/// Creates the asset handle for a pack the first time its id is seen.
pub trait AudioFactory {
    type Source: AudioSource;

    fn create(&mut self, info: &BackgroundAudioInfo) -> Self::Source;
}

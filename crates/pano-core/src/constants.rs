// Shared tuning constants for navigation, markers and audio.

// Link markers
pub const MARKER_DISTANCE: f32 = 20.0; // distance from the sphere centre
pub const MARKER_SIZE: f32 = 0.5;
pub const MARKER_SPIN_RAD_PER_SEC: f32 = std::f32::consts::PI / 180.0 * 100.0; // 1 degree every 10ms

// Photo dome
pub const PHOTO_DOME_RESOLUTION: u32 = 32;
pub const PHOTO_DOME_SIZE: f32 = 1000.0;

// Timers (milliseconds)
pub const GESTURE_DEBOUNCE_MS: i32 = 300;
pub const POSITION_REFRESH_MS: f64 = 500.0;

// Play/pause glyphs shown on the affordance
pub const PLAY_ICON: &str = "\u{25B6}";
pub const PAUSE_ICON: &str = "\u{275A}\u{275A}";

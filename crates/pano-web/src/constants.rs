// DOM hooks the page is expected to provide.

pub const CANVAS_ID: &str = "renderCanvas";
pub const PLAY_PAUSE_BUTTON_ID: &str = "bg-audio-toggle";
pub const POSITION_LABEL_ID: &str = "bg-audio-position";
pub const GROUP_MENU_ID: &str = "group-menu";
pub const BRAND_LOGO_ID: &str = "brand-logo";

// Served next to the page
pub const CONFIG_URL: &str = "config.json";

/// Overlay, timing and sound constants shared by the web frontend.
///
/// These keep fixed identifiers and tuning values out of the code paths that
/// use them, so host-side tests can check them directly.
// SVG overlay
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const OVERLAY_ID: &str = "generated";
pub const OVERLAY_PATH_ID: &str = "generated-path";

// Sporadic timer defaults (seconds)
pub const DEFAULT_WAIT_MIN_SECS: i32 = 3;
pub const DEFAULT_WAIT_MAX_SECS: i32 = 10;
pub const MILLIS_PER_SECOND: f64 = 1000.0;

// Speed rating upper bounds. The last bucket is exclusive, everything at or
// above it is "v-fast".
pub const SPEED_V_SLOW_MAX: f64 = 5.0;
pub const SPEED_SLOW_MAX: f64 = 10.0;
pub const SPEED_MEDIUM_MAX: f64 = 15.0;
pub const SPEED_FAST_LIMIT: f64 = 20.0;

// Sound effects
pub const SOUND_MANIFEST_URL: &str = "/assets/sound-fx.json";
pub const SOUND_ASSET_DIR: &str = "/assets/";
pub const JSON_CONTENT_TYPE: &str = "application/json";

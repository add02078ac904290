use serde::Serialize;

pub const DEFAULT_SCROLLED_THRESHOLD_PX: f64 = 100.0;
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_FADE_IN_OFFSET_PX: f64 = 100.0;
pub const DEFAULT_SECTION_THRESHOLD_DIVISOR: f64 = 3.0;
pub const DEFAULT_FOLLOWER_DAMPING: f64 = 0.1;
pub const DEFAULT_FOLLOWER_HOVER_SCALE: f64 = 1.5;
pub const DEFAULT_FOLLOWER_ROTATION_OFFSET_DEG: f64 = 45.0;
pub const DEFAULT_SCROLL_ANIMATION_DURATION_MS: u32 = 800;
pub const DEFAULT_SCROLL_ANIMATION_EASING: &str = "ease-in-out";

const SCROLLED_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const MOBILE_BREAKPOINT_PX_BOUNDS: (f64, f64) = (320.0, 2_560.0);
const FADE_IN_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const SECTION_THRESHOLD_DIVISOR_BOUNDS: (f64, f64) = (1.0, 10.0);
// Damping must stay strictly inside (0, 1) so the follower never overshoots.
const FOLLOWER_DAMPING_BOUNDS: (f64, f64) = (0.01, 0.99);
const FOLLOWER_HOVER_SCALE_BOUNDS: (f64, f64) = (1.0, 4.0);
const SCROLL_ANIMATION_DURATION_MS_BOUNDS: (u32, u32) = (0, 5_000);

pub const ATTR_SCROLLED_THRESHOLD: &str = "data-ui-scrolled-threshold";
pub const ATTR_MOBILE_BREAKPOINT: &str = "data-ui-mobile-breakpoint";
pub const ATTR_FADE_IN_OFFSET: &str = "data-ui-fade-in-offset";
pub const ATTR_SECTION_THRESHOLD_DIVISOR: &str = "data-ui-section-divisor";
pub const ATTR_FOLLOWER_DAMPING: &str = "data-ui-follower-damping";
pub const ATTR_FOLLOWER_HOVER_SCALE: &str = "data-ui-follower-hover-scale";
pub const ATTR_SCROLL_ANIMATION_DURATION_MS: &str = "data-ui-animation-duration-ms";

/// Settings handed to the optional scroll-animation library on startup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScrollAnimationConfig {
    pub duration: u32,
    pub easing: String,
    pub once: bool,
    pub mirror: bool,
}

impl Default for ScrollAnimationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SCROLL_ANIMATION_DURATION_MS,
            easing: DEFAULT_SCROLL_ANIMATION_EASING.to_string(),
            once: true,
            mirror: false,
        }
    }
}

/// Tunables for every page enhancement.
#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    pub scrolled_threshold_px: f64,
    pub mobile_breakpoint_px: f64,
    pub fade_in_offset_px: f64,
    pub section_threshold_divisor: f64,
    pub follower_damping: f64,
    pub follower_hover_scale: f64,
    pub follower_rotation_offset_deg: f64,
    pub scroll_animation: ScrollAnimationConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: DEFAULT_SCROLLED_THRESHOLD_PX,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            fade_in_offset_px: DEFAULT_FADE_IN_OFFSET_PX,
            section_threshold_divisor: DEFAULT_SECTION_THRESHOLD_DIVISOR,
            follower_damping: DEFAULT_FOLLOWER_DAMPING,
            follower_hover_scale: DEFAULT_FOLLOWER_HOVER_SCALE,
            follower_rotation_offset_deg: DEFAULT_FOLLOWER_ROTATION_OFFSET_DEG,
            scroll_animation: ScrollAnimationConfig::default(),
        }
    }
}

impl UiConfig {
    /// Builds the config from an attribute lookup, typically the root
    /// element's `data-ui-*` attributes.
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let scroll_animation = ScrollAnimationConfig {
            duration: parse_u32_with_bounds(
                lookup(ATTR_SCROLL_ANIMATION_DURATION_MS).as_deref(),
                DEFAULT_SCROLL_ANIMATION_DURATION_MS,
                SCROLL_ANIMATION_DURATION_MS_BOUNDS,
            ),
            ..ScrollAnimationConfig::default()
        };

        Self {
            scrolled_threshold_px: parse_f64_with_bounds(
                lookup(ATTR_SCROLLED_THRESHOLD).as_deref(),
                DEFAULT_SCROLLED_THRESHOLD_PX,
                SCROLLED_THRESHOLD_PX_BOUNDS,
            ),
            mobile_breakpoint_px: parse_f64_with_bounds(
                lookup(ATTR_MOBILE_BREAKPOINT).as_deref(),
                DEFAULT_MOBILE_BREAKPOINT_PX,
                MOBILE_BREAKPOINT_PX_BOUNDS,
            ),
            fade_in_offset_px: parse_f64_with_bounds(
                lookup(ATTR_FADE_IN_OFFSET).as_deref(),
                DEFAULT_FADE_IN_OFFSET_PX,
                FADE_IN_OFFSET_PX_BOUNDS,
            ),
            section_threshold_divisor: parse_f64_with_bounds(
                lookup(ATTR_SECTION_THRESHOLD_DIVISOR).as_deref(),
                DEFAULT_SECTION_THRESHOLD_DIVISOR,
                SECTION_THRESHOLD_DIVISOR_BOUNDS,
            ),
            follower_damping: parse_f64_with_bounds(
                lookup(ATTR_FOLLOWER_DAMPING).as_deref(),
                DEFAULT_FOLLOWER_DAMPING,
                FOLLOWER_DAMPING_BOUNDS,
            ),
            follower_hover_scale: parse_f64_with_bounds(
                lookup(ATTR_FOLLOWER_HOVER_SCALE).as_deref(),
                DEFAULT_FOLLOWER_HOVER_SCALE,
                FOLLOWER_HOVER_SCALE_BOUNDS,
            ),
            follower_rotation_offset_deg: DEFAULT_FOLLOWER_ROTATION_OFFSET_DEG,
            scroll_animation,
        }
    }

    pub fn is_mobile_width(&self, inner_width: f64) -> bool {
        inner_width <= self.mobile_breakpoint_px
    }
}

fn parse_f64_with_bounds(raw: Option<&str>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(bounds.0, bounds.1))
        .unwrap_or(default)
}

fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .map(|value| value.clamp(bounds.0, bounds.1))
        .unwrap_or(default)
}

//! Damped cursor follower: each frame the marker closes a fixed fraction of
//! the remaining distance to the pointer.

use crate::config::UiConfig;

/// Elements that put the follower into its hover style.
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, .cta-button, .btn, input, textarea, select, [role=\"button\"], [tabindex]";

pub const HOVER_CLASS: &str = "ghost-hover";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Placement computed for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowerFrame {
    pub left: f64,
    pub top: f64,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl FollowerFrame {
    pub fn left_px(&self) -> String {
        format!("{}px", self.left)
    }

    pub fn top_px(&self) -> String {
        format!("{}px", self.top)
    }

    pub fn transform(&self) -> String {
        format!(
            "translate(-50%, -50%) rotate({}deg) scale({})",
            self.rotation_deg, self.scale
        )
    }
}

#[derive(Clone, Debug)]
pub struct Follower {
    pointer: Vec2,
    position: Vec2,
    hovering: bool,
    damping: f64,
    hover_scale: f64,
    rotation_offset_deg: f64,
    last_rotation_deg: f64,
}

impl Follower {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            pointer: Vec2::default(),
            position: Vec2::default(),
            hovering: false,
            damping: config.follower_damping,
            hover_scale: config.follower_hover_scale,
            rotation_offset_deg: config.follower_rotation_offset_deg,
            last_rotation_deg: config.follower_rotation_offset_deg,
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn scale(&self) -> f64 {
        if self.hovering {
            self.hover_scale
        } else {
            1.0
        }
    }

    /// Transform applied immediately on hover changes, before the next frame.
    pub fn hover_transform(&self) -> String {
        FollowerFrame {
            left: self.position.x,
            top: self.position.y,
            rotation_deg: self.last_rotation_deg,
            scale: self.scale(),
        }
        .transform()
    }

    /// Advances one frame: `position += (pointer - position) * damping`.
    pub fn step(&mut self) -> FollowerFrame {
        let dx = self.pointer.x - self.position.x;
        let dy = self.pointer.y - self.position.y;
        self.position.x += dx * self.damping;
        self.position.y += dy * self.damping;

        self.last_rotation_deg = dy.atan2(dx).to_degrees() + self.rotation_offset_deg;

        FollowerFrame {
            left: self.position.x,
            top: self.position.y,
            rotation_deg: self.last_rotation_deg,
            scale: self.scale(),
        }
    }
}

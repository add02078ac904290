pub mod config;
pub mod drawer;
pub mod follower;
pub mod projects;
pub mod tabs;
pub mod theme;
pub mod throttle;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

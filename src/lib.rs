//! Hook Line - A single-screen fishing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish, hook, collisions, viewport)
//! - `renderer`: Scene building and the WebGPU rectangle pipeline
//! - `platform`: Input queue and frame driver shared by the browser/native shells
//! - `settings`: Tunables persisted in LocalStorage

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical base size; the play area keeps this 4:3 aspect ratio
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Simulation step (60 Hz, the frame rate the per-step velocities were tuned at)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Hook defaults
    pub const HOOK_WIDTH: f32 = 100.0;
    pub const HOOK_HEIGHT: f32 = 30.0;
    pub const HOOK_SPEED: f32 = 5.0;
    /// Distance of the hook's resting position from the bottom edge
    pub const HOOK_REST_OFFSET: f32 = 30.0;

    /// Per-step chance that a fish picks a new random velocity
    pub const FISH_RESAMPLE_CHANCE: f64 = 0.05;
    /// Resampled horizontal speed range
    pub const FISH_RESAMPLE_VX: (f32, f32) = (-2.0, 2.0);
    /// Resampled vertical speed range
    pub const FISH_RESAMPLE_VY: (f32, f32) = (1.0, 3.0);

    /// How long a catch message stays on screen (ms)
    pub const CATCH_MESSAGE_MS: f64 = 2000.0;
    /// Catch message text anchor, from the left and bottom edges
    pub const MESSAGE_MARGIN_X: f32 = 10.0;
    pub const MESSAGE_MARGIN_BOTTOM: f32 = 10.0;
    pub const MESSAGE_FONT_PX: f32 = 20.0;
}

/// Clamp that tolerates an inverted range; the lower bound wins
#[inline]
pub fn clamp_lenient(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

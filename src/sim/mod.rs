//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Input arrives as queued events, applied between steps
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod species;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::Rect;
pub use input::{InputEvent, InputTracker, apply_input};
pub use species::{Species, SpeciesDef};
pub use state::{CatchEvent, Fish, GameState, Hook, HookPhase, Tuning};
pub use tick::{StepOutcome, tick};
pub use viewport::Viewport;

//! Input events and how they steer the hook
//!
//! Platform callbacks never touch the game state directly. They enqueue
//! `InputEvent`s, and the frame driver applies the whole queue at the start
//! of a frame, so a step always sees a consistent input snapshot.

use super::state::GameState;
use super::viewport::Viewport;

/// One input event, in surface-local CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse/pointer moved over the surface
    PointerMove { x: f32 },
    /// First finger went down
    TouchStart { x: f32 },
    /// First finger moved
    TouchMove { x: f32 },
    /// Finger lifted
    TouchEnd,
    /// Action key pressed (repeats while held are fine)
    ActionDown,
    /// Action key released
    ActionUp,
    /// Display size or device pixel ratio changed
    Resize {
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    },
}

/// Where the player is aiming the hook
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputTracker {
    /// Desired left edge of the hook (unclamped; the hook clamps it)
    pub hook_target_x: f32,
    /// A finger is on the surface
    pub touch_active: bool,
}

impl InputTracker {
    fn aim(&mut self, x: f32, hook_width: f32) {
        self.hook_target_x = x - hook_width / 2.0;
    }
}

/// Apply a single event to the game state
pub fn apply_input(state: &mut GameState, event: &InputEvent) {
    let hook_width = state.hook.width;
    match *event {
        InputEvent::PointerMove { x } => {
            // No sideways snapping mid-drop
            if !state.hook.action_held && !state.hook.extending {
                state.input.aim(x, hook_width);
            }
        }
        InputEvent::TouchStart { x } => {
            state.input.touch_active = true;
            if !state.hook.extending {
                state.hook.press();
            }
            state.input.aim(x, hook_width);
        }
        InputEvent::TouchMove { x } => {
            // A finger that landed while the hook was still reeling in doesn't steer
            if state.input.touch_active && (state.hook.action_held || !state.hook.extending) {
                state.input.aim(x, hook_width);
            }
        }
        InputEvent::TouchEnd => {
            state.input.touch_active = false;
            state.hook.action_held = false;
        }
        InputEvent::ActionDown => {
            if !state.hook.action_held && !state.hook.extending {
                state.hook.press();
            }
        }
        InputEvent::ActionUp => {
            if state.hook.action_held {
                state.hook.action_held = false;
            }
        }
        InputEvent::Resize {
            width,
            height,
            device_pixel_ratio,
        } => {
            state.resize(Viewport::fit(width, height, device_pixel_ratio));
        }
    }
}

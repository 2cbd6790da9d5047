//! Game state and core simulation types
//!
//! Everything a step reads or writes lives in `GameState`; there is no
//! global mutable state, so a seeded state plus an input script replays
//! exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::input::InputTracker;
use super::species::Species;
use super::viewport::Viewport;
use crate::consts::*;
use crate::{Settings, clamp_lenient};

/// The one fish currently in the water
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub species: Species,
    /// Top-left corner
    pub pos: Vec2,
    /// Logical px per step
    pub vel: Vec2,
    /// Simulation time of the spawn (ms)
    pub spawned_at_ms: f64,
}

impl Fish {
    /// Random species at a random spot in the upper half
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, now_ms: f64) -> Self {
        let species = Species::random(rng);
        let def = species.def();
        let max_x = (viewport.css_width - def.width).max(0.0);
        let max_y = (viewport.water_line() - def.height).max(0.0);
        let pos = Vec2::new(
            rng.random::<f32>() * max_x,
            rng.random::<f32>() * max_y,
        );

        Self {
            species,
            pos,
            vel: Vec2::new(def.speed_x, def.speed_y),
            spawned_at_ms: now_ms,
        }
    }

    pub fn size(&self) -> Vec2 {
        let def = self.species.def();
        Vec2::new(def.width, def.height)
    }

    pub fn rect(&self) -> Rect {
        let size = self.size();
        Rect::from_pos(self.pos, size.x, size.y)
    }

    /// Random velocity changes, movement, and bouncing inside the upper half
    pub fn swim<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: &Viewport, resample_chance: f64) {
        if rng.random_bool(resample_chance) {
            self.vel = Vec2::new(
                rng.random_range(FISH_RESAMPLE_VX.0..=FISH_RESAMPLE_VX.1),
                rng.random_range(FISH_RESAMPLE_VY.0..=FISH_RESAMPLE_VY.1),
            );
        }

        self.pos += self.vel;

        let size = self.size();
        let max_x = (viewport.css_width - size.x).max(0.0);
        let max_y = (viewport.water_line() - size.y).max(0.0);

        // Point the velocity back inward and pull the fish onto the wall it hit
        if self.pos.x <= 0.0 {
            self.vel.x = self.vel.x.abs();
            self.pos.x = 0.0;
        } else if self.pos.x >= max_x {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = max_x;
        }
        if self.pos.y <= 0.0 {
            self.vel.y = self.vel.y.abs();
            self.pos.y = 0.0;
        } else if self.pos.y >= max_y {
            self.vel.y = -self.vel.y.abs();
            self.pos.y = max_y;
        }
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawned_at_ms > self.species.def().lifetime_ms
    }

    pub fn clamp_to(&mut self, viewport: &Viewport) {
        let size = self.size();
        self.pos.x = clamp_lenient(self.pos.x, 0.0, viewport.css_width - size.x);
        self.pos.y = clamp_lenient(self.pos.y, 0.0, viewport.water_line() - size.y);
    }
}

/// Where the hook is in its drop cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// At rest depth, ready to drop
    Resting,
    /// Moving toward y = 0 while the action is held
    Extending,
    /// Returning to rest depth
    Retracting,
}

/// The player's hook
#[derive(Debug, Clone, PartialEq)]
pub struct Hook {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Logical px per step
    pub speed: f32,
    /// Mirrors the action key / touch
    pub action_held: bool,
    /// Set on press, cleared only once the hook is back at rest depth
    pub extending: bool,
}

impl Hook {
    pub fn new(viewport: &Viewport, speed: f32) -> Self {
        Self {
            pos: Vec2::new(viewport.css_width / 2.0, Self::rest_y(viewport)),
            width: HOOK_WIDTH,
            height: HOOK_HEIGHT,
            speed,
            action_held: false,
            extending: false,
        }
    }

    /// Resting depth for this viewport
    pub fn rest_y(viewport: &Viewport) -> f32 {
        (viewport.css_height - HOOK_REST_OFFSET).max(0.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.width, self.height)
    }

    /// Start a drop
    pub fn press(&mut self) {
        self.action_held = true;
        self.extending = true;
    }

    pub fn phase(&self) -> HookPhase {
        if !self.extending {
            HookPhase::Resting
        } else if self.action_held && self.pos.y > 0.0 {
            HookPhase::Extending
        } else {
            HookPhase::Retracting
        }
    }

    /// Follow the aim horizontally and run one step of the drop cycle
    pub fn update(&mut self, viewport: &Viewport, target_x: f32) {
        self.pos.x = clamp_lenient(target_x, 0.0, viewport.css_width - self.width);

        let rest_y = Self::rest_y(viewport);
        if self.action_held && self.pos.y > 0.0 {
            self.pos.y = (self.pos.y - self.speed).max(0.0);
        } else if self.pos.y < rest_y {
            self.pos.y = (self.pos.y + self.speed).min(rest_y);
        }

        if !self.action_held && self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.extending = false;
        }
    }

    pub fn clamp_to(&mut self, viewport: &Viewport) {
        self.pos.x = clamp_lenient(self.pos.x, 0.0, viewport.css_width - self.width);
        self.pos.y = clamp_lenient(self.pos.y, 0.0, Self::rest_y(viewport));
    }
}

/// Most recent catch, kept around only for the on-screen message
#[derive(Debug, Clone, PartialEq)]
pub struct CatchEvent {
    pub species: Species,
    pub message: String,
    pub caught_at_ms: f64,
}

impl CatchEvent {
    pub fn visible(&self, now_ms: f64, display_ms: f64) -> bool {
        now_ms - self.caught_at_ms < display_ms
    }
}

/// Gameplay knobs taken from `Settings` at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub hook_speed: f32,
    pub catch_message_ms: f64,
    pub resample_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hook_speed: HOOK_SPEED,
            catch_message_ms: CATCH_MESSAGE_MS,
            resample_chance: FISH_RESAMPLE_CHANCE,
        }
    }
}

impl From<&Settings> for Tuning {
    fn from(settings: &Settings) -> Self {
        let s = settings.sanitized();
        Self {
            hook_speed: s.hook_speed,
            catch_message_ms: s.catch_message_ms,
            resample_chance: s.resample_chance,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Simulation clock (ms since start)
    pub time_ms: f64,
    /// Steps taken
    pub time_ticks: u64,
    pub input: InputTracker,
    pub hook: Hook,
    pub fish: Fish,
    pub last_catch: Option<CatchEvent>,
    /// Catches this session (not persisted)
    pub catches: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut hook = Hook::new(&viewport, tuning.hook_speed);
        hook.clamp_to(&viewport);
        let fish = Fish::spawn(&mut rng, &viewport, 0.0);

        Self {
            seed,
            rng,
            tuning,
            viewport,
            time_ms: 0.0,
            time_ticks: 0,
            input: InputTracker {
                hook_target_x: hook.pos.x,
                touch_active: false,
            },
            hook,
            fish,
            last_catch: None,
            catches: 0,
        }
    }

    /// Adopt a new viewport and pull both entities back inside it
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!(
                "Viewport {}x{} (scale {:.3}, dpr {})",
                viewport.css_width,
                viewport.css_height,
                viewport.scale,
                viewport.device_pixel_ratio
            );
        }
        self.viewport = viewport;
        self.hook.clamp_to(&viewport);
        self.fish.clamp_to(&viewport);
    }

    /// Replace the fish with a fresh random one
    pub fn respawn_fish(&mut self) {
        self.fish = Fish::spawn(&mut self.rng, &self.viewport, self.time_ms);
    }

    /// Move the fish one step using the state's RNG
    pub fn swim_fish(&mut self) {
        self.fish
            .swim(&mut self.rng, &self.viewport, self.tuning.resample_chance);
    }

    /// Catch message to show right now, if any
    pub fn active_message(&self) -> Option<&str> {
        self.last_catch
            .as_ref()
            .filter(|c| c.visible(self.time_ms, self.tuning.catch_message_ms))
            .map(|c| c.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_hook_at_rest() {
        let state = GameState::new(1, Viewport::default());
        assert_eq!(state.hook.pos, Vec2::new(400.0, 570.0));
        assert_eq!(state.hook.phase(), HookPhase::Resting);
        assert_eq!(state.input.hook_target_x, 400.0);
    }

    #[test]
    fn test_spawn_within_upper_half() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let fish = Fish::spawn(&mut rng, &vp, 0.0);
            let r = fish.rect();
            assert!(r.x >= 0.0 && r.right() <= vp.css_width);
            assert!(r.y >= 0.0 && r.bottom() <= vp.water_line());
            let def = fish.species.def();
            assert_eq!(fish.vel, Vec2::new(def.speed_x, def.speed_y));
        }
    }

    #[test]
    fn test_swim_reflects_at_right_wall() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let mut fish = Fish {
            species: Species::Sardine,
            pos: Vec2::new(769.0, 100.0),
            vel: Vec2::new(1.5, 2.0),
            spawned_at_ms: 0.0,
        };
        // Never resample so the reflection is observable
        fish.swim(&mut rng, &vp, 0.0);
        assert_eq!(fish.pos.x, 770.0);
        assert_eq!(fish.vel.x, -1.5);
        assert_eq!(fish.vel.y, 2.0);
    }

    #[test]
    fn test_swim_reflects_at_water_line() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let mut fish = Fish {
            species: Species::Sardine,
            pos: Vec2::new(100.0, 279.0),
            vel: Vec2::new(1.5, 2.0),
            spawned_at_ms: 0.0,
        };
        fish.swim(&mut rng, &vp, 0.0);
        assert_eq!(fish.vel.y, -2.0);
        assert_eq!(fish.pos.y, 280.0);

        fish.swim(&mut rng, &vp, 0.0);
        assert_eq!(fish.pos.y, 278.0);
        assert_eq!(fish.vel.y, -2.0);
    }

    #[test]
    fn test_swim_resample_ranges() {
        let vp = Viewport::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut fish = Fish {
            species: Species::Sardine,
            pos: Vec2::new(400.0, 150.0),
            vel: Vec2::ZERO,
            spawned_at_ms: 0.0,
        };
        fish.swim(&mut rng, &vp, 1.0);
        // Pre-integration velocity was in range; a bounce only flips the sign
        assert!(fish.vel.x.abs() <= 2.0);
        assert!((1.0..=3.0).contains(&fish.vel.y.abs()));
    }

    #[test]
    fn test_fish_expiry() {
        let fish = Fish {
            species: Species::Sardine,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            spawned_at_ms: 1000.0,
        };
        assert!(!fish.expired(31_000.0));
        assert!(fish.expired(31_000.5));
    }

    #[test]
    fn test_hook_extends_then_retracts() {
        let vp = Viewport::default();
        let mut hook = Hook::new(&vp, HOOK_SPEED);
        hook.press();
        hook.update(&vp, 400.0);
        assert_eq!(hook.pos.y, 565.0);
        assert_eq!(hook.phase(), HookPhase::Extending);

        hook.action_held = false;
        hook.update(&vp, 400.0);
        assert_eq!(hook.pos.y, 570.0);
        assert!(!hook.extending);
        assert_eq!(hook.phase(), HookPhase::Resting);
    }

    #[test]
    fn test_hook_bounces_off_top_while_held() {
        let vp = Viewport::default();
        let mut hook = Hook::new(&vp, HOOK_SPEED);
        hook.pos.y = 3.0;
        hook.press();
        hook.update(&vp, 0.0);
        assert_eq!(hook.pos.y, 0.0);
        assert_eq!(hook.phase(), HookPhase::Retracting);
        hook.update(&vp, 0.0);
        assert_eq!(hook.pos.y, 5.0);
        // Still held, so it is busy
        assert!(hook.extending);
    }

    #[test]
    fn test_hook_snaps_to_rest_on_return() {
        let vp = Viewport::default();
        let mut hook = Hook::new(&vp, HOOK_SPEED);
        hook.press();
        hook.pos.y = 568.0;
        hook.action_held = false;
        hook.update(&vp, 0.0);
        assert_eq!(hook.pos.y, 570.0);
        assert!(!hook.extending);
    }

    #[test]
    fn test_hook_x_clamped() {
        let vp = Viewport::default();
        let mut hook = Hook::new(&vp, HOOK_SPEED);
        hook.update(&vp, -50.0);
        assert_eq!(hook.pos.x, 0.0);
        hook.update(&vp, 9000.0);
        assert_eq!(hook.pos.x, 700.0);
    }

    #[test]
    fn test_catch_event_window() {
        let c = CatchEvent {
            species: Species::Sardine,
            message: Species::Sardine.catch_message(),
            caught_at_ms: 5000.0,
        };
        assert!(c.visible(6999.0, 2000.0));
        assert!(!c.visible(7001.0, 2000.0));
    }

    #[test]
    fn test_resize_clamps_entities() {
        let mut state = GameState::new(5, Viewport::default());
        state.hook.pos = Vec2::new(690.0, 570.0);
        state.fish.species = Species::Mackerel;
        state.fish.pos = Vec2::new(700.0, 250.0);

        state.resize(Viewport::fit(400.0, 300.0, 1.0));
        assert_eq!(state.hook.pos, Vec2::new(300.0, 270.0));
        assert_eq!(state.fish.pos, Vec2::new(330.0, 120.0));

        // Idempotent
        let before = (state.hook.pos, state.fish.pos);
        state.resize(Viewport::fit(400.0, 300.0, 1.0));
        assert_eq!(before, (state.hook.pos, state.fish.pos));
    }

    proptest! {
        #[test]
        fn resize_sequences_keep_entities_inside(
            sizes in prop::collection::vec((1.0f32..3000.0, 1.0f32..3000.0, 0.5f32..4.0), 1..12),
            seed in any::<u64>(),
        ) {
            let mut state = GameState::new(seed, Viewport::default());
            for (w, h, dpr) in sizes {
                let vp = Viewport::fit(w, h, dpr);
                state.resize(vp);
                let hook = state.hook.rect();
                let fish = state.fish.rect();
                let hook_max_x = (vp.css_width - hook.w).max(0.0);
                let fish_max_x = (vp.css_width - fish.w).max(0.0);
                let fish_max_y = (vp.water_line() - fish.h).max(0.0);
                prop_assert!(hook.x >= 0.0 && hook.x <= hook_max_x);
                prop_assert!(hook.y >= 0.0 && hook.y <= Hook::rest_y(&vp));
                prop_assert!(fish.x >= 0.0 && fish.x <= fish_max_x);
                prop_assert!(fish.y >= 0.0 && fish.y <= fish_max_y);
            }
        }

        #[test]
        fn swimming_stays_in_upper_half(seed in any::<u64>(), steps in 1usize..600) {
            let vp = Viewport::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut fish = Fish::spawn(&mut rng, &vp, 0.0);
            for _ in 0..steps {
                fish.swim(&mut rng, &vp, FISH_RESAMPLE_CHANCE);
                let r = fish.rect();
                prop_assert!(r.x >= 0.0 && r.right() <= vp.css_width + 1e-3);
                prop_assert!(r.y >= 0.0 && r.bottom() <= vp.water_line() + 1e-3);
            }
        }

        #[test]
        fn hook_returns_to_rest_after_release(held_steps in 0usize..200) {
            let vp = Viewport::default();
            let rest = Hook::rest_y(&vp);
            let mut hook = Hook::new(&vp, HOOK_SPEED);
            hook.press();
            for _ in 0..held_steps {
                hook.update(&vp, 0.0);
                prop_assert!(hook.pos.y >= 0.0 && hook.pos.y <= rest);
            }
            hook.action_held = false;
            let mut last_y = hook.pos.y;
            let mut steps = 0;
            while hook.extending {
                // Not at rest yet, so still busy
                prop_assert!(hook.pos.y < rest || steps == 0);
                hook.update(&vp, 0.0);
                prop_assert!(hook.pos.y >= last_y);
                last_y = hook.pos.y;
                steps += 1;
                prop_assert!(steps < 1000);
            }
            prop_assert_eq!(hook.pos.y, rest);
        }
    }
}

//! Platform abstraction layer
//!
//! Browser (or native) callbacks feed `InputEvent`s into the `FrameDriver`.
//! Once per animation frame the driver drains the queue into the game state
//! and then runs the simulation steps owed for the elapsed time.

use std::collections::VecDeque;

use thiserror::Error;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::sim::{GameState, InputEvent, StepOutcome, apply_input, tick};

/// Failures that stop the game from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no global window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas element #{0} not found")]
    NoCanvas(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("failed to create render surface: {0}")]
    Surface(String),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),
    #[error("failed to create GPU device: {0}")]
    Device(String),
}

/// What a single frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Input events applied
    pub events: usize,
    /// Simulation steps run
    pub steps: u32,
    pub catches: u32,
    pub expiries: u32,
    /// A resize event changed the viewport
    pub resized: bool,
}

/// Owns the input queue and the step accumulator
#[derive(Debug)]
pub struct FrameDriver {
    queue: VecDeque<InputEvent>,
    accumulator: f64,
    last_time: Option<f64>,
    fixed_timestep: bool,
}

impl FrameDriver {
    pub fn new(fixed_timestep: bool) -> Self {
        Self {
            queue: VecDeque::new(),
            accumulator: 0.0,
            last_time: None,
            fixed_timestep,
        }
    }

    /// Queue an event for the next frame
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one animation frame at wall-clock time `now_ms`
    pub fn frame(&mut self, state: &mut GameState, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();

        let viewport_before = state.viewport;
        while let Some(event) = self.queue.pop_front() {
            apply_input(state, &event);
            report.events += 1;
        }
        report.resized = state.viewport != viewport_before;

        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(now_ms);

        let steps = if self.fixed_timestep {
            self.accumulator += dt;
            let mut steps = 0;
            while self.accumulator >= SIM_DT_MS && steps < MAX_SUBSTEPS {
                self.accumulator -= SIM_DT_MS;
                steps += 1;
            }
            // Drop time we could not catch up on
            if steps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT_MS);
            }
            steps
        } else {
            1
        };

        let step_ms = if self.fixed_timestep { SIM_DT_MS } else { dt };
        for _ in 0..steps {
            match tick(state, step_ms) {
                StepOutcome::Caught => report.catches += 1,
                StepOutcome::Expired => report.expiries += 1,
                StepOutcome::Swimming => {}
            }
        }
        report.steps = steps;

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;

    fn state() -> GameState {
        GameState::new(11, Viewport::default())
    }

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut driver = FrameDriver::new(true);
        let mut s = state();
        let report = driver.frame(&mut s, 1000.0);
        assert_eq!(report.steps, 1);
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_fixed_step_independent_of_refresh_rate() {
        // One simulated second at 120 Hz and at 30 Hz
        let mut fast = FrameDriver::new(true);
        let mut slow = FrameDriver::new(true);
        let mut a = state();
        let mut b = state();
        fast.frame(&mut a, 0.0);
        slow.frame(&mut b, 0.0);
        for i in 1..=120 {
            fast.frame(&mut a, i as f64 * 1000.0 / 120.0);
        }
        for i in 1..=30 {
            slow.frame(&mut b, i as f64 * 1000.0 / 30.0);
        }
        let diff = a.time_ticks as i64 - b.time_ticks as i64;
        assert!(diff.abs() <= 2, "{} vs {}", a.time_ticks, b.time_ticks);
        assert!((60..=62).contains(&a.time_ticks));
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut driver = FrameDriver::new(true);
        let mut s = state();
        driver.frame(&mut s, 0.0);
        let report = driver.frame(&mut s, 10_000.0);
        assert!(report.steps <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_variable_mode_runs_one_step_per_frame() {
        let mut driver = FrameDriver::new(false);
        let mut s = state();
        for i in 0..10 {
            let report = driver.frame(&mut s, i as f64 * 7.0);
            assert_eq!(report.steps, 1);
        }
        assert_eq!(s.time_ticks, 10);
    }

    #[test]
    fn test_queue_drained_before_steps() {
        let mut driver = FrameDriver::new(true);
        let mut s = state();
        driver.push(InputEvent::PointerMove { x: 200.0 });
        driver.push(InputEvent::ActionDown);
        assert_eq!(driver.pending(), 2);

        let report = driver.frame(&mut s, 0.0);
        assert_eq!(report.events, 2);
        assert_eq!(driver.pending(), 0);
        // The step already saw both events
        assert_eq!(s.hook.pos.x, 150.0);
        assert_eq!(s.hook.pos.y, 565.0);
    }

    #[test]
    fn test_resize_reported() {
        let mut driver = FrameDriver::new(true);
        let mut s = state();
        driver.push(InputEvent::Resize {
            width: 1600.0,
            height: 1200.0,
            device_pixel_ratio: 1.0,
        });
        assert!(driver.frame(&mut s, 0.0).resized);

        driver.push(InputEvent::Resize {
            width: 1600.0,
            height: 1200.0,
            device_pixel_ratio: 1.0,
        });
        assert!(!driver.frame(&mut s, 16.0).resized);
    }

    #[test]
    fn test_startup_error_messages() {
        assert_eq!(
            StartupError::NoCanvas("game".into()).to_string(),
            "canvas element #game not found"
        );
    }
}

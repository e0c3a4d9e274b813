//! Fixed-timestep simulation loop.
//!
//! Simulation ticks run at a fixed 60 Hz from an accumulator so asteroid
//! angles advance by the same amount per tick regardless of frame rate. The
//! render callback runs once per frame with the leftover interpolation alpha.

use std::time::Instant;

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame times above this are clamped; the simulation slows down instead of
/// running dozens of catch-up ticks.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator-driven loop state.
///
/// The loop is generic over the state it drives so the update callback can
/// take it mutably while the render callback only reads it.
pub struct GameLoop {
    previous_time: Instant,
    time_scale: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a loop starting now. `time_scale` multiplies every frame time.
    pub fn new(time_scale: f64) -> Self {
        Self {
            previous_time: Instant::now(),
            time_scale: time_scale.max(0.0),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame using wall-clock time since the previous call.
    pub fn tick<S>(
        &mut self,
        state: &mut S,
        update_fn: impl FnMut(&mut S, f64, f64),
        render_fn: impl FnMut(&S, f64),
    ) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.tick_with(frame_time, state, update_fn, render_fn);
    }

    /// Runs one frame of an explicit wall-clock duration.
    ///
    /// - `update_fn(state, fixed_dt, total_sim_time)` runs zero or more times.
    /// - `render_fn(state, alpha)` runs exactly once with alpha in `[0.0, 1.0)`.
    pub fn tick_with<S>(
        &mut self,
        frame_time: f64,
        state: &mut S,
        mut update_fn: impl FnMut(&mut S, f64, f64),
        mut render_fn: impl FnMut(&S, f64),
    ) {
        let mut frame_time = frame_time.max(0.0) * self.time_scale;
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(state, FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(state, self.alpha());
        self.frame_count += 1;
    }

    /// Interpolation alpha left in the accumulator.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(loop_: &mut GameLoop, frame_time: f64) -> (u32, f64) {
        let mut updates = 0u32;
        let mut alpha = -1.0;
        loop_.tick_with(frame_time, &mut updates, |n, _, _| *n += 1, |_, a| alpha = a);
        (updates, alpha)
    }

    #[test]
    fn test_single_step() {
        let mut loop_ = GameLoop::default();
        let (updates, _) = run(&mut loop_, FIXED_DT);
        assert_eq!(updates, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_multiple_steps_pass_sim_time() {
        let mut loop_ = GameLoop::default();
        let mut times: Vec<f64> = Vec::new();
        loop_.tick_with(3.0 * FIXED_DT, &mut times, |t, _, now| t.push(now), |_, _| {});
        assert_eq!(times.len(), 3);
        assert!((times[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_frame_only_renders() {
        let mut loop_ = GameLoop::default();
        let (updates, alpha) = run(&mut loop_, 0.25 * FIXED_DT);
        assert_eq!(updates, 0);
        assert!((alpha - 0.25).abs() < 1e-10, "alpha {alpha}");
        assert_eq!(loop_.frame_count(), 1);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = GameLoop::default();
        let (updates, _) = run(&mut loop_, 1.0);
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates > 0 && updates <= max_updates, "{updates} updates");
    }

    #[test]
    fn test_time_scale_multiplies_ticks() {
        let mut normal = GameLoop::new(1.0);
        let mut fast = GameLoop::new(4.0);
        for _ in 0..30 {
            run(&mut normal, FIXED_DT);
            run(&mut fast, FIXED_DT);
        }
        assert_eq!(normal.update_count(), 30);
        // Float remainder may hold back the final tick.
        assert!((119..=120).contains(&fast.update_count()));
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut loop_ = GameLoop::default();
        let (updates, alpha) = run(&mut loop_, -5.0);
        assert_eq!(updates, 0);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_total_sim_time_tracks_updates() {
        let mut loop_ = GameLoop::default();
        for ft in [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018] {
            run(&mut loop_, ft);
        }
        let expected = loop_.update_count() as f64 * FIXED_DT;
        assert!((loop_.total_sim_time() - expected).abs() < 1e-10);
        assert_eq!(loop_.frame_count(), 7);
    }

    #[test]
    fn test_wall_clock_tick_renders_once() {
        let mut loop_ = GameLoop::default();
        let mut state = 0u32;
        loop_.tick(&mut state, |_, _, _| {}, |_, _| {});
        assert_eq!(loop_.frame_count(), 1);
        loop_.tick_with(0.0, &mut state, |_, _, _| {}, |_, _| {});
        assert_eq!(loop_.frame_count(), 2);
    }
}

//! A set of concurrently running, independently timed intervals.
//!
//! A [`Timeline`] owns an ordered list of [`Transition`]s that all share one
//! start instant. Each interval is evaluated statelessly from the time elapsed
//! since that instant, so ticking at an irregular rate never accumulates error
//! and there is nothing to retry or resume.
//!
//! The start instant is latched on the first [`Timeline::advance`] call, the
//! way a frame-driven animation begins on the next frame after it is
//! scheduled. Until then every interval reports a fraction of 0.

use std::time::Instant;

use super::Transition;

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    intervals: Vec<Transition>,
    started_at: Option<Instant>,
    elapsed_ms: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `count` copies of `transition`, each starting `step_ms` after
    /// the previous one. The first interval keeps the transition's own delay.
    pub fn staggered(count: usize, transition: Transition, step_ms: f32) -> Self {
        let mut timeline = Self::new();
        let mut delay_ms = transition.delay_ms;
        for _ in 0..count {
            timeline.push(transition.clone().delay(delay_ms));
            delay_ms += step_ms;
        }
        timeline
    }

    /// Append an interval, returning its index.
    pub fn push(&mut self, transition: Transition) -> usize {
        self.intervals.push(transition);
        self.intervals.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Transition> {
        self.intervals.get(index)
    }

    pub fn last(&self) -> Option<&Transition> {
        self.intervals.last()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.intervals.iter()
    }

    /// Advance to `now`. Returns true while any interval is still running.
    pub fn advance(&mut self, now: Instant) -> bool {
        let started_at = *self.started_at.get_or_insert(now);
        self.elapsed_ms = now.saturating_duration_since(started_at).as_micros() as f32 / 1000.0;
        !self.is_complete()
    }

    /// Milliseconds since the first tick.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Eased progress of interval `index`; 0 for an unknown index.
    pub fn fraction(&self, index: usize) -> f32 {
        self.intervals
            .get(index)
            .map_or(0.0, |interval| interval.fraction(self.elapsed_ms))
    }

    /// Time at which the last interval finishes.
    pub fn total_ms(&self) -> f32 {
        self.intervals
            .iter()
            .map(Transition::end_ms)
            .fold(0.0, f32::max)
    }

    pub fn is_complete(&self) -> bool {
        self.has_started() && self.elapsed_ms >= self.total_ms()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::TimingFunction;

    fn linear(duration_ms: f32) -> Transition {
        Transition::new(duration_ms, TimingFunction::Linear)
    }

    #[test]
    fn test_staggered_delays() {
        let timeline = Timeline::staggered(4, linear(100.0), 25.0);
        let delays: Vec<f32> = timeline.iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, vec![0.0, 25.0, 50.0, 75.0]);
    }

    #[test]
    fn test_not_started_reports_zero() {
        let timeline = Timeline::staggered(2, linear(100.0), 0.0);
        assert!(!timeline.has_started());
        assert!(!timeline.is_complete());
        assert_eq!(timeline.fraction(0), 0.0);
    }

    #[test]
    fn test_first_advance_latches_start() {
        let mut timeline = Timeline::staggered(1, linear(100.0), 0.0);
        let t0 = Instant::now();
        assert!(timeline.advance(t0 + Duration::from_millis(500)));
        assert_eq!(timeline.elapsed_ms(), 0.0);

        timeline.advance(t0 + Duration::from_millis(550));
        assert!((timeline.fraction(0) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_completes_after_last_interval() {
        let mut timeline = Timeline::staggered(3, linear(100.0), 50.0);
        let t0 = Instant::now();
        timeline.advance(t0);
        assert_eq!(timeline.total_ms(), 200.0);
        assert!(timeline.advance(t0 + Duration::from_millis(199)));
        assert!(!timeline.advance(t0 + Duration::from_millis(200)));
        assert!(timeline.is_complete());
        for index in 0..3 {
            assert_eq!(timeline.fraction(index), 1.0);
        }
    }

    #[test]
    fn test_unknown_index() {
        let mut timeline = Timeline::staggered(1, linear(100.0), 0.0);
        let t0 = Instant::now();
        timeline.advance(t0);
        timeline.advance(t0 + Duration::from_secs(1));
        assert_eq!(timeline.fraction(7), 0.0);
    }

    #[test]
    fn test_push_returns_index() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.push(linear(10.0)), 0);
        assert_eq!(timeline.push(linear(10.0).delay(5.0)), 1);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.last().map(|t| t.delay_ms), Some(5.0));
    }
}

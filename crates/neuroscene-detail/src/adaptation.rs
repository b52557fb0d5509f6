// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Frame-rate driven level adaptation.
//!
//! Samples are averaged over a rolling window. The average selects a band:
//! `>= high_fps_threshold` is high, `>= medium_fps_threshold` is medium,
//! anything lower is low.
//!
//! - Downgrade: as soon as a full window averages below the current band,
//!   jump straight to the band's level.
//! - Upgrade: one step at a time, once the better band has been held for
//!   `recovery_delay` and at least `recovery_delay` has passed since the
//!   previous level change.
//!
//! `Dynamic` ranks as medium and is only left when the band changes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::{DetailError, DetailResult};
use crate::level::DetailLevel;

pub const HIGH_FPS_THRESHOLD: f64 = 55.0;
pub const MEDIUM_FPS_THRESHOLD: f64 = 35.0;
pub const RECOVERY_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_SAMPLE_WINDOW: usize = 30;

/// Thresholds and timing of frame-rate adaptation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptationPolicy {
    pub high_fps_threshold: f64,
    pub medium_fps_threshold: f64,
    pub recovery_delay: Duration,
    pub sample_window: usize,
}

impl Default for AdaptationPolicy {
    fn default() -> Self {
        Self {
            high_fps_threshold: HIGH_FPS_THRESHOLD,
            medium_fps_threshold: MEDIUM_FPS_THRESHOLD,
            recovery_delay: RECOVERY_DELAY,
            sample_window: DEFAULT_SAMPLE_WINDOW,
        }
    }
}

impl AdaptationPolicy {
    pub fn validate(&self) -> DetailResult<()> {
        if !(self.medium_fps_threshold > 0.0) {
            return Err(DetailError::InvalidPolicy(format!(
                "medium_fps_threshold must be positive, got {}",
                self.medium_fps_threshold
            )));
        }
        if !(self.high_fps_threshold > self.medium_fps_threshold) {
            return Err(DetailError::InvalidPolicy(format!(
                "high_fps_threshold ({}) must exceed medium_fps_threshold ({})",
                self.high_fps_threshold, self.medium_fps_threshold
            )));
        }
        if self.sample_window == 0 {
            return Err(DetailError::InvalidPolicy(
                "sample_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Level whose band contains `average_fps`
    pub fn band(&self, average_fps: f64) -> DetailLevel {
        if average_fps >= self.high_fps_threshold {
            DetailLevel::High
        } else if average_fps >= self.medium_fps_threshold {
            DetailLevel::Medium
        } else {
            DetailLevel::Low
        }
    }
}

/// Rolling frame-rate window plus the timing state needed for hysteresis
#[derive(Debug, Clone)]
pub struct FrameRateMonitor {
    policy: AdaptationPolicy,
    samples: VecDeque<f64>,
    sum: f64,
    better_since: Option<Instant>,
    last_change: Option<Instant>,
}

impl FrameRateMonitor {
    pub fn new(policy: AdaptationPolicy) -> Self {
        Self {
            samples: VecDeque::with_capacity(policy.sample_window),
            policy,
            sum: 0.0,
            better_since: None,
            last_change: None,
        }
    }

    pub fn policy(&self) -> &AdaptationPolicy {
        &self.policy
    }

    /// Average of the current window, `None` until the window is full
    pub fn average(&self) -> Option<f64> {
        (self.samples.len() >= self.policy.sample_window)
            .then(|| self.sum / self.samples.len() as f64)
    }

    /// Record one sample and return the level to switch to, if any.
    ///
    /// Non-finite or negative samples are ignored.
    pub fn observe(&mut self, fps: f64, at: Instant, current: DetailLevel) -> Option<DetailLevel> {
        if !fps.is_finite() || fps < 0.0 {
            trace!("Ignoring frame-rate sample {}", fps);
            return None;
        }

        self.samples.push_back(fps);
        self.sum += fps;
        while self.samples.len() > self.policy.sample_window {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }

        let average = self.average()?;
        let band = self.policy.band(average);

        if band.rank() < current.rank() {
            self.better_since = None;
            self.last_change = Some(at);
            return Some(band);
        }

        if band.rank() == current.rank() {
            self.better_since = None;
            return None;
        }

        let held_since = *self.better_since.get_or_insert(at);
        let held = at.saturating_duration_since(held_since) >= self.policy.recovery_delay;
        let settled = self
            .last_change
            .map_or(true, |t| at.saturating_duration_since(t) >= self.policy.recovery_delay);

        if held && settled {
            self.better_since = None;
            self.last_change = Some(at);
            Some(current.step_up())
        } else {
            None
        }
    }

    /// Note a level change made outside adaptation (forced level)
    pub fn note_change(&mut self, at: Instant) {
        self.better_since = None;
        self.last_change = Some(at);
    }

    /// Drop all samples and timing state
    pub fn reset(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
        self.better_since = None;
        self.last_change = None;
    }
}

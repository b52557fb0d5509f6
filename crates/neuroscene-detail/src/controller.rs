// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Adaptive detail controller.

Owns the frozen per-level bundles and the one piece of mutable shared state
in a scene: which bundle is active. Consumers never hold a private copy; they
read `current()`, follow a `subscribe()` receiver, or register `on_change`
callbacks. Each transition is published exactly once to all three.

Each visualization owns its own controller and passes it around by handle
(`Arc<DetailController>`); there is no global instance.

## Transitions

- `force_level`: switch immediately and pin; adaptation is suspended until
  `release_forced_level`.
- `record_frame_rate`: feed a sample to the adaptation monitor (see
  [`crate::adaptation`]); switches when the monitor decides to.

## Observers

Callbacks run on the thread that caused the transition, in transition
order, while the controller's state lock is held. They may read `current()`,
`level()` or `bundle()` and may register further observers, but must not call
`force_level`, `release_forced_level`, `record_frame_rate` or `is_pinned`.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::adaptation::{AdaptationPolicy, FrameRateMonitor};
use crate::bundle::{DetailConfig, DetailOverride, DetailPresets};
use crate::error::DetailResult;
use crate::level::{DetailLevel, DeviceClass};

type ChangeObserver = Arc<dyn Fn(&DetailConfig) + Send + Sync>;

/// Start-up options of a controller
#[derive(Debug, Clone)]
pub struct DetailOptions {
    /// Level used when nothing is forced and no device class is known
    pub default_level: DetailLevel,
    /// Pin this level from the start
    pub forced_level: Option<DetailLevel>,
    pub device_class: Option<DeviceClass>,
    /// Partial per-level overrides merged into the presets
    pub overrides: AHashMap<DetailLevel, DetailOverride>,
    /// Enable frame-rate adaptation
    pub adaptive: bool,
    pub policy: AdaptationPolicy,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            default_level: DetailLevel::Medium,
            forced_level: None,
            device_class: None,
            overrides: AHashMap::new(),
            adaptive: true,
            policy: AdaptationPolicy::default(),
        }
    }
}

impl DetailOptions {
    /// forced level, else device-implied level, else default
    pub fn initial_level(&self) -> DetailLevel {
        self.forced_level
            .or_else(|| self.device_class.map(|d| d.implied_level()))
            .unwrap_or(self.default_level)
    }
}

#[derive(Debug)]
struct ControlState {
    level: DetailLevel,
    pinned: bool,
    monitor: FrameRateMonitor,
}

pub struct DetailController {
    presets: DetailPresets,
    adaptive: bool,
    active: RwLock<Arc<DetailConfig>>,
    state: Mutex<ControlState>,
    sender: watch::Sender<Arc<DetailConfig>>,
    observers: RwLock<Vec<ChangeObserver>>,
}

impl std::fmt::Debug for DetailController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailController")
            .field("level", &self.level())
            .field("adaptive", &self.adaptive)
            .field("observers", &self.observers.read().len())
            .finish()
    }
}

impl DetailController {
    /// Build bundles and select the initial level.
    ///
    /// # Errors
    ///
    /// Returns `DetailError::InvalidPolicy` if the adaptation thresholds are
    /// inconsistent.
    pub fn new(options: DetailOptions) -> DetailResult<Self> {
        options.policy.validate()?;

        let presets = DetailPresets::build(&options.overrides, options.device_class);
        let level = options.initial_level();
        let initial = presets.get(level).clone();
        let (sender, _) = watch::channel(initial.clone());

        info!(
            "Detail controller initialized at '{}' (device: {}, forced: {}, adaptive: {})",
            level,
            options
                .device_class
                .map_or("unknown", |d| d.as_str()),
            options.forced_level.is_some(),
            options.adaptive
        );

        Ok(Self {
            presets,
            adaptive: options.adaptive,
            active: RwLock::new(initial),
            state: Mutex::new(ControlState {
                level,
                pinned: options.forced_level.is_some(),
                monitor: FrameRateMonitor::new(options.policy),
            }),
            sender,
            observers: RwLock::new(Vec::new()),
        })
    }

    /// Active bundle. Always a complete bundle.
    pub fn current(&self) -> Arc<DetailConfig> {
        self.active.read().clone()
    }

    pub fn level(&self) -> DetailLevel {
        self.active.read().level
    }

    pub fn is_pinned(&self) -> bool {
        self.state.lock().pinned
    }

    /// Frozen bundle of any level, active or not
    pub fn bundle(&self, level: DetailLevel) -> Arc<DetailConfig> {
        self.presets.get(level).clone()
    }

    /// Receiver that observes every published bundle
    pub fn subscribe(&self) -> watch::Receiver<Arc<DetailConfig>> {
        self.sender.subscribe()
    }

    /// Register a callback run after every transition.
    ///
    /// Observers registered from inside a callback see the next transition.
    pub fn on_change<F>(&self, observer: F)
    where
        F: Fn(&DetailConfig) + Send + Sync + 'static,
    {
        self.observers.write().push(Arc::new(observer));
    }

    /// Switch to `level` immediately and pin it.
    ///
    /// Observers are notified once even when `level` is already active.
    pub fn force_level(&self, level: DetailLevel) {
        let mut state = self.state.lock();
        state.level = level;
        state.pinned = true;
        state.monitor.note_change(Instant::now());
        let bundle = self.swap_active(level);
        info!("Detail level forced to '{}'", level);
        self.notify(&bundle);
    }

    /// Resume adaptation from the current level with a fresh sample window
    pub fn release_forced_level(&self) {
        let mut state = self.state.lock();
        if state.pinned {
            state.pinned = false;
            state.monitor.reset();
            debug!("Released forced detail level '{}'", state.level);
        }
    }

    /// Feed one frame-rate sample taken at `at`.
    ///
    /// Returns the new level when the sample caused a transition. Samples are
    /// ignored while a level is pinned or adaptation is disabled.
    pub fn record_frame_rate(&self, fps: f64, at: Instant) -> Option<DetailLevel> {
        if !self.adaptive {
            return None;
        }

        let mut state = self.state.lock();
        if state.pinned {
            return None;
        }
        let current = state.level;
        let next = state.monitor.observe(fps, at, current)?;
        state.level = next;
        debug!(
            "Adapting detail level '{}' -> '{}' (avg {:.1} fps)",
            current,
            next,
            state.monitor.average().unwrap_or(fps)
        );
        let bundle = self.swap_active(next);
        self.notify(&bundle);
        Some(next)
    }

    fn swap_active(&self, level: DetailLevel) -> Arc<DetailConfig> {
        let bundle = self.presets.get(level).clone();
        *self.active.write() = bundle.clone();
        self.sender.send_replace(bundle.clone());
        bundle
    }

    /// Caller holds the state lock. The observer list is snapshotted so a
    /// callback can register observers without deadlocking.
    fn notify(&self, bundle: &DetailConfig) {
        let observers: Vec<ChangeObserver> = self.observers.read().clone();
        for observer in &observers {
            observer(bundle);
        }
    }
}

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# neuroscene Detail

Adaptive level-of-detail control for brain-model render surfaces.

A [`DetailController`] holds four frozen bundles (`low`, `medium`, `high`,
`dynamic`) of rendering-cost knobs and exposes the active one. The level
changes when a caller forces one, or when recorded frame rates cross the
adaptation bands (55 / 35 fps, 2000 ms recovery).

```rust
use neuroscene_detail::{DetailController, DetailLevel, DetailOptions};

let controller = DetailController::new(DetailOptions {
    default_level: DetailLevel::High,
    ..DetailOptions::default()
}).unwrap();

let mut updates = controller.subscribe();
controller.force_level(DetailLevel::Low);
assert_eq!(updates.borrow_and_update().level, DetailLevel::Low);
```

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adaptation;
pub mod bundle;
pub mod controller;
pub mod error;
pub mod level;
#[cfg(feature = "config")]
mod settings;

pub use adaptation::{
    AdaptationPolicy, FrameRateMonitor, DEFAULT_SAMPLE_WINDOW, HIGH_FPS_THRESHOLD,
    MEDIUM_FPS_THRESHOLD, RECOVERY_DELAY,
};
pub use bundle::{DetailConfig, DetailOverride, DetailPresets, HIGH_DEVICE_BONUS, LOW_DEVICE_PENALTY};
pub use controller::{DetailController, DetailOptions};
pub use error::{DetailError, DetailResult};
pub use level::{DetailLevel, DeviceClass};

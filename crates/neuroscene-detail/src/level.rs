// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Detail levels and host device classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DetailError;

/// Discrete rendering-quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    Medium,
    High,
    /// Own tag, medium cost profile
    Dynamic,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 4] = [
        DetailLevel::Low,
        DetailLevel::Medium,
        DetailLevel::High,
        DetailLevel::Dynamic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Low => "low",
            DetailLevel::Medium => "medium",
            DetailLevel::High => "high",
            DetailLevel::Dynamic => "dynamic",
        }
    }

    /// Ordering used by frame-rate adaptation. `Dynamic` ranks as `Medium`.
    pub fn rank(&self) -> u8 {
        match self {
            DetailLevel::Low => 0,
            DetailLevel::Medium | DetailLevel::Dynamic => 1,
            DetailLevel::High => 2,
        }
    }

    pub(crate) fn from_rank(rank: u8) -> Self {
        match rank {
            0 => DetailLevel::Low,
            1 => DetailLevel::Medium,
            _ => DetailLevel::High,
        }
    }

    /// One step up, saturating at `High`
    pub fn step_up(&self) -> Self {
        Self::from_rank((self.rank() + 1).min(2))
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = DetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| DetailError::UnknownLevel(s.to_string()))
    }
}

/// Coarse performance classification of the host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Low,
    Medium,
    High,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Low => "low",
            DeviceClass::Medium => "medium",
            DeviceClass::High => "high",
        }
    }

    /// Level a device of this class starts at when nothing is forced
    pub fn implied_level(&self) -> DetailLevel {
        match self {
            DeviceClass::Low => DetailLevel::Low,
            DeviceClass::Medium => DetailLevel::Medium,
            DeviceClass::High => DetailLevel::High,
        }
    }

    /// Classify from logical core count and (if known) memory in GiB.
    ///
    /// Two cores or fewer, or under 4 GiB, is `Low`. Eight cores or more with
    /// at least 8 GiB (or unknown memory) is `High`. Everything else is `Medium`.
    pub fn classify(hardware_concurrency: usize, memory_gb: Option<f64>) -> Self {
        let memory_low = memory_gb.is_some_and(|gb| gb < 4.0);
        let memory_ok = memory_gb.map_or(true, |gb| gb >= 8.0);

        if hardware_concurrency <= 2 || memory_low {
            DeviceClass::Low
        } else if hardware_concurrency >= 8 && memory_ok {
            DeviceClass::High
        } else {
            DeviceClass::Medium
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = DetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(DeviceClass::Low),
            "medium" => Ok(DeviceClass::Medium),
            "high" => Ok(DeviceClass::High),
            other => Err(DetailError::UnknownDeviceClass(other.to_string())),
        }
    }
}

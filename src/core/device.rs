// src/core/device.rs
//
// Compute device selection. A device is an explicit value handed to the
// transform; nothing here is ambient state.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::MfccError;

/// Where spectral frames are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Single thread, on the caller's thread
    Cpu,
    /// Frame-parallel on a dedicated rayon pool
    Parallel { threads: usize },
}

impl Default for Device {
    fn default() -> Self {
        Self::Cpu
    }
}

impl Device {
    /// Prefer the parallel backend when the host has more than one hardware
    /// thread, otherwise fall back to the single-threaded one.
    pub fn detect() -> Self {
        match std::thread::available_parallelism() {
            Ok(n) if n.get() > 1 => Self::Parallel { threads: n.get() },
            _ => Self::Cpu,
        }
    }

    pub fn is_accelerated(&self) -> bool {
        matches!(self, Self::Parallel { .. })
    }

    /// Acquire the execution resources for this device.
    pub fn bind(&self) -> Result<Executor, MfccError> {
        match *self {
            Self::Cpu => Ok(Executor::Serial),
            Self::Parallel { threads: 0 } => Err(MfccError::DeviceUnavailable {
                device: self.to_string(),
                reason: "no worker threads requested".to_string(),
            }),
            Self::Parallel { threads } => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map(Executor::Pool)
                .map_err(|e| MfccError::DeviceUnavailable {
                    device: self.to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Parallel { threads } => write!(f, "parallel({})", threads),
        }
    }
}

impl FromStr for Device {
    type Err = String;

    /// Accepts `cpu`, `parallel` (all hardware threads) and `parallel:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.split_once(':') {
            None if lower == "cpu" => Ok(Self::Cpu),
            None if lower == "parallel" => Ok(Self::Parallel {
                threads: std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1),
            }),
            Some(("parallel", n)) => n
                .parse()
                .map(|threads| Self::Parallel { threads })
                .map_err(|_| format!("Invalid thread count: {}", n)),
            _ => Err(format!("Unknown device: {}", s)),
        }
    }
}

/// A bound device, ready to run work
pub enum Executor {
    Serial,
    Pool(ThreadPool),
}

impl Executor {
    /// Evaluate `f` for `0..n`, returning results in index order.
    pub fn map_indices<T, F>(&self, n: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            Executor::Serial => (0..n).map(f).collect(),
            Executor::Pool(pool) => pool.install(|| (0..n).into_par_iter().map(f).collect()),
        }
    }
}

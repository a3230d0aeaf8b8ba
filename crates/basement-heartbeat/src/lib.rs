//! Fixed-interval heartbeat for Basement sessions.
//!
//! Standalone (`external`) sessions tell the platform they are still alive
//! by calling `channelHeartbeat` once a minute. This crate provides the
//! timing half of that: a [`HeartbeatScheduler`] that resolves once per
//! interval, and a [`HeartbeatHandle`] that runs it as a background Tokio
//! task and fires a caller-supplied beat on every tick.
//!
//! The crate knows nothing about HTTP or tokens. Beats are fire-and-forget:
//! each one runs in its own task, a slow beat never delays the next one,
//! and whatever a beat returns is dropped.
//!
//! # Lifecycle
//!
//! ```text
//! spawn() ──→ [Running] ──→ stop() / drop ──→ [Stopped]
//!                 │
//!                 └─ every `interval`: beat()
//! ```
//!
//! The first beat fires one full interval after `spawn`, not immediately.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when the runtime was too busy to fire a beat on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissedBeatPolicy {
    /// Drop the missed beats and stay on the original cadence.
    #[default]
    Skip,
    /// Fire every missed beat back to back, then resume the cadence.
    Burst,
    /// Fire one beat now and restart the cadence from this moment.
    Delay,
}

impl From<MissedBeatPolicy> for MissedTickBehavior {
    fn from(policy: MissedBeatPolicy) -> Self {
        match policy {
            MissedBeatPolicy::Skip => MissedTickBehavior::Skip,
            MissedBeatPolicy::Burst => MissedTickBehavior::Burst,
            MissedBeatPolicy::Delay => MissedTickBehavior::Delay,
        }
    }
}

/// Heartbeat timing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Time between beats. Default: 60 seconds.
    pub interval: Duration,
    /// Missed-beat handling. Default: [`MissedBeatPolicy::Skip`].
    pub policy: MissedBeatPolicy,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            policy: MissedBeatPolicy::default(),
        }
    }
}

impl HeartbeatConfig {
    /// The platform's expected heartbeat period.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Shortest interval accepted; anything below is clamped up to it.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a config with a specific interval and default policy.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`HeartbeatScheduler::new`].
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "heartbeat interval below minimum, clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Information about a fired beat, returned by
/// [`HeartbeatScheduler::wait_for_beat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatInfo {
    /// Monotonically increasing beat number (starts at 1).
    pub beat: u64,
    /// How long after its scheduled time the beat actually fired.
    pub late_by: Duration,
}

/// Resolves once per heartbeat interval.
///
/// Must be created from within a Tokio runtime.
pub struct HeartbeatScheduler {
    config: HeartbeatConfig,
    interval: Interval,
    beat_count: u64,
}

impl HeartbeatScheduler {
    /// Creates a scheduler whose first beat is one interval from now.
    pub fn new(config: HeartbeatConfig) -> Self {
        let config = config.validated();
        let mut interval = time::interval_at(Instant::now() + config.interval, config.interval);
        interval.set_missed_tick_behavior(config.policy.into());

        debug!(
            interval_secs = config.interval.as_secs_f64(),
            policy = ?config.policy,
            "heartbeat scheduler created"
        );

        Self {
            config,
            interval,
            beat_count: 0,
        }
    }

    /// Waits until the next beat is due.
    pub async fn wait_for_beat(&mut self) -> BeatInfo {
        let scheduled = self.interval.tick().await;
        self.beat_count += 1;
        let late_by = Instant::now().saturating_duration_since(scheduled);

        trace!(beat = self.beat_count, late_ms = late_by.as_millis() as u64, "heartbeat due");

        BeatInfo {
            beat: self.beat_count,
            late_by,
        }
    }

    /// Number of beats fired so far.
    pub fn beat_count(&self) -> u64 {
        self.beat_count
    }

    /// The (validated) time between beats.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }
}

// ---------------------------------------------------------------------------
// Background handle
// ---------------------------------------------------------------------------

/// Errors that can occur when starting a heartbeat.
#[derive(Debug, thiserror::Error)]
pub enum HeartbeatError {
    /// There is no Tokio runtime to run the background task on.
    #[error("heartbeat requires a running Tokio runtime")]
    NoRuntime,
}

/// A running heartbeat.
///
/// Owns the background task: dropping the handle (or calling
/// [`stop`](Self::stop)) cancels it. Beats already in flight are left to
/// finish on their own.
pub struct HeartbeatHandle {
    task: JoinHandle<()>,
    beats: Arc<AtomicU64>,
    interval: Duration,
}

impl HeartbeatHandle {
    /// Starts firing `beat` every `config.interval` on the current runtime.
    ///
    /// # Errors
    /// Returns [`HeartbeatError::NoRuntime`] when called outside a Tokio
    /// runtime.
    pub fn spawn<F, Fut>(config: HeartbeatConfig, beat: F) -> Result<Self, HeartbeatError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| HeartbeatError::NoRuntime)?;
        let config = config.validated();
        let interval = config.interval;
        let beats = Arc::new(AtomicU64::new(0));

        let fired = Arc::clone(&beats);
        let task = runtime.spawn(async move {
            let mut scheduler = HeartbeatScheduler::new(config);
            loop {
                let info = scheduler.wait_for_beat().await;
                fired.fetch_add(1, Ordering::Relaxed);
                debug!(beat = info.beat, "sending heartbeat");
                tokio::spawn(beat());
            }
        });

        info!(interval_secs = interval.as_secs_f64(), "heartbeat started");

        Ok(Self {
            task,
            beats,
            interval,
        })
    }

    /// Number of beats fired so far.
    pub fn beats_fired(&self) -> u64 {
        self.beats.load(Ordering::Relaxed)
    }

    /// Time between beats.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the heartbeat. Equivalent to dropping the handle.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for HeartbeatHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            self.task.abort();
            info!(beats = self.beats_fired(), "heartbeat stopped");
        }
    }
}

impl std::fmt::Debug for HeartbeatHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeartbeatHandle")
            .field("interval", &self.interval)
            .field("beats_fired", &self.beats_fired())
            .field("running", &self.is_running())
            .finish()
    }
}

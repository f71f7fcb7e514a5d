//! Frame-paced render loop
//!
//! Each iteration drains pending host events, ticks the visualizer and then
//! sleeps until the next frame deadline. A late iteration skips the deadlines
//! it missed instead of running them back to back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::RenderLoopConfig;
use crate::foundation::time::FrameClock;
use crate::input::HostEvent;
use crate::render::RenderBackend;
use crate::visualizer::{Visualizer, VisualizerError};

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another frame
    Continue,
    /// Stop scheduling frames
    Stop,
}

/// Frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames ticked and drawn
    pub frames_drawn: u64,
    /// Frame deadlines skipped because the loop ran late
    pub frames_dropped: u64,
}

/// Stops a running loop from any thread
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the loop to stop after the current iteration
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Drives a [`Visualizer`] at a fixed cadence
#[derive(Debug)]
pub struct RenderLoop {
    frame_interval: Duration,
    clock: FrameClock,
    stats: FrameStats,
    stop: StopHandle,
    frame_limit: Option<u64>,
}

impl RenderLoop {
    /// Loop targeting `target_fps` frames per second
    pub fn new(target_fps: f32) -> Self {
        let fps = if target_fps.is_finite() && target_fps > 0.0 {
            target_fps
        } else {
            log::warn!("Invalid target fps {}, using 60", target_fps);
            60.0
        };
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            stop: StopHandle::default(),
            frame_limit: None,
        }
    }

    /// Loop paced by `config`
    pub fn from_config(config: &RenderLoopConfig) -> Self {
        Self::new(config.target_fps)
    }

    /// Stop by itself after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Time budget of one frame
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Handle that stops this loop
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Counters so far
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run one iteration without pacing
    ///
    /// For hosts that own the frame callback. Returns [`LoopControl::Stop`]
    /// once the event channel closed, a teardown event arrived or a stop was
    /// requested.
    pub fn step<B: RenderBackend>(
        &mut self,
        visualizer: &mut Visualizer<B>,
        events: &Receiver<HostEvent>,
    ) -> Result<LoopControl, VisualizerError> {
        if self.stop.is_stopped() || visualizer.is_torn_down() {
            return Ok(LoopControl::Stop);
        }

        let mut control = LoopControl::Continue;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if visualizer.handle_event(event)? == LoopControl::Stop {
                        return Ok(LoopControl::Stop);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::info!("Host event channel closed, stopping after this frame");
                    control = LoopControl::Stop;
                    break;
                }
            }
        }

        let dt = self.clock.tick();
        visualizer.tick(dt)?;
        self.stats.frames_drawn += 1;

        if self.frame_limit.map_or(false, |limit| self.stats.frames_drawn >= limit) {
            control = LoopControl::Stop;
        }
        Ok(control)
    }

    /// Run until stopped
    ///
    /// Backend failures stop the loop and are returned.
    pub fn run<B: RenderBackend>(
        &mut self,
        visualizer: &mut Visualizer<B>,
        events: &Receiver<HostEvent>,
    ) -> Result<FrameStats, VisualizerError> {
        log::info!("Render loop started at {:.1} fps", 1.0 / self.frame_interval.as_secs_f32());
        let mut deadline = Instant::now();

        loop {
            match self.step(visualizer, events) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Stop) => break,
                Err(e) => {
                    log::error!("Render loop stopped: {}", e);
                    return Err(e);
                }
            }

            deadline += self.frame_interval;
            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
            } else {
                let missed = self.missed_deadlines(now - deadline);
                if missed > 0 {
                    log::trace!("Dropping {} late frames", missed);
                    self.stats.frames_dropped += missed;
                    deadline += self.frame_interval * missed as u32;
                }
            }
        }

        log::info!(
            "Render loop stopped after {} frames ({} dropped)",
            self.stats.frames_drawn,
            self.stats.frames_dropped
        );
        Ok(self.stats)
    }

    /// Whole frame intervals contained in `lateness`
    fn missed_deadlines(&self, lateness: Duration) -> u64 {
        (lateness.as_nanos() / self.frame_interval.as_nanos().max(1)) as u64
    }
}

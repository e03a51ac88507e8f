use std::time::{Duration, Instant};

use log::debug;

use crate::{
    platform::{HitTestResult, ViewerPose},
    session::{LifecycleEvent, LifecycleState},
};

/// Everything a frame callback gets to know about the frame it is running in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frames presented so far by this manager, starting at zero
    pub index: u64,
    /// Time since the manager was built. Never decreases.
    pub elapsed: Duration,
    /// Time since the previous frame
    pub delta: Duration,
    /// Whether this frame is being presented by an immersive session
    pub immersive: bool,
    /// The viewer's pose, for immersive frames with tracking
    pub viewer_pose: Option<ViewerPose>,
    /// The hit test result, only if `hit-test` was negotiated and something was hit
    pub hit_test: Option<HitTestResult>,
}

impl Frame {
    /// [`Frame::elapsed`] in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// [`Frame::delta`] in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// The result of calling `update()` on the manager.
#[derive(Debug, Clone, PartialEq)]
pub struct TickData {
    /// The state before this tick
    pub previous_state: LifecycleState,
    /// The state after this tick
    pub current_state: LifecycleState,
    /// What happened during this tick, in order
    pub events: Vec<LifecycleEvent>,
    /// The frame that was presented, if any
    pub frame: Option<Frame>,
}

#[derive(Debug)]
pub(crate) struct PerformanceTimers {
    pub frame_start: Instant,
    pub timings: Vec<Duration>,
    pub last_update: Instant,
}

impl PerformanceTimers {
    pub fn start(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn end(&mut self) {
        let now = Instant::now();
        self.timings.push(now - self.frame_start);

        if (now - self.last_update).as_secs_f32() >= 1.0 {
            let total: Duration = self.timings.iter().sum();
            let average = total / self.timings.len() as u32;
            debug!(
                "[XRLOOP_PERF] Average tick time: {:.3}ms over {} frames",
                average.as_secs_f64() * 1000.0,
                self.timings.len()
            );
            self.last_update = now;
            self.timings.clear();
        }
    }
}

impl Default for PerformanceTimers {
    fn default() -> Self {
        Self {
            frame_start: Instant::now(),
            last_update: Instant::now(),
            timings: Default::default(),
        }
    }
}

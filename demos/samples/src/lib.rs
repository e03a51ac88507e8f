//! The sample scenes built on `xrloop`, and a runner that plays one against the simulator.

use std::{rc::Rc, time::Duration};

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use tokio::{
    task::{AbortHandle, JoinHandle},
    time::Instant,
};
use xrloop::{
    mount,
    simulator::{SimulatedAssets, SimulatedPlatform, SimulatedSurface},
    surface::RenderSurface,
    LifecycleEvent, LifecycleState, TickData, XrSessionManager,
};

use crate::config::DemoConfig;

pub mod config;
pub mod registry;
pub mod scenes;

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented, inline or immersive
    pub frames: usize,
    /// Frames presented by a session
    pub immersive_frames: usize,
    /// Sessions granted
    pub sessions_started: usize,
    /// Sessions ended, by anyone
    pub sessions_ended: usize,
    /// Errors shown to the user
    pub errors: usize,
}

impl RunSummary {
    fn record(&mut self, tick: &TickData) {
        if let Some(frame) = &tick.frame {
            self.frames += 1;
            if frame.immersive {
                self.immersive_frames += 1;
            }
        }

        for event in &tick.events {
            match event {
                LifecycleEvent::SessionStarted { .. } => self.sessions_started += 1,
                LifecycleEvent::SessionEnded { .. } => self.sessions_ended += 1,
                LifecycleEvent::Error(_) => self.errors += 1,
                _ => {}
            }
        }
    }
}

/// Mount the configured sample against the simulator and drive it at the configured refresh rate
/// until `run_for_secs` is up.
///
/// Must be called from within a [`tokio::task::LocalSet`]: the simulator settles its queries and
/// loads on a local task of its own, after `resolution_delay_ms`.
pub async fn run(config: DemoConfig) -> Result<RunSummary> {
    config.validate()?;
    let sample = registry::find(&config.sample).ok_or_else(|| {
        anyhow!(
            "Unknown sample {:?}, expected one of: {}",
            config.sample,
            registry::names().join(", ")
        )
    })?;
    info!("[XRLOOP_SAMPLES] Running {}: {}", sample.title, sample.description);

    let platform = SimulatedPlatform::manual(config.simulator.clone());
    let assets = SimulatedAssets::manual();
    let surface = SimulatedSurface::new(config.extent);

    let builder = XrSessionManager::builder()
        .platform(Some(Rc::new(platform.clone())))
        .asset_loader(Rc::new(assets.clone()));
    let mut mounted = mount((sample.create)(), builder, || {
        Ok(Box::new(surface.clone()) as Box<dyn RenderSurface>)
    })?;

    // Stops the resolver however this function returns.
    let _resolver = AbortOnDrop(
        spawn_resolver(
            platform.clone(),
            assets,
            Duration::from_millis(config.resolution_delay_ms),
        )
        .abort_handle(),
    );

    let run_for = Duration::from_secs_f32(config.run_for_secs);
    let end_session_after = config.end_session_after_secs.map(Duration::from_secs_f32);

    let mut summary = RunSummary::default();
    let mut entered = false;
    let mut session_started_at = None;
    let mut interval = tokio::time::interval(config.frame_interval());
    let started = Instant::now();

    while started.elapsed() < run_for {
        interval.tick().await;
        let tick = mounted.update()?;
        summary.record(&tick);

        for event in &tick.events {
            match event {
                LifecycleEvent::SessionStarted { .. } => session_started_at = Some(Instant::now()),
                LifecycleEvent::SessionEnded { .. } => session_started_at = None,
                _ => {}
            }
        }

        if config.auto_enter && !entered && tick.current_state == LifecycleState::Idle {
            entered = true;
            if let Err(e) = mounted.enter() {
                warn!("[XRLOOP_SAMPLES] Unable to enter the session: {e}");
            }
        }

        // Stand in for the user taking the headset off.
        if let (Some(after), Some(at)) = (end_session_after, session_started_at) {
            if at.elapsed() >= after && platform.end_active_session() {
                info!("[XRLOOP_SAMPLES] Ending the session from the platform");
                session_started_at = None;
            }
        }
    }

    mounted.unmount();
    info!(
        "[XRLOOP_SAMPLES] Presented {} frames",
        surface.snapshot().presents
    );

    Ok(summary)
}

/// Aborts a task when dropped
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn spawn_resolver(
    platform: SimulatedPlatform,
    assets: SimulatedAssets,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::task::spawn_local(async move {
        let mut interval = tokio::time::interval(delay);
        // The first tick completes straight away.
        interval.tick().await;
        loop {
            interval.tick().await;
            let settled = platform.resolve_support_queries()
                + platform.resolve_session_requests()
                + assets.resolve_all();
            if settled > 0 {
                debug!("[XRLOOP_SAMPLES] Settled {settled} requests");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use tokio::task::LocalSet;
    use xrloop::simulator::SimulatorConfig;

    use super::*;

    fn quick_config(sample: &str) -> DemoConfig {
        DemoConfig {
            sample: sample.into(),
            refresh_rate: 100.0,
            run_for_secs: 0.4,
            end_session_after_secs: Some(0.1),
            resolution_delay_ms: 10,
            ..Default::default()
        }
    }

    #[tokio::test]
    pub async fn test_run_enters_and_leaves() {
        let summary = LocalSet::new()
            .run_until(run(quick_config("solar-system")))
            .await
            .unwrap();

        assert_eq!(summary.sessions_started, 1);
        assert_eq!(summary.sessions_ended, 1);
        assert_eq!(summary.errors, 0);
        assert!(summary.immersive_frames > 0);
        assert!(summary.frames > summary.immersive_frames);
    }

    #[tokio::test]
    pub async fn test_run_denied() {
        let config = DemoConfig {
            simulator: SimulatorConfig {
                deny_reason: Some("No headset".into()),
                ..Default::default()
            },
            ..quick_config("photo-360")
        };
        let summary = LocalSet::new().run_until(run(config)).await.unwrap();

        assert_eq!(summary.sessions_started, 0);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.immersive_frames, 0);
    }

    #[tokio::test]
    pub async fn test_invalid_config_is_refused() {
        let config = DemoConfig {
            refresh_rate: 0.0,
            ..quick_config("immersive-ar")
        };
        let error = LocalSet::new().run_until(run(config)).await.unwrap_err();
        assert!(error.to_string().contains("refresh_rate"));

        let config = DemoConfig {
            end_session_after_secs: Some(-1.0),
            ..quick_config("immersive-ar")
        };
        assert!(LocalSet::new().run_until(run(config)).await.is_err());
    }

    #[tokio::test]
    pub async fn test_resolver_stops_when_dropped() {
        LocalSet::new()
            .run_until(async {
                let platform = SimulatedPlatform::manual(SimulatorConfig::default());
                let resolver = spawn_resolver(
                    platform,
                    SimulatedAssets::manual(),
                    Duration::from_millis(1),
                );
                drop(AbortOnDrop(resolver.abort_handle()));
                assert!(resolver.await.unwrap_err().is_cancelled());
            })
            .await;
    }

    #[tokio::test]
    pub async fn test_unknown_sample() {
        let error = LocalSet::new()
            .run_until(run(quick_config("asteroids")))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("spectator-mode"));
    }
}

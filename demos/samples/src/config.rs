use std::{path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use xrloop::{simulator::SimulatorConfig, surface::Extent, DEFAULT_REFRESH_RATE};

/// Environment variable that picks the sample, overriding the config file
pub const SAMPLE_ENV: &str = "XRLOOP_SAMPLE";

/// Everything the sample runner can be told
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Which sample to run, eg. `solar-system`
    pub sample: String,
    /// Frames per second
    pub refresh_rate: f32,
    /// How long to run for before unmounting, in seconds
    pub run_for_secs: f32,
    /// Press the entry control as soon as it is offered
    pub auto_enter: bool,
    /// Have the platform end the session this many seconds in
    pub end_session_after_secs: Option<f32>,
    /// How long the simulated platform takes to answer anything, in milliseconds
    pub resolution_delay_ms: u64,
    /// Size of the simulated surface
    pub extent: Extent,
    /// How the simulated platform behaves
    pub simulator: SimulatorConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sample: "immersive-ar".to_string(),
            refresh_rate: DEFAULT_REFRESH_RATE,
            run_for_secs: 5.0,
            auto_enter: true,
            end_session_after_secs: Some(3.0),
            resolution_delay_ms: 100,
            extent: Extent::default(),
            simulator: Default::default(),
        }
    }
}

impl DemoConfig {
    /// Read the config at `path`, or use the defaults if there isn't one. `XRLOOP_SAMPLE` wins over
    /// whatever the file says.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Unable to read config from {}", path.display()))?;
                Self::from_json(&json)?
            }
            None => Default::default(),
        };

        let config = config.with_sample_override(std::env::var(SAMPLE_ENV).ok());
        info!("[XRLOOP_SAMPLES] Using config {config:?}");
        Ok(config)
    }

    /// Parse and check a config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Unable to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the sample name, if there's a replacement
    pub fn with_sample_override(mut self, sample: Option<String>) -> Self {
        if let Some(sample) = sample.filter(|s| !s.is_empty()) {
            self.sample = sample;
        }
        self
    }

    /// Time between frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.refresh_rate)
    }

    /// Check every value `run` turns into a [`Duration`]
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(
            self.refresh_rate.is_finite() && self.refresh_rate > 0.0,
            "refresh_rate must be positive, got {}",
            self.refresh_rate
        );
        ensure!(
            self.run_for_secs.is_finite() && self.run_for_secs >= 0.0,
            "run_for_secs must not be negative, got {}",
            self.run_for_secs
        );
        ensure!(
            self.end_session_after_secs
                .map_or(true, |secs| secs.is_finite() && secs >= 0.0),
            "end_session_after_secs must not be negative, got {:?}",
            self.end_session_after_secs
        );
        ensure!(
            self.resolution_delay_ms > 0,
            "resolution_delay_ms must be at least 1"
        );
        Ok(())
    }
}

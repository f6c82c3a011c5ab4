use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeConfig {
    #[serde(default = "default_target_per_label")]
    pub target_per_label: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Lower bound in seconds of the pause between two fetched pages
    #[serde(default = "default_sleep_min")]
    pub sleep_min: f64,

    /// Upper bound in seconds of the pause between two fetched pages
    #[serde(default = "default_sleep_max")]
    pub sleep_max: f64,

    /// Number of admitted rows between two intermediate checkpoints
    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,

    /// Consecutive pages without admitted rows after which a source is abandoned
    #[serde(default = "default_stop_after_zero_streak")]
    pub stop_after_zero_streak: usize,

    #[serde(default = "default_min_title_len")]
    pub min_title_len: usize,

    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_per_label: default_target_per_label(),
            timeout_secs: default_timeout_secs(),
            sleep_min: default_sleep_min(),
            sleep_max: default_sleep_max(),
            checkpoint_every: default_checkpoint_every(),
            stop_after_zero_streak: default_stop_after_zero_streak(),
            min_title_len: default_min_title_len(),
            headers: default_headers(),
        }
    }
}

fn default_target_per_label() -> usize {
    5255
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_sleep_min() -> f64 {
    0.5
}

fn default_sleep_max() -> f64 {
    1.2
}

fn default_checkpoint_every() -> usize {
    300
}

fn default_stop_after_zero_streak() -> usize {
    80
}

fn default_min_title_len() -> usize {
    12
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "User-Agent".to_string(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
        ),
        (
            "Accept".to_string(),
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
        ),
    ])
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.sleep_min.is_finite() && self.sleep_max.is_finite();
        if !finite || self.sleep_min < 0.0 || self.sleep_min > self.sleep_max {
            return Err(ConfigError::InvalidDelay {
                min: self.sleep_min,
                max: self.sleep_max,
            });
        }
        if self.checkpoint_every == 0 {
            return Err(ConfigError::ZeroSetting("checkpointEvery"));
        }
        if self.stop_after_zero_streak == 0 {
            return Err(ConfigError::ZeroSetting("stopAfterZeroStreak"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroSetting("timeoutSecs"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A pause drawn uniformly from `[sleep_min, sleep_max]`.
    pub fn politeness_delay(&self) -> Duration {
        if self.sleep_max <= 0.0 {
            return Duration::ZERO;
        }
        let secs = rand::thread_rng().gen_range(self.sleep_min..=self.sleep_max);
        Duration::from_secs_f64(secs)
    }
}

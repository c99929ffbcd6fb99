use crate::device_camera::interface::Facing;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the remote classifier. None selects the bundled fake.
    pub classify_base_url: Option<String>,
    pub default_facing: Facing,
    pub tick_rate: Duration,
    /// How long a submission error stays on screen before it clears itself.
    pub toast_duration: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classify_base_url: None,
            default_facing: Facing::Environment,
            tick_rate: Duration::from_millis(500),
            toast_duration: Duration::from_secs(4),
            logger_timezone: coordinated_universal_time(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let classify_base_url = std::env::var("TRAY_SCAN_CLASSIFY_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self {
            classify_base_url,
            ..Self::default()
        }
    }
}

fn coordinated_universal_time() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}

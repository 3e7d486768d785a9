// Configuration loading for the monitoring service
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub influx: InfluxSettings,
}

/// Connection settings for the time-series store. All four are required
/// before a query can be issued, but they may be absent at startup: each
/// fetch cycle re-checks them, so filling them in and waiting for the
/// next tick recovers without a restart.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct InfluxSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub bucket: String,
}

impl InfluxSettings {
    /// Names of required connection settings that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("url");
        }
        if self.token.trim().is_empty() {
            missing.push("token");
        }
        if self.org.trim().is_empty() {
            missing.push("org");
        }
        if self.bucket.trim().is_empty() {
            missing.push("bucket");
        }
        missing
    }
}

/// Optional `config/monitor` file overlaid with `AQUA_`-prefixed
/// environment variables (`AQUA_INFLUX_URL`, `AQUA_INFLUX_TOKEN`,
/// `AQUA_INFLUX_ORG`, `AQUA_INFLUX_BUCKET`).
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(config::Environment::with_prefix("AQUA").separator("_"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

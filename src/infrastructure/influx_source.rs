// InfluxDB observation source
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::StringRecord;
use tracing::debug;

use crate::application::observation_source::{FetchError, ObservationSource, ObservationStream};
use crate::domain::observation::RawObservation;
use crate::infrastructure::config::InfluxSettings;

/// Range-query adapter for the InfluxDB 2.x HTTP API. Each call issues a
/// fresh Flux query and streams the annotated-CSV response back as raw
/// observations.
#[derive(Debug, Clone)]
pub struct InfluxObservationSource {
    settings: InfluxSettings,
    client: reqwest::Client,
}

impl InfluxObservationSource {
    pub fn new(settings: InfluxSettings) -> Self {
        let settings = InfluxSettings {
            url: settings.url.trim_end_matches('/').to_string(),
            ..settings
        };
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// No measurement filter: new fields keep flowing without a query
    /// change, and the pivot step decides what is recognized.
    fn flux_query(&self, lookback: Duration) -> String {
        format!(
            "from(bucket: \"{}\")\n  |> range(start: -{}s)",
            self.settings.bucket,
            lookback.as_secs()
        )
    }

    fn query_url(&self) -> String {
        format!(
            "{}/api/v2/query?org={}",
            self.settings.url,
            urlencoding::encode(&self.settings.org)
        )
    }

    async fn execute_query(&self, flux: &str) -> Result<String, FetchError> {
        debug!("executing flux query: {}", flux);

        let response = self
            .client
            .post(self.query_url())
            .header("Authorization", format!("Token {}", self.settings.token))
            .header("Accept", "application/csv")
            .json(&serde_json::json!({ "query": flux, "type": "flux" }))
            .send()
            .await
            .map_err(|e| FetchError::Query {
                message: format!("failed to reach InfluxDB: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Query {
                message: format!("InfluxDB rejected the query with status {status}: {body}"),
            });
        }

        response.text().await.map_err(|e| FetchError::Query {
            message: format!("failed to read InfluxDB response: {e}"),
        })
    }
}

#[async_trait]
impl ObservationSource for InfluxObservationSource {
    async fn observations(&self, lookback: Duration) -> Result<ObservationStream, FetchError> {
        // Pre-flight check; must short-circuit before any socket work.
        let missing = self.settings.missing();
        if !missing.is_empty() {
            return Err(FetchError::Configuration {
                missing: missing.join(", "),
            });
        }

        let body = self.execute_query(&self.flux_query(lookback)).await?;
        Ok(annotated_csv_stream(body))
    }
}

/// Streams observations out of an InfluxDB annotated-CSV body. Annotation
/// lines are dropped, each table's header row re-binds column positions,
/// and rows whose `_time` does not parse are skipped. A `_value` cell
/// that is empty or non-numeric becomes an absent value, not an error.
fn annotated_csv_stream(body: String) -> ObservationStream {
    Box::pin(async_stream::stream! {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(body.as_bytes());

        let mut columns: Option<Columns> = None;
        for row in reader.records() {
            let Ok(row) = row else { continue };
            if let Some(header) = Columns::from_header(&row) {
                columns = Some(header);
                continue;
            }
            let Some(bound) = columns.as_ref() else { continue };
            if let Some(obs) = bound.observation(&row) {
                yield obs;
            }
        }
    })
}

/// Column positions of one CSV table, taken from its header row.
struct Columns {
    time: usize,
    field: usize,
    value: usize,
}

impl Columns {
    fn from_header(row: &StringRecord) -> Option<Self> {
        let position = |name: &str| row.iter().position(|cell| cell == name);
        Some(Self {
            time: position("_time")?,
            field: position("_field")?,
            value: position("_value")?,
        })
    }

    fn observation(&self, row: &StringRecord) -> Option<RawObservation> {
        let timestamp = DateTime::parse_from_rfc3339(row.get(self.time)?)
            .ok()?
            .with_timezone(&Utc);
        let metric = row.get(self.field).unwrap_or("").to_string();
        let value = row
            .get(self.value)
            .filter(|cell| !cell.is_empty())
            .and_then(|cell| cell.parse::<f64>().ok());
        Some(RawObservation {
            timestamp,
            metric,
            value,
        })
    }
}

// IoTaWatt device client
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::power_source::PowerDataSource;
use crate::domain::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct IotawattClient {
    host: String,
    window_hours: u32,
}

#[derive(Debug, Deserialize)]
struct SeriesListResponse {
    series: Vec<SeriesEntry>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    name: String,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    labels: Vec<String>,
    data: Vec<Vec<f64>>,
}

impl IotawattClient {
    pub fn new(host: String, window_hours: u32) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            window_hours,
        }
    }

    fn series_list_url(&self) -> String {
        format!("{}/query?show=series", self.host)
    }

    fn data_query_url(&self, select: &str) -> String {
        format!(
            "{}/query?select={}&begin=s-{}h&end=s&group=auto&format=json&resolution=high&header=yes",
            self.host,
            urlencoding::encode(select),
            self.window_hours
        )
    }

    /// Select clause keeping only Watts series, in device order. The time
    /// column always leads so the payload validates as a snapshot.
    fn build_select_clause(series: &[SeriesEntry]) -> String {
        let sources: Vec<String> = series
            .iter()
            .filter(|s| s.unit == "Watts")
            .map(|s| format!("{}.Watts.d1", s.name))
            .collect();
        format!("[time.utc.unix,{}]", sources.join(","))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let client = reqwest::Client::new();
        let response = client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to IoTaWatt")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read IoTaWatt response")?;
        if !status.is_success() {
            anyhow::bail!("IoTaWatt query failed with status {}: {}", status, body);
        }

        serde_json::from_str(&body).context("Failed to parse IoTaWatt response")
    }
}

#[async_trait]
impl PowerDataSource for IotawattClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let listing: SeriesListResponse = self.get_json(&self.series_list_url()).await?;
        let select = Self::build_select_clause(&listing.series);
        tracing::debug!("querying IoTaWatt with select clause {select}");

        let payload: QueryResponse = self.get_json(&self.data_query_url(&select)).await?;
        let snapshot = Snapshot::from_columns(&payload.labels, &payload.data)
            .context("IoTaWatt returned a malformed payload")?;

        tracing::debug!("fetched {} channels", snapshot.series().len());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, unit: &str) -> SeriesEntry {
        SeriesEntry {
            name: name.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_select_clause_keeps_watts_series_in_order() {
        let series = vec![
            entry("Mains", "Watts"),
            entry("Voltage", "Volts"),
            entry("Kitchen", "Watts"),
        ];
        assert_eq!(
            IotawattClient::build_select_clause(&series),
            "[time.utc.unix,Mains.Watts.d1,Kitchen.Watts.d1]"
        );
    }

    #[test]
    fn test_data_query_url_encodes_the_select_clause() {
        let client = IotawattClient::new("http://192.168.128.5/".to_string(), 24);
        let url = client.data_query_url("[time.utc.unix,Mains.Watts.d1]");
        assert_eq!(
            url,
            "http://192.168.128.5/query?select=%5Btime.utc.unix%2CMains.Watts.d1%5D&begin=s-24h&end=s&group=auto&format=json&resolution=high&header=yes"
        );
    }
}

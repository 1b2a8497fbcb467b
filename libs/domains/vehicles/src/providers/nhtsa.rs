use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{RecallSource, VehicleApiConfig, VehicleDecoder};
use crate::error::FetchError;
use crate::models::{DecodedVariable, RecallRecord, VehicleInfo, Vin};

const DECODE_SERVICE: &str = "Vehicle data service";
const RECALL_SERVICE: &str = "Recall service";

/// Client for the NHTSA vPIC decoder and the NHTSA recalls API.
#[derive(Debug, Clone)]
pub struct NhtsaClient {
    client: Client,
    config: VehicleApiConfig,
}

impl NhtsaClient {
    pub fn new(config: VehicleApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("brainai/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        service: &'static str,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(service, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                service,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::from_reqwest(service, e))
    }
}

#[derive(Debug, Deserialize)]
struct DecodeResponse {
    #[serde(rename = "Results", default)]
    results: Vec<DecodedVariable>,
}

#[async_trait]
impl VehicleDecoder for NhtsaClient {
    #[instrument(skip_all, fields(vin = %vin))]
    async fn decode(&self, vin: &Vin) -> Result<Vec<DecodedVariable>, FetchError> {
        let url = format!("{}/vehicles/DecodeVin/{}", self.config.vpic_base_url, vin);
        let body: DecodeResponse = self
            .fetch(DECODE_SERVICE, self.client.get(url).query(&[("format", "json")]))
            .await?;

        debug!(variables = body.results.len(), "Decoded VIN");
        Ok(body.results)
    }
}

#[async_trait]
impl RecallSource for NhtsaClient {
    #[instrument(skip_all, fields(make = %vehicle.make, model = %vehicle.model, year = %vehicle.model_year))]
    async fn recalls(&self, vehicle: &VehicleInfo) -> Result<Vec<RecallRecord>, FetchError> {
        let url = format!("{}/recalls/recallsByVehicle", self.config.recalls_base_url);
        let request = self.client.get(url).query(&[
            ("make", vehicle.make.as_str()),
            ("model", vehicle.model.as_str()),
            ("modelYear", vehicle.model_year.as_str()),
        ]);

        let body: Value = self.fetch(RECALL_SERVICE, request).await?;
        let recalls = parse_recalls(&body)?;

        debug!(count = recalls.len(), "Fetched recalls");
        Ok(recalls)
    }
}

/// Map a recalls response body to records.
///
/// Missing or non-string fields become `""`. Entries with no usable field
/// at all are dropped. A body without a results array is a decode failure.
pub fn parse_recalls(body: &Value) -> Result<Vec<RecallRecord>, FetchError> {
    let entries = body
        .get("results")
        .or_else(|| body.get("Results"))
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Decode {
            service: RECALL_SERVICE,
            message: "response has no results array".to_string(),
        })?;

    Ok(entries
        .iter()
        .map(|entry| RecallRecord {
            manufacturer: text(entry, &["Manufacturer"]),
            campaign_number: text(entry, &["NHTSACampaignNumber", "CampaignNumber"]),
            report_date: text(entry, &["ReportReceivedDate"]),
            component: text(entry, &["Component"]),
            summary: text(entry, &["Summary"]),
        })
        .filter(|record| !record.is_empty())
        .collect())
}

fn text(entry: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| entry.get(*key))
        .find_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_recall_fields() {
        let body = json!({
            "Count": 1,
            "results": [{
                "Manufacturer": "Honda (American Honda Motor Co.)",
                "NHTSACampaignNumber": "19V182000",
                "ReportReceivedDate": "06/03/2019",
                "Component": "AIR BAGS",
                "Summary": "Inflator may rupture."
            }]
        });

        let recalls = parse_recalls(&body).unwrap();
        assert_eq!(
            recalls,
            vec![RecallRecord {
                manufacturer: "Honda (American Honda Motor Co.)".into(),
                campaign_number: "19V182000".into(),
                report_date: "06/03/2019".into(),
                component: "AIR BAGS".into(),
                summary: "Inflator may rupture.".into(),
            }]
        );
    }

    #[test]
    fn accepts_alternate_campaign_key_and_capitalized_results() {
        let body = json!({ "Results": [{ "CampaignNumber": "20V001000" }] });

        let recalls = parse_recalls(&body).unwrap();
        assert_eq!(recalls.len(), 1);
        assert_eq!(recalls[0].campaign_number, "20V001000");
        assert_eq!(recalls[0].summary, "");
    }

    #[test]
    fn drops_entries_without_any_field() {
        let body = json!({
            "results": [
                {},
                "not an object",
                { "Summary": null, "Component": 42 },
                { "Summary": "Brake fluid leak." }
            ]
        });

        let recalls = parse_recalls(&body).unwrap();
        assert_eq!(recalls.len(), 2);
        assert_eq!(recalls[0].component, "42");
        assert_eq!(recalls[1].summary, "Brake fluid leak.");
    }

    #[test]
    fn recall_text_is_not_trimmed() {
        let body = json!({
            "results": [{ "Component": " AIR BAGS ", "Summary": "Inflator may rupture.\n" }]
        });

        let recalls = parse_recalls(&body).unwrap();
        assert_eq!(recalls[0].component, " AIR BAGS ");
        assert_eq!(recalls[0].summary, "Inflator may rupture.\n");
    }

    #[test]
    fn missing_results_array_is_decode_error() {
        let err = parse_recalls(&json!({ "Message": "oops" })).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}

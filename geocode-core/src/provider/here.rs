use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    error::{GeocodeError, Result},
    model::{Location, StructuredAddress},
};

use super::Geocoder;

pub const DEFAULT_BASE_URL: &str = "https://geocoder.api.here.com/6.2/";

/// Search radius around the query point for reverse lookups, in meters.
const REVERSE_RADIUS_M: u32 = 250;

/// Client for the HERE Geocoder REST API (6.2).
#[derive(Clone)]
pub struct HereGeocoder {
    app_id: String,
    app_code: String,
    max_results: u32,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for HereGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HereGeocoder")
            .field("app_id", &self.app_id)
            .field("app_code", &"[REDACTED]")
            .field("max_results", &self.max_results)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HereGeocoder {
    /// `base_url` defaults to the public HERE endpoint when `None`.
    pub fn new(app_id: String, app_code: String, max_results: u32, base_url: Option<&str>) -> Self {
        let mut base_url = base_url.unwrap_or(DEFAULT_BASE_URL).to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { app_id, app_code, max_results, base_url, http: Client::new() }
    }

    /// Replace the HTTP client, e.g. to enforce a timeout.
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `Location` block of the first result, decoded as `L`.
    async fn fetch_first<L: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<L> {
        let url = format!("{}{endpoint}", self.base_url);
        let max_results = self.max_results.to_string();

        debug!(%url, "Sending request to HERE");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_code", self.app_code.as_str()),
                ("gen", "9"),
                ("maxresults", max_results.as_str()),
            ])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = res.text().await?;
        let parsed: HereResponse<L> = serde_json::from_str(&body)?;

        parsed.into_first_location().ok_or(GeocodeError::NoResult)
    }
}

#[async_trait]
impl Geocoder for HereGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Location> {
        let location: GeocodeLocation =
            self.fetch_first("geocode.json", &[("searchtext", address)]).await?;

        let position = location.display_position;
        debug!(lat = position.latitude, lng = position.longitude, "Geocoded address");

        Ok(Location::new(position.latitude, position.longitude))
    }

    #[instrument(skip(self))]
    async fn reverse_geocode_address(&self, lat: f64, lng: f64) -> Result<StructuredAddress> {
        let prox = format!("{lat},{lng},{REVERSE_RADIUS_M}");
        let location: ReverseLocation = self
            .fetch_first(
                "reversegeocode.json",
                &[("mode", "retrieveAddresses"), ("prox", prox.as_str())],
            )
            .await?;

        let address = StructuredAddress::from(location.address);
        debug!(label = %address.label, "Reverse geocoded point");

        Ok(address)
    }
}

// Each endpoint decodes only the `Location` fields it reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereResponse<L> {
    response: HereBody<L>,
}

impl<L> HereResponse<L> {
    fn into_first_location(self) -> Option<L> {
        let view = self.response.view.into_iter().next()?;
        view.result.into_iter().next().map(|result| result.location)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereBody<L> {
    #[serde(default = "Vec::new")]
    view: Vec<HereView<L>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereView<L> {
    #[serde(default = "Vec::new")]
    result: Vec<HereResult<L>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereResult<L> {
    location: L,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GeocodeLocation {
    display_position: HerePosition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReverseLocation {
    address: HereAddress,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HerePosition {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereAddress {
    label: String,
    country: Option<String>,
    state: Option<String>,
    county: Option<String>,
    city: Option<String>,
    district: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    postal_code: Option<String>,
    #[serde(default)]
    additional_data: Vec<HereKeyValue>,
}

// AdditionalData entries use lowercase keys, unlike the rest of the payload.
#[derive(Debug, Deserialize)]
struct HereKeyValue {
    key: String,
    value: String,
}

impl HereAddress {
    fn additional(&self, key: &str) -> Option<String> {
        self.additional_data.iter().find(|kv| kv.key == key).map(|kv| kv.value.clone())
    }
}

impl From<HereAddress> for StructuredAddress {
    fn from(addr: HereAddress) -> Self {
        let country = addr.additional("CountryName");
        let state_name = addr.additional("StateName");

        StructuredAddress {
            label: addr.label,
            house_number: addr.house_number,
            street: addr.street,
            district: addr.district,
            city: addr.city,
            county: addr.county,
            state: addr.state,
            state_name,
            postcode: addr.postal_code,
            country_code: addr.country,
            country,
        }
    }
}

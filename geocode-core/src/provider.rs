use crate::{
    Config, Location, StructuredAddress,
    error::Result,
    provider::here::HereGeocoder,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod here;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Here,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Here => "here",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Here]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "here" => Ok(ProviderId::Here),
            _ => Err(anyhow::anyhow!("Unknown provider '{value}'. Supported providers: here.")),
        }
    }
}

/// Forward and reverse geocoding against a single provider.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Coordinates of the best match for a free-form address.
    async fn geocode(&self, address: &str) -> Result<Location>;

    /// Formatted address of the best match near a point.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<String> {
        Ok(self.reverse_geocode_address(lat, lng).await?.label)
    }

    async fn reverse_geocode_address(&self, lat: f64, lng: f64) -> Result<StructuredAddress>;
}

/// Construct a geocoder from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    let settings = config.provider_config(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No credentials configured for provider '{id}'.\n\
                 Hint: run `geocode configure {id}` and enter your app id and app code."
        )
    })?;

    let boxed: Box<dyn Geocoder> = match id {
        ProviderId::Here => Box::new(HereGeocoder::new(
            settings.app_id.clone(),
            settings.app_code.clone(),
            settings.max_results,
            settings.base_url.as_deref(),
        )),
    };

    Ok(boxed)
}

/// Construct the default geocoder from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

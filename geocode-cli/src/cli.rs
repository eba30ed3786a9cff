use anyhow::Context;
use clap::{Parser, Subcommand};
use geocode_core::{
    Config, Geocoder, ProviderConfig, ProviderId, StructuredAddress,
    config::DEFAULT_MAX_RESULTS,
    provider::{default_provider_from_config, provider_from_config},
};
use inquire::{CustomType, Password, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geocode", version, about = "Geocoding CLI")]
pub struct Cli {
    /// Provider to use instead of the configured default, e.g. "here".
    #[arg(long, global = true)]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "here".
        provider: String,
    },

    /// Print the coordinates of an address.
    Forward {
        /// Free-form address; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,
    },

    /// Print the address nearest to a point.
    #[command(allow_negative_numbers = true)]
    Reverse {
        lat: f64,
        lng: f64,

        /// Print the individual address components, not just the label.
        #[arg(long)]
        detailed: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                configure(id)?;
            }
            Command::Forward { address } => {
                let geocoder = resolve_geocoder(self.provider.as_deref())?;
                let location = geocoder.geocode(&address.join(" ")).await?;
                println!("{location}");
            }
            Command::Reverse { lat, lng, detailed } => {
                let geocoder = resolve_geocoder(self.provider.as_deref())?;
                if detailed {
                    let address = geocoder.reverse_geocode_address(lat, lng).await?;
                    print_address(&address);
                } else {
                    println!("{}", geocoder.reverse_geocode(lat, lng).await?);
                }
            }
        }

        Ok(())
    }
}

fn configure(id: ProviderId) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let app_id = Text::new(&format!("{id} app id:"))
        .prompt()
        .context("Failed to read app id")?;
    let app_code = Password::new(&format!("{id} app code:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read app code")?;
    let max_results = CustomType::<u32>::new("Maximum results per request:")
        .with_default(DEFAULT_MAX_RESULTS)
        .prompt()
        .context("Failed to read result limit")?;

    let mut provider = ProviderConfig::new(app_id.trim(), app_code.trim());
    provider.max_results = max_results;
    // keep a previously configured endpoint override
    provider.base_url = cfg.provider_config(id).and_then(|p| p.base_url.clone());

    cfg.upsert_provider(id, provider);
    cfg.save()?;

    println!("Saved {id} credentials to {}", Config::config_file_path()?.display());
    Ok(())
}

fn resolve_geocoder(provider: Option<&str>) -> anyhow::Result<Box<dyn Geocoder>> {
    let mut cfg = Config::load()?;
    cfg.apply_env_overrides();

    match provider {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, &cfg),
        None => default_provider_from_config(&cfg),
    }
}

fn print_address(address: &StructuredAddress) {
    println!("{}", address.label);

    let fields = [
        ("house number", &address.house_number),
        ("street", &address.street),
        ("district", &address.district),
        ("city", &address.city),
        ("county", &address.county),
        ("state", &address.state_name),
        ("postcode", &address.postcode),
        ("country", &address.country),
        ("country code", &address.country_code),
    ];

    for (name, value) in fields {
        if let Some(value) = value {
            println!("  {name}: {value}");
        }
    }
}

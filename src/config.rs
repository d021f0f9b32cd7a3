// Runtime settings for the simulated booking engine
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Tax percentages applied on top of the base price, per booking kind
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxRates {
    pub flight: f64,
    pub hotel: f64,
    pub package: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            flight: 0.12,
            hotel: 0.12,
            package: 0.05,
        }
    }
}

// Branding stamped into generated documents
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandConfig {
    pub name: String,
    pub tagline: String,
    pub support_email: String,
    pub support_phone: String,
    pub currency_symbol: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "Suvidha Escapes".to_string(),
            tagline: "Your Journey, Our Priority".to_string(),
            support_email: "support@suvidhaescapes.com".to_string(),
            support_phone: "+91 98765 43210".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Engine configuration.
///
/// Every latency is artificial: nothing waits on real I/O, the timers only
/// reproduce how long the storefront pretends to work.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookingConfig {
    pub search_latency_ms: u64,
    pub payment_latency_ms: u64,
    pub checkout_payment_latency_ms: u64,
    pub payment_success_hold_ms: u64,
    pub typing_latency_ms: u64,
    pub itinerary_latency_ms: u64,
    pub tax_rates: TaxRates,
    pub brand: BrandConfig,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            search_latency_ms: 1500,
            payment_latency_ms: 2500,
            checkout_payment_latency_ms: 3000,
            payment_success_hold_ms: 2000,
            typing_latency_ms: 1000,
            itinerary_latency_ms: 3000,
            tax_rates: TaxRates::default(),
            brand: BrandConfig::default(),
        }
    }
}

impl BookingConfig {
    // Same rates and branding, no artificial waiting
    pub fn instant() -> Self {
        Self {
            search_latency_ms: 0,
            payment_latency_ms: 0,
            checkout_payment_latency_ms: 0,
            payment_success_hold_ms: 0,
            typing_latency_ms: 0,
            itinerary_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Layers an optional `config/booking.{toml,json,yaml}` file and
    /// `SUVIDHA__*` environment variables over the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/booking").required(false))
            .add_source(
                config::Environment::with_prefix("SUVIDHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: BookingConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("flight", self.tax_rates.flight),
            ("hotel", self.tax_rates.hotel),
            ("package", self.tax_rates.package),
        ];
        for (kind, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} tax rate must be a non-negative number, got {}",
                    kind, rate
                )));
            }
        }
        Ok(())
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }

    pub fn checkout_payment_latency(&self) -> Duration {
        Duration::from_millis(self.checkout_payment_latency_ms)
    }

    pub fn payment_success_hold(&self) -> Duration {
        Duration::from_millis(self.payment_success_hold_ms)
    }

    pub fn typing_latency(&self) -> Duration {
        Duration::from_millis(self.typing_latency_ms)
    }

    pub fn itinerary_latency(&self) -> Duration {
        Duration::from_millis(self.itinerary_latency_ms)
    }
}

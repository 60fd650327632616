//! Store configuration, read from `STOREFRONT_*` environment variables.

use std::path::PathBuf;

use storefront_cart::ShippingPolicy;
use storefront_core::currency::DEFAULT_LOCALE;
use storefront_core::{CurrencyCode, CurrencyFormatter, Money};
use storefront_observability::tracing::LogFormat;

use crate::error::ConfigError;

pub const ENV_CURRENCY: &str = "STOREFRONT_CURRENCY";
pub const ENV_LOCALE: &str = "STOREFRONT_LOCALE";
pub const ENV_FLAT_SHIPPING: &str = "STOREFRONT_FLAT_SHIPPING";
pub const ENV_CATALOG: &str = "STOREFRONT_CATALOG";
pub const ENV_LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Currency every price is expressed in.
    pub currency: CurrencyCode,
    /// Locale name used for number formatting (e.g. `es-MX`).
    pub locale: String,
    /// Shipping rule applied to non-empty carts.
    pub shipping: ShippingPolicy,
    /// Catalog JSON file; `None` uses the built-in sample catalog.
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::mxn(),
            locale: DEFAULT_LOCALE.to_string(),
            shipping: ShippingPolicy::default(),
            catalog_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl StoreConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_CURRENCY) {
            config.currency = CurrencyCode::parse(&value).map_err(|_| ConfigError::InvalidCurrency {
                var: ENV_CURRENCY,
                value,
            })?;
        }

        if let Some(value) = get(ENV_LOCALE) {
            config.locale = value.trim().to_string();
        }

        if let Some(value) = get(ENV_FLAT_SHIPPING) {
            let fee = parse_major_amount(&value).ok_or(ConfigError::InvalidAmount {
                var: ENV_FLAT_SHIPPING,
                value: value.clone(),
            })?;
            config.shipping = ShippingPolicy::flat(fee);
        }

        config.catalog_path = get(ENV_CATALOG).map(PathBuf::from);

        if let Some(value) = get(ENV_LOG_FORMAT) {
            config.log_format = LogFormat::from_name(&value);
        }

        Ok(config)
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_flat_shipping(mut self, fee: Money) -> Self {
        self.shipping = ShippingPolicy::flat(fee);
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::for_locale_name(&self.locale)
    }
}

/// Parse `"99"` or `"99.5"` / `"99.50"` (major units) into [`Money`].
fn parse_major_amount(value: &str) -> Option<Money> {
    let value = value.trim();
    let (major, minor) = match value.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (value, ""),
    };

    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let major: u64 = major.parse().ok()?;
    let minor: u64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<u64>().ok()? * 10,
        _ => minor.parse().ok()?,
    };

    let minor_total = major.checked_mul(storefront_core::money::MINOR_PER_MAJOR)?.checked_add(minor)?;
    Some(Money::from_minor(minor_total))
}

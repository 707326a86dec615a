//! Runtime configuration, read from `STOCKROOM_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};

use stockroom_inventory::{DiscountFactor, ItemKind, LoaderOptions, PricingPolicy};
use stockroom_observability::LogFormat;

pub const DEFAULT_ITEMS_CSV: &str = "items.csv";

/// How the registry is written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One descriptor per line.
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub items_csv: PathBuf,
    /// `STOCKROOM_ITEMS_CSV` was unset and `items_csv` is the default path.
    pub items_csv_defaulted: bool,
    pub pay_rate: DiscountFactor,
    pub phone_pay_rate: Option<DiscountFactor>,
    pub apply_discount: bool,
    pub accept_whole_floats: bool,
    pub output: OutputFormat,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults,
    /// malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (items_csv, items_csv_defaulted) = match lookup("STOCKROOM_ITEMS_CSV") {
            Some(path) => (PathBuf::from(path), false),
            None => (PathBuf::from(DEFAULT_ITEMS_CSV), true),
        };

        let pay_rate = match lookup("STOCKROOM_PAY_RATE") {
            Some(raw) => parse_factor("STOCKROOM_PAY_RATE", &raw)?,
            None => DiscountFactor::default(),
        };

        let phone_pay_rate = lookup("STOCKROOM_PHONE_PAY_RATE")
            .map(|raw| parse_factor("STOCKROOM_PHONE_PAY_RATE", &raw))
            .transpose()?;

        let apply_discount = lookup("STOCKROOM_APPLY_DISCOUNT")
            .map(|raw| parse_bool("STOCKROOM_APPLY_DISCOUNT", &raw))
            .transpose()?
            .unwrap_or(false);

        let accept_whole_floats = lookup("STOCKROOM_ACCEPT_WHOLE_FLOATS")
            .map(|raw| parse_bool("STOCKROOM_ACCEPT_WHOLE_FLOATS", &raw))
            .transpose()?
            .unwrap_or(false);

        let output = lookup("STOCKROOM_OUTPUT")
            .map(|raw| raw.parse::<OutputFormat>())
            .transpose()
            .context("invalid STOCKROOM_OUTPUT")?
            .unwrap_or_default();

        let log_format = lookup("STOCKROOM_LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>().map_err(|e| anyhow!(e)))
            .transpose()
            .context("invalid STOCKROOM_LOG_FORMAT")?
            .unwrap_or_default();

        Ok(Self {
            items_csv,
            items_csv_defaulted,
            pay_rate,
            phone_pay_rate,
            apply_discount,
            accept_whole_floats,
            output,
            log_format,
        })
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        let mut policy = PricingPolicy::new(self.pay_rate);
        if let Some(factor) = self.phone_pay_rate {
            policy.set_override(ItemKind::Phone, factor);
        }
        policy
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            accept_whole_floats: self.accept_whole_floats,
        }
    }
}

fn parse_factor(key: &str, raw: &str) -> anyhow::Result<DiscountFactor> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    DiscountFactor::new(value).with_context(|| format!("invalid {key}"))
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be true or false, got '{raw}'"),
    }
}

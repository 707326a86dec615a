//! The `stockroom` pipeline: load a CSV, optionally discount, print the registry.

pub mod config;

use std::io::Write;

use anyhow::Context;

use config::{Config, OutputFormat};
use stockroom_inventory::Inventory;

/// Runs one load-discount-print pass, writing the registry to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    if config.items_csv_defaulted {
        tracing::warn!(
            path = %config.items_csv.display(),
            "STOCKROOM_ITEMS_CSV not set; using default path"
        );
    }

    let mut inventory = Inventory::new()
        .with_pricing(config.pricing_policy())
        .with_loader_options(config.loader_options());

    let loaded = inventory
        .load_csv_path(&config.items_csv)
        .with_context(|| format!("failed to load {}", config.items_csv.display()))?;
    tracing::info!(count = loaded.len(), "inventory loaded");

    if config.apply_discount {
        inventory.apply_discount_all();
        tracing::info!(
            pay_rate = config.pay_rate.value(),
            "discount applied to all entities"
        );
    }

    match config.output {
        OutputFormat::Text => {
            for descriptor in inventory.descriptors() {
                writeln!(out, "{descriptor}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, inventory.registry())
                .context("failed to serialize registry")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

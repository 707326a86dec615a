//! `stockroom` — load items from a CSV and print the registry.

use std::io;

use stockroom_cli::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    stockroom_observability::init(config.log_format);

    let stdout = io::stdout();
    stockroom_cli::run(&config, &mut stdout.lock())
}
